//! Model resolution.
//!
//! Turns references from blockstates into absolute, rotated and merged
//! models: inheritance is flattened by [`ModelResolver`], variant rotations
//! are baked in by [`rotate_reference`], and multipart sources are combined
//! by [`merge_models`].

pub mod merge;
pub mod model_resolver;
pub mod rotation;

pub use merge::merge_models;
pub use model_resolver::ModelResolver;
pub use rotation::{rotate_element, rotate_model, rotate_reference};
