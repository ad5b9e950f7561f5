//! Shared types used throughout the library.

mod direction;
mod transform;

pub use direction::{Axis, Direction};
pub use transform::{BlockTransform, ElementRotation, Rotation};

/// Strip the `minecraft:` namespace and `block/` folder prefixes from a
/// model or texture location.
/// "minecraft:block/stone" -> "stone"
pub fn strip_resource_name(location: &str) -> &str {
    let location = location.strip_prefix("minecraft:").unwrap_or(location);
    location.strip_prefix("block/").unwrap_or(location)
}
