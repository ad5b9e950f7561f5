//! WASM bindings for vpt-generator.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.

use crate::pipeline::Stage;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

fn to_js_error(e: crate::GeneratorError) -> JsError {
    JsError::new(&e.to_string())
}

/// Layered input loaded from the jar and resource pack bytes.
#[wasm_bindgen]
pub struct ResourcePackHandle {
    inner: crate::ResourcePack,
}

#[wasm_bindgen]
impl ResourcePackHandle {
    /// Load the jar ZIP and lay the resource pack ZIP over it.
    #[wasm_bindgen(constructor)]
    pub fn new(jar: &[u8], resource_pack: &[u8]) -> Result<ResourcePackHandle, JsError> {
        let pack = crate::load_layered_from_bytes(jar, resource_pack).map_err(to_js_error)?;
        Ok(ResourcePackHandle { inner: pack })
    }

    /// Get the number of blockstates in the layered input.
    #[wasm_bindgen(getter)]
    pub fn blockstate_count(&self) -> usize {
        self.inner.blockstate_count()
    }

    /// Get the number of models in the layered input.
    #[wasm_bindgen(getter)]
    pub fn model_count(&self) -> usize {
        self.inner.model_count()
    }

    /// Get the number of textures in the layered input.
    #[wasm_bindgen(getter)]
    pub fn texture_count(&self) -> usize {
        self.inner.texture_count()
    }
}

/// Generator configuration options.
#[wasm_bindgen]
pub struct GeneratorOptions {
    max_atlas_size: u32,
    fallback_pack_format: u32,
}

#[wasm_bindgen]
impl GeneratorOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GeneratorOptions {
        let defaults = crate::GeneratorConfig::default();
        GeneratorOptions {
            max_atlas_size: defaults.max_atlas_size,
            fallback_pack_format: defaults.fallback_pack_format as u32,
        }
    }

    #[wasm_bindgen(setter)]
    pub fn set_max_atlas_size(&mut self, value: u32) {
        self.max_atlas_size = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_fallback_pack_format(&mut self, value: u32) {
        self.fallback_pack_format = value;
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Generated archive.
#[wasm_bindgen]
pub struct GenerateResult {
    file_name: String,
    data: Vec<u8>,
    model_count: usize,
    atlas_texture_count: usize,
}

#[wasm_bindgen]
impl GenerateResult {
    /// Suggested file name, e.g. `VPT_MyPack.zip`.
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    /// Archive bytes.
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn model_count(&self) -> usize {
        self.model_count
    }

    #[wasm_bindgen(getter)]
    pub fn atlas_texture_count(&self) -> usize {
        self.atlas_texture_count
    }
}

/// Generate the output archive.
///
/// `progress`, when given, is called as `progress(stageLabel, fraction)`.
#[wasm_bindgen]
pub fn generate(
    pack: &ResourcePackHandle,
    name: &str,
    skin: Option<Vec<u8>>,
    options: Option<GeneratorOptions>,
    progress: Option<js_sys::Function>,
) -> Result<GenerateResult, JsError> {
    let options = options.unwrap_or_default();
    let config = crate::GeneratorConfig::default()
        .with_max_atlas_size(options.max_atlas_size)
        .with_fallback_pack_format(options.fallback_pack_format as u64);

    let mut input = crate::GeneratorInput::new(
        pack.inner.clone(),
        crate::pipeline::pack_base_name(name),
    );
    if let Some(skin) = skin {
        input = input.with_skin(skin);
    }

    let mut report = |stage: Stage, fraction: f32| {
        if let Some(callback) = &progress {
            let _ = callback.call2(
                &JsValue::NULL,
                &JsValue::from_str(&stage.to_string()),
                &JsValue::from_f64(fraction as f64),
            );
        }
    };

    let output = crate::Generator::with_config(config)
        .generate(&input, &mut report)
        .map_err(to_js_error)?;

    Ok(GenerateResult {
        file_name: output.file_name,
        model_count: output.stats.generated_models,
        atlas_texture_count: output.stats.atlas_textures,
        data: output.data,
    })
}
