use image::RgbaImage;

use crate::foundation::error::{FormplateError, FormplateResult};

/// Decode a template image into straight-alpha RGBA8.
///
/// `path` only labels the error; any format the `image` crate reads is accepted.
pub fn decode_template(path: &str, bytes: &[u8]) -> FormplateResult<RgbaImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| FormplateError::asset_load(format!("decode '{path}': {e}")))?
        .to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(FormplateError::asset_load(format!(
            "template '{path}' has zero area"
        )));
    }
    Ok(img)
}
