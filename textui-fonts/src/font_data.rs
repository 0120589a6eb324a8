//! Owned font bytes with a borrowed swash view.

use std::sync::Arc;
use swash::{CacheKey, FontRef};

use crate::error::FontError;

/// Stores font data together with the offset and cache key swash needs.
///
/// The `FontRef` is rebuilt on demand from the owned bytes, so no
/// self-referential lifetime is required.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF/TTC)
    pub data: Arc<Vec<u8>>,
    offset: u32,
    key: CacheKey,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("data_len", &self.data.len())
            .field("offset", &self.offset)
            .finish()
    }
}

impl FontData {
    /// Create a new FontData from bytes with a specific face index.
    ///
    /// The face index matters for TrueType Collection (.ttc) files where
    /// several faces share one blob.
    pub fn new(data: Vec<u8>, face_index: usize) -> Result<Self, FontError> {
        let (offset, key) = {
            let font_ref = FontRef::from_index(&data, face_index).ok_or_else(|| {
                FontError::InvalidFontData(format!(
                    "face {face_index} not found in {} bytes",
                    data.len()
                ))
            })?;
            (font_ref.offset, font_ref.key)
        };

        Ok(FontData {
            data: Arc::new(data),
            offset,
            key,
        })
    }

    /// Swash font reference for glyph operations
    pub fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: self.data.as_slice(),
            offset: self.offset,
            key: self.key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_data_invalid_bytes() {
        assert!(FontData::new(vec![0u8; 100], 0).is_err());
    }

    #[test]
    fn test_font_data_empty_bytes() {
        assert!(matches!(
            FontData::new(Vec::new(), 0),
            Err(FontError::InvalidFontData(_))
        ));
    }
}
