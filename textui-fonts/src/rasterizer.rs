//! Glyph rasterization into alpha masks.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;

use crate::font_data::FontData;

/// Number of distinct characters kept rasterized.
const GLYPH_CACHE_CAPACITY: usize = 512;

/// Coverage mask of one glyph, positioned relative to the pen/baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    /// Offset from the pen x position to the mask's left edge
    pub left: i32,
    /// Offset from the baseline up to the mask's top edge
    pub top: i32,
    /// One coverage byte per pixel, row-major
    pub alpha: Vec<u8>,
}

/// Rasterizes characters of a single font at a single size.
pub struct GlyphRasterizer {
    font: FontData,
    font_size_pixels: f32,
    context: ScaleContext,
    cache: LruCache<char, Option<Arc<GlyphMask>>>,
}

impl std::fmt::Debug for GlyphRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRasterizer")
            .field("font", &self.font)
            .field("font_size_pixels", &self.font_size_pixels)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl GlyphRasterizer {
    pub fn new(font: FontData, font_size_pixels: f32) -> Self {
        let capacity = NonZeroUsize::new(GLYPH_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            font,
            font_size_pixels,
            context: ScaleContext::new(),
            cache: LruCache::new(capacity),
        }
    }

    /// Coverage mask for `ch`, or `None` for blank glyphs (e.g. space).
    pub fn rasterize(&mut self, ch: char) -> Option<Arc<GlyphMask>> {
        if let Some(cached) = self.cache.get(&ch) {
            return cached.clone();
        }
        let mask = self.render(ch).map(Arc::new);
        self.cache.put(ch, mask.clone());
        mask
    }

    fn render(&mut self, ch: char) -> Option<GlyphMask> {
        let font_ref = self.font.font_ref();
        let glyph_id = font_ref.charmap().map(ch);
        let mut scaler = self
            .context
            .builder(font_ref)
            .size(self.font_size_pixels)
            .hint(true)
            .build();

        let image = Render::new(&[
            Source::ColorOutline(0),
            Source::ColorBitmap(StrikeWith::BestFit),
            Source::Outline,
        ])
        .format(Format::Alpha)
        .render(&mut scaler, glyph_id)?;

        if image.placement.width == 0 || image.placement.height == 0 {
            return None;
        }

        log::trace!(
            "Rasterized {:?} (glyph {}) {}x{}",
            ch,
            glyph_id,
            image.placement.width,
            image.placement.height
        );

        Some(GlyphMask {
            width: image.placement.width,
            height: image.placement.height,
            left: image.placement.left,
            top: image.placement.top,
            alpha: coverage_from_image(&image),
        })
    }
}

/// Reduce any swash image content to one coverage byte per pixel.
fn coverage_from_image(image: &Image) -> Vec<u8> {
    match image.content {
        Content::Mask => image.data.clone(),
        // Color glyphs (emoji) keep only their alpha channel; cells are single-colored.
        Content::Color => image.data.chunks_exact(4).map(|px| px[3]).collect(),
        Content::SubpixelMask => {
            let pixel_count = (image.placement.width * image.placement.height) as usize;
            let stride = if pixel_count > 0 {
                image.data.len() / pixel_count
            } else {
                0
            };
            if stride < 3 {
                return vec![255; pixel_count];
            }
            image
                .data
                .chunks_exact(stride)
                .map(|px| {
                    let luma = px[0] as u32 * 299 + px[1] as u32 * 587 + px[2] as u32 * 114;
                    (luma / 1000) as u8
                })
                .collect()
        }
    }
}
