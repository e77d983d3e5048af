use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::math::mul_div255;
use crate::model::act::SpriteImage;

/// Device-ready raster produced by recoloring a sprite image.
///
/// Pixels are packed `u32` values whose little-endian byte order is B, G, R,
/// A, the native layout of the presenting surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl RasterBuffer {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major packed BGRA pixels.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Packed pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Alpha channel at `(x, y)`; `0` when out of bounds.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y).map(|px| (px >> 24) as u8).unwrap_or(0)
    }
}

#[inline]
fn pack_bgra(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Recolor an indexed image through a tinted palette lookup table.
///
/// The 256-entry table is built once per recoloring (each channel multiplied
/// by the tint channel, truncating division by 255, RGBA swizzled to BGRA);
/// the per-pixel loop is then a single table lookup with no branches or
/// allocations. Palette indices past the palette length resolve to
/// transparent. Pixel data shorter than `width * height` leaves the tail
/// transparent rather than failing.
fn recolor_indexed(
    width: u32,
    height: u32,
    pixels: &[u8],
    palette: &[Rgba8],
    tint: Rgba8,
) -> RasterBuffer {
    let mut lut = [0u32; 256];
    for (slot, entry) in lut.iter_mut().zip(palette.iter()) {
        *slot = pack_bgra(
            mul_div255(entry.r, tint.r),
            mul_div255(entry.g, tint.g),
            mul_div255(entry.b, tint.b),
            mul_div255(entry.a, tint.a),
        );
    }

    let mut out = vec![0u32; (width as usize) * (height as usize)];
    for (dst, &index) in out.iter_mut().zip(pixels.iter()) {
        *dst = lut[usize::from(index)];
    }

    RasterBuffer {
        width,
        height,
        pixels: out,
    }
}

/// Recolor a true-color image.
///
/// Reference behavior, preserved as-is: only the red and alpha channels are
/// multiplied by the tint; green and blue are forced to zero in the
/// destination.
fn recolor_true_color(width: u32, height: u32, rgba8: &[u8], tint: Rgba8) -> RasterBuffer {
    let mut out = vec![0u32; (width as usize) * (height as usize)];
    for (dst, src) in out.iter_mut().zip(rgba8.chunks_exact(4)) {
        *dst = pack_bgra(
            mul_div255(src[0], tint.r),
            0,
            0,
            mul_div255(src[3], tint.a),
        );
    }

    RasterBuffer {
        width,
        height,
        pixels: out,
    }
}

#[derive(Clone, Debug)]
struct PixelCacheEntry {
    content_hash: u64,
    tint: Rgba8,
    buffer: Arc<RasterBuffer>,
}

/// Per-renderer cache of recolored rasters keyed by absolute sprite index.
///
/// Entries are invalidated by content-hash comparison rather than explicit
/// notification, so a stale entry only ever costs a recompute. The stored
/// tint guards against serving a buffer recolored for a different layer
/// color.
#[derive(Clone, Debug, Default)]
pub(crate) struct PixelCache {
    entries: HashMap<usize, PixelCacheEntry>,
    recomputes: u64,
}

impl PixelCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Recolored raster for `image` under `tint`, reusing the cached buffer
    /// when the image content hash and tint both match.
    pub(crate) fn composite(
        &mut self,
        sprite_index: usize,
        image: &SpriteImage,
        tint: Rgba8,
    ) -> Arc<RasterBuffer> {
        let content_hash = image.content_hash();
        if let Some(entry) = self.entries.get(&sprite_index)
            && entry.content_hash == content_hash
            && entry.tint == tint
        {
            return Arc::clone(&entry.buffer);
        }

        self.recomputes += 1;
        tracing::trace!(sprite_index, "recoloring sprite raster");
        let buffer = Arc::new(match image {
            SpriteImage::Indexed {
                width,
                height,
                pixels,
                palette,
            } => recolor_indexed(*width, *height, pixels, palette, tint),
            SpriteImage::TrueColor {
                width,
                height,
                rgba8,
            } => recolor_true_color(*width, *height, rgba8, tint),
        });
        self.entries.insert(
            sprite_index,
            PixelCacheEntry {
                content_hash,
                tint,
                buffer: Arc::clone(&buffer),
            },
        );
        buffer
    }

    /// Number of recolorings performed since construction.
    pub(crate) fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/compose.rs"]
mod tests;
