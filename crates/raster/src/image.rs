//! An owned RGBA raster.
//!
//! Pixels are stored straight (not premultiplied), row-major, four bytes each.
//! Conversion to a tiny-skia pixmap premultiplies on the way in and the painter's
//! output is demultiplied on the way out.

use crate::error::CaptureError;
use srsforge_types::Color;
use std::fmt;
use std::io::Cursor;
use tiny_skia::{ColorU8, Pixmap};

#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl RasterImage {
    /// Wraps straight RGBA bytes; `None` unless `rgba` holds exactly `width * height` pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (rgba.len() == expected).then_some(Self { width, height, rgba })
    }

    /// A uniformly filled raster.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let alpha = (color.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        let pixel = [color.r, color.g, color.b, alpha];
        let rgba = pixel.repeat(width as usize * height as usize);
        Self { width, height, rgba }
    }

    pub(crate) fn from_pixmap(pixmap: &Pixmap) -> Self {
        let mut rgba = Vec::with_capacity(pixmap.data().len());
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            rgba,
        }
    }

    pub(crate) fn to_pixmap(&self) -> Option<Pixmap> {
        let mut pixmap = Pixmap::new(self.width, self.height)?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(self.rgba.chunks_exact(4)) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        Some(pixmap)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.rgba[offset..offset + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3] as f32 / 255.0))
    }

    /// Three bytes per pixel with any transparency composited onto white.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.rgba.len() / 4 * 3);
        for p in self.rgba.chunks_exact(4) {
            let alpha = p[3] as u32;
            for &channel in &p[..3] {
                let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
                rgb.push(blended as u8);
            }
        }
        rgb
    }

    /// Rows `[top, top + rows)`, clipped to the image; `None` when nothing remains.
    pub fn crop_rows(&self, top: u32, rows: u32) -> Option<RasterImage> {
        if top >= self.height || rows == 0 {
            return None;
        }
        let bottom = top.saturating_add(rows).min(self.height);
        let stride = self.width as usize * 4;
        let rgba = self.rgba[top as usize * stride..bottom as usize * stride].to_vec();
        Some(Self {
            width: self.width,
            height: bottom - top,
            rgba,
        })
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, CaptureError> {
        let buffer = image::RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or_else(|| CaptureError::Encode("pixel buffer does not match dimensions".to_string()))?;
        let mut out = Cursor::new(Vec::new());
        buffer
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }

    /// Decodes PNG, JPEG or GIF bytes.
    pub fn decode(bytes: &[u8]) -> Result<RasterImage, image::ImageError> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self {
            width,
            height,
            rgba: decoded.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffers() {
        assert!(RasterImage::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(RasterImage::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(RasterImage::from_rgba(0, 0, Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn flattens_transparency_onto_white() {
        let image = RasterImage::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 0, 0, 0]).unwrap();
        assert_eq!(image.to_rgb_bytes(), vec![255, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn crop_rows_clips_to_the_bottom() {
        let image = RasterImage::filled(3, 10, Color::BLACK);
        assert_eq!(image.crop_rows(8, 5).unwrap().height(), 2);
        assert_eq!(image.crop_rows(0, 4).unwrap().as_rgba().len(), 3 * 4 * 4);
        assert!(image.crop_rows(10, 1).is_none());
    }

    #[test]
    fn png_survives_a_decode() {
        let image = RasterImage::filled(4, 3, Color::rgb(10, 20, 30));
        let png = image.encode_png().unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
        let decoded = RasterImage::decode(&png).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn pixmap_conversion_preserves_opaque_pixels() {
        let image = RasterImage::filled(2, 2, Color::rgb(200, 100, 50));
        let pixmap = image.to_pixmap().unwrap();
        assert_eq!(RasterImage::from_pixmap(&pixmap), image);
    }
}
