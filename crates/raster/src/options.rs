use crate::error::CaptureError;
use srsforge_types::{Color, Rect, Size};

/// Upper bound on the pixel area of a single capture.
pub const MAX_CAPTURE_PIXELS: u64 = 120_000_000;

/// Which region of the target is captured.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CaptureExtent {
    /// The whole scrollable content, not just the visible frame.
    #[default]
    FullScroll,
    /// A fixed region anchored at the target's top-left corner, in CSS pixels.
    Explicit { width: f32, height: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOptions {
    /// Device pixels per CSS pixel.
    pub scale: f32,
    pub extent: CaptureExtent,
    /// Fill painted under the content; `None` leaves the raster transparent.
    pub background: Option<Color>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            extent: CaptureExtent::FullScroll,
            background: Some(Color::WHITE),
        }
    }
}

impl CaptureOptions {
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_extent(mut self, extent: CaptureExtent) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn validate(&self) -> Result<(), CaptureError> {
        if !self.scale.is_finite() || self.scale < 1.0 {
            return Err(CaptureError::InvalidOptions(format!(
                "scale must be a finite number >= 1, got {}",
                self.scale
            )));
        }
        if let CaptureExtent::Explicit { width, height } = self.extent {
            if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
                return Err(CaptureError::InvalidOptions(format!(
                    "explicit extent must be finite and non-negative, got {width}x{height}"
                )));
            }
        }
        Ok(())
    }

    /// The captured region in CSS pixels, absolute in tree coordinates.
    pub(crate) fn region(&self, target_frame: Rect, scroll_extent: Size) -> Rect {
        let size = match self.extent {
            CaptureExtent::FullScroll => scroll_extent,
            CaptureExtent::Explicit { width, height } => Size::new(width, height),
        };
        Rect::new(target_frame.x, target_frame.y, size.width, size.height)
    }

    /// Device pixel dimensions for `region`.
    pub(crate) fn pixel_size(&self, region: Rect) -> Result<(u32, u32), CaptureError> {
        let width = (region.width * self.scale).ceil();
        let height = (region.height * self.scale).ceil();
        if width < 1.0 || height < 1.0 {
            return Err(CaptureError::EmptyExtent);
        }
        let (width, height) = (width as u64, height as u64);
        if width > u32::MAX as u64 || height > u32::MAX as u64 || width * height > MAX_CAPTURE_PIXELS {
            return Err(CaptureError::Allocation {
                width: width.min(u32::MAX as u64) as u32,
                height: height.min(u32::MAX as u64) as u32,
            });
        }
        Ok((width as u32, height as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_capture_full_scroll_at_double_scale_on_white() {
        let options = CaptureOptions::default();
        assert_eq!(options.scale, 2.0);
        assert_eq!(options.extent, CaptureExtent::FullScroll);
        assert_eq!(options.background, Some(Color::WHITE));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_bad_scale_and_extent() {
        for scale in [0.5, 0.0, -1.0, f32::NAN, f32::INFINITY] {
            let options = CaptureOptions::default().with_scale(scale);
            assert!(matches!(options.validate(), Err(CaptureError::InvalidOptions(_))), "{scale}");
        }
        let options = CaptureOptions::default().with_extent(CaptureExtent::Explicit {
            width: -1.0,
            height: 10.0,
        });
        assert!(matches!(options.validate(), Err(CaptureError::InvalidOptions(_))));
    }

    #[test]
    fn pixel_size_rounds_up_and_bounds_area() {
        let options = CaptureOptions::default();
        let frame = Rect::new(5.0, 5.0, 100.5, 10.0);
        let region = options.region(frame, Size::new(100.5, 40.0));
        assert_eq!(region, Rect::new(5.0, 5.0, 100.5, 40.0));
        assert_eq!(options.pixel_size(region).unwrap(), (201, 80));

        let empty = options.region(frame, Size::new(0.0, 40.0));
        assert!(matches!(options.pixel_size(empty), Err(CaptureError::EmptyExtent)));

        let huge = Rect::new(0.0, 0.0, 100_000.0, 100_000.0);
        assert!(matches!(options.pixel_size(huge), Err(CaptureError::Allocation { .. })));
    }
}
