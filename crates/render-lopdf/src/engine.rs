use crate::error::RenderError;
use crate::writer::ImagePdfWriter;
use serde::{Deserialize, Serialize};
use srsforge_raster::RasterImage;
use srsforge_style::{Margins, PageSize};

/// Scaled heights within this many points of the page height still fit on one page.
const FIT_TOLERANCE_PT: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationMode {
    /// One page per page-height band of the image.
    #[default]
    Sliced,
    /// The whole image on one page, overflowing the bottom edge when too tall.
    SinglePage,
}

/// Where one band of the source image lands on one page.
///
/// `x`/`y` are the lower-left corner of the placed image in PDF user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub page_index: usize,
    pub source_top: u32,
    pub source_rows: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayoutEngine {
    page_size: PageSize,
    margins: Margins,
    mode: PaginationMode,
    title: Option<String>,
}

impl PageLayoutEngine {
    pub fn new(page_size: PageSize, margins: Margins, mode: PaginationMode) -> Self {
        Self {
            page_size,
            margins,
            mode,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn page_size(&self) -> &PageSize {
        &self.page_size
    }

    pub fn margins(&self) -> &Margins {
        &self.margins
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    fn printable_area(&self) -> Result<(f32, f32), RenderError> {
        let (page_width, page_height) = self.page_size.dimensions_pt();
        let width = page_width - self.margins.horizontal();
        let height = page_height - self.margins.vertical();
        if !(width > 0.0 && height > 0.0) {
            return Err(RenderError::InvalidPageGeometry(format!(
                "{page_width}x{page_height}pt page leaves {width}x{height}pt after margins"
            )));
        }
        Ok((width, height))
    }

    /// Computes page placements for a `width_px` x `height_px` image.
    pub fn plan(&self, width_px: u32, height_px: u32) -> Result<Vec<PagePlacement>, RenderError> {
        if width_px == 0 || height_px == 0 {
            return Err(RenderError::EmptyImage);
        }
        let (printable_width, printable_height) = self.printable_area()?;
        let page_top = self.page_size.height_pt() - self.margins.top;
        let left = self.margins.left;

        // Points per source pixel.
        let scale = printable_width / width_px as f32;
        let scaled_height = height_px as f32 * scale;

        let whole = |height: f32| PagePlacement {
            page_index: 0,
            source_top: 0,
            source_rows: height_px,
            x: left,
            y: page_top - height,
            width: printable_width,
            height,
        };

        if scaled_height <= printable_height + FIT_TOLERANCE_PT {
            return Ok(vec![whole(scaled_height)]);
        }
        if self.mode == PaginationMode::SinglePage {
            log::debug!(
                "Single-page mode: {:.1}pt image overflows a {:.1}pt page",
                scaled_height,
                printable_height
            );
            return Ok(vec![whole(scaled_height)]);
        }

        // Band edges in f64 so the last band always keeps at least one row.
        let rows_per_page = printable_height as f64 * width_px as f64 / printable_width as f64;
        let pages = (height_px as f64 / rows_per_page).ceil() as usize;
        let mut placements = Vec::with_capacity(pages);
        for page_index in 0..pages {
            let top = (page_index as f64 * rows_per_page).floor() as u32;
            let bottom = if page_index + 1 == pages {
                height_px
            } else {
                (((page_index + 1) as f64 * rows_per_page).floor() as u32).min(height_px)
            };
            let rows = bottom.saturating_sub(top);
            if rows == 0 {
                continue;
            }
            let height = rows as f32 * scale;
            placements.push(PagePlacement {
                page_index: placements.len(),
                source_top: top,
                source_rows: rows,
                x: left,
                y: page_top - height,
                width: printable_width,
                height,
            });
        }
        log::debug!(
            "Sliced {}x{}px image into {} page(s) of {:.0}px",
            width_px,
            height_px,
            placements.len(),
            rows_per_page
        );
        Ok(placements)
    }

    /// Writes `image` into a PDF according to [`plan`](Self::plan).
    pub fn layout(&self, image: &RasterImage) -> Result<LaidOutDocument, RenderError> {
        if image.is_empty() {
            return Err(RenderError::EmptyImage);
        }
        let placements = self.plan(image.width(), image.height())?;
        let (page_width, page_height) = self.page_size.dimensions_pt();

        let mut writer = ImagePdfWriter::new(page_width, page_height);
        for placement in &placements {
            let band = image
                .crop_rows(placement.source_top, placement.source_rows)
                .ok_or(RenderError::EmptyImage)?;
            writer.add_image_page(&band, placement)?;
        }
        let bytes = writer.finish(self.title.as_deref())?;
        log::info!(
            "Laid out {} page(s), {} bytes",
            placements.len(),
            bytes.len()
        );
        Ok(LaidOutDocument {
            bytes,
            page_count: placements.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(mode: PaginationMode) -> PageLayoutEngine {
        PageLayoutEngine::new(PageSize::Custom { width: 100.0, height: 200.0 }, Margins::default(), mode)
    }

    #[test]
    fn short_image_fits_on_one_page_at_the_top() {
        let plan = engine(PaginationMode::Sliced).plan(50, 60).unwrap();
        assert_eq!(plan.len(), 1);
        let page = plan[0];
        assert_eq!((page.width, page.height), (100.0, 120.0));
        assert_eq!((page.x, page.y), (0.0, 80.0));
        assert_eq!(page.source_rows, 60);
    }

    #[test]
    fn exact_fit_is_one_page() {
        assert_eq!(engine(PaginationMode::Sliced).plan(50, 100).unwrap().len(), 1);
    }

    #[test]
    fn tall_image_is_sliced_into_contiguous_bands() {
        // scaled height 2.5 pages
        let plan = engine(PaginationMode::Sliced).plan(50, 250).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.iter().map(|p| p.source_rows).sum::<u32>(), 250);
        for pair in plan.windows(2) {
            assert_eq!(pair[0].source_top + pair[0].source_rows, pair[1].source_top);
        }
        assert_eq!(plan[0].height, 200.0);
        assert_eq!(plan[0].y, 0.0);
        // Last band is half a page, pinned to the top edge.
        assert_eq!(plan[2].height, 100.0);
        assert_eq!(plan[2].y, 100.0);
    }

    #[test]
    fn narrow_images_get_one_page_per_band() {
        let engine = PageLayoutEngine::default();
        let (width, height) = engine.page_size().dimensions_pt();
        for width_px in 1..=8u32 {
            let rows_per_page = height as f64 * width_px as f64 / width as f64;
            for height_px in [7985u32, 12_001, 40_000] {
                let plan = engine.plan(width_px, height_px).unwrap();
                let expected = (height_px as f64 / rows_per_page).ceil() as usize;
                assert_eq!(plan.len(), expected, "{width_px}x{height_px}");
                assert!(plan.iter().all(|p| p.source_rows > 0));
                assert_eq!(plan.iter().map(|p| p.source_rows).sum::<u32>(), height_px);
            }
        }
    }

    #[test]
    fn single_page_mode_overflows() {
        let plan = engine(PaginationMode::SinglePage).plan(50, 250).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].height, 500.0);
        assert!(plan[0].y < 0.0);
    }

    #[test]
    fn margins_shrink_the_printable_area() {
        let engine = PageLayoutEngine::new(
            PageSize::Custom { width: 120.0, height: 220.0 },
            Margins::all(10.0),
            PaginationMode::Sliced,
        );
        let plan = engine.plan(50, 100).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!((plan[0].x, plan[0].y), (10.0, 10.0));

        let cramped = PageLayoutEngine::new(
            PageSize::Custom { width: 10.0, height: 10.0 },
            Margins::all(5.0),
            PaginationMode::Sliced,
        );
        assert!(matches!(cramped.plan(1, 1), Err(RenderError::InvalidPageGeometry(_))));
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        assert!(matches!(engine(PaginationMode::Sliced).plan(0, 10), Err(RenderError::EmptyImage)));
    }

    #[test]
    fn mode_deserializes_from_config_names() {
        let mode: PaginationMode = serde_json::from_str("\"single-page\"").unwrap();
        assert_eq!(mode, PaginationMode::SinglePage);
        assert_eq!(PaginationMode::default(), PaginationMode::Sliced);
    }
}
