use crate::error::CaptureError;
use crate::image::RasterImage;
use crate::options::CaptureOptions;
use crate::paint::{DisplayList, Painter};
use srsforge_traits::{
    CancellationToken, InMemoryResourceProvider, OrCancelExt, ResourceError, ResourceProvider,
};
use srsforge_types::ResourceUri;
use srsforge_visual::{FontBook, VisualNode};
use std::collections::HashMap;
use std::sync::Arc;
use tiny_skia::Transform;

/// The result of a successful capture.
#[derive(Debug, Clone)]
pub struct Capture {
    pub image: RasterImage,
    /// Images that could not be loaded or decoded; their frames stay unpainted.
    pub skipped_resources: Vec<ResourceUri>,
    /// Text runs left unpainted because no font face was available.
    pub skipped_text_runs: usize,
}

#[derive(Debug, Clone)]
pub struct Rasterizer {
    fonts: Arc<FontBook>,
    resources: Arc<dyn ResourceProvider>,
}

impl Rasterizer {
    pub fn new(fonts: Arc<FontBook>) -> Self {
        Self {
            fonts,
            resources: Arc::new(InMemoryResourceProvider::new()),
        }
    }

    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = resources;
        self
    }

    /// Paints `target` and its whole scrollable content into a raster.
    ///
    /// Resource loading and painting run on blocking workers; either stage is
    /// abandoned as soon as `cancel` fires.
    pub async fn capture(
        &self,
        target: &VisualNode,
        options: &CaptureOptions,
        cancel: &CancellationToken,
    ) -> Result<Capture, CaptureError> {
        options.validate()?;
        if cancel.is_cancelled() {
            return Err(CaptureError::Cancelled);
        }

        let region = options.region(target.frame, target.scroll_extent());
        let (width, height) = options.pixel_size(region)?;
        let list = DisplayList::build(target)?;
        log::debug!(
            "Capturing {:.0}x{:.0}px region at scale {} into {}x{} raster ({} paint op(s))",
            region.width,
            region.height,
            options.scale,
            width,
            height,
            list.ops.len()
        );

        let sources = list.image_sources();
        let (images, skipped_resources) = if sources.is_empty() {
            (HashMap::new(), Vec::new())
        } else {
            let provider = Arc::clone(&self.resources);
            let loaded = tokio::task::spawn_blocking(move || load_images(provider.as_ref(), sources))
                .or_cancel(cancel)
                .await
                .map_err(|_| CaptureError::Cancelled)?
                .map_err(|e| CaptureError::Worker(e.to_string()))?;
            partition_loaded(loaded)
        };

        let fonts = Arc::clone(&self.fonts);
        let background = options.background;
        let base = Transform::from_row(
            options.scale,
            0.0,
            0.0,
            options.scale,
            -region.x * options.scale,
            -region.y * options.scale,
        );
        let (image, stats) = tokio::task::spawn_blocking(move || {
            let painter = Painter {
                fonts: &fonts,
                images: &images,
                base,
            };
            painter.paint(&list, width, height, background)
        })
        .or_cancel(cancel)
        .await
        .map_err(|_| CaptureError::Cancelled)?
        .map_err(|e| CaptureError::Worker(e.to_string()))??;

        log::info!(
            "Captured {}x{} raster ({} resource(s) skipped)",
            image.width(),
            image.height(),
            skipped_resources.len()
        );
        Ok(Capture {
            image,
            skipped_resources,
            skipped_text_runs: stats.skipped_text_runs,
        })
    }
}

type Loaded = Vec<(ResourceUri, Result<RasterImage, ResourceError>)>;

fn load_images(provider: &dyn ResourceProvider, sources: Vec<ResourceUri>) -> Loaded {
    sources
        .into_iter()
        .map(|uri| {
            let result = provider.load(&uri).and_then(|data| {
                RasterImage::decode(&data).map_err(|e| ResourceError::InvalidFormat {
                    uri: uri.clone(),
                    message: e.to_string(),
                })
            });
            (uri, result)
        })
        .collect()
}

fn partition_loaded(loaded: Loaded) -> (HashMap<ResourceUri, RasterImage>, Vec<ResourceUri>) {
    let mut images = HashMap::new();
    let mut skipped = Vec::new();
    for (uri, result) in loaded {
        match result {
            Ok(image) => {
                images.insert(uri, image);
            }
            Err(e) => {
                log::warn!("Skipping image '{}': {}", uri, e);
                skipped.push(uri);
            }
        }
    }
    (images, skipped)
}
