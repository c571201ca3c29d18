use super::config::BackendSource;
use super::orchestrator::ExportOrchestrator;
use crate::config::AppConfig;
use crate::error::ExportError;
use srsforge_client::{BackendRenderClient, HttpRenderClient};
use srsforge_raster::{CaptureOptions, Rasterizer};
use srsforge_render_lopdf::{PageLayoutEngine, PaginationMode};
use srsforge_resource::FilesystemResourceProvider;
use srsforge_style::{Margins, PageSize};
use srsforge_traits::{ResourceProvider, SameOriginProvider};
use srsforge_types::{Color, NodeId};
use srsforge_visual::{
    CAPTURE_TARGET_ID, ColorSanitizer, FontBook, PreviewRenderer, PreviewTheme, SanitizeMode,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// A builder for creating an `ExportOrchestrator`.
pub struct ExportOrchestratorBuilder {
    system_fonts: bool,
    font_dirs: Vec<PathBuf>,
    font_data: Vec<Vec<u8>>,
    font_family: Option<String>,
    resources: Option<Arc<dyn ResourceProvider>>,
    resource_origin: Option<String>,
    capture: CaptureOptions,
    page_size: PageSize,
    margins: Margins,
    pagination: PaginationMode,
    sanitize_mode: SanitizeMode,
    fallback_color: Color,
    capture_target: String,
    theme: PreviewTheme,
    preview_width: Option<f32>,
    backend: BackendSource,
}

impl Default for ExportOrchestratorBuilder {
    fn default() -> Self {
        Self {
            system_fonts: false,
            font_dirs: Vec::new(),
            font_data: Vec::new(),
            font_family: None,
            resources: None,
            resource_origin: None,
            capture: CaptureOptions::default(),
            page_size: PageSize::default(),
            margins: Margins::default(),
            pagination: PaginationMode::default(),
            sanitize_mode: SanitizeMode::default(),
            fallback_color: Color::BLACK,
            capture_target: CAPTURE_TARGET_ID.to_string(),
            theme: PreviewTheme::default(),
            preview_width: None,
            backend: BackendSource::Unconfigured,
        }
    }
}

impl ExportOrchestratorBuilder {
    /// Defaults with no fonts loaded and no backend configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds every setting `AppConfig` covers.
    pub fn from_config(config: &AppConfig) -> Result<Self, ExportError> {
        let export = &config.export;
        let mut builder = Self::new()
            .with_system_fonts(config.fonts.system_fonts)
            .with_page_size(export.page_size)
            .with_margins(export.margins)
            .with_pagination(export.pagination)
            .with_sanitize_mode(export.sanitize)
            .with_fallback_color(export.fallback_color()?)
            .with_capture_scale(export.capture_scale)
            .with_capture_target(export.capture_target.clone());
        if let Some(dir) = &export.resource_dir {
            builder = builder.with_resource_dir(dir);
        }
        if let Some(origin) = &export.resource_origin {
            builder = builder.with_resource_origin(origin.clone());
        }
        if let Some(dir) = &config.fonts.font_dir {
            builder = builder.with_font_dir(dir);
        }
        if let Some(base_url) = config.backend.base_url() {
            builder = builder.with_backend_url(base_url, config.backend.timeout());
        }
        Ok(builder)
    }

    /// Scans the host system for installed fonts when the orchestrator is built.
    pub fn with_system_fonts(mut self, enable: bool) -> Self {
        self.system_fonts = enable;
        self
    }

    pub fn with_font_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.font_dirs.push(path.as_ref().to_path_buf());
        self
    }

    /// Registers raw TrueType/OpenType bytes; invalid data fails `build`.
    pub fn with_font_data(mut self, data: Vec<u8>) -> Self {
        self.font_data.push(data);
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Resolves embedded images relative to `dir`.
    pub fn with_resource_dir(self, dir: impl AsRef<Path>) -> Self {
        self.with_resources(Arc::new(FilesystemResourceProvider::new(dir)))
    }

    /// Blocks absolute http(s) resources from any origin other than `origin`.
    pub fn with_resource_origin(mut self, origin: impl Into<String>) -> Self {
        self.resource_origin = Some(origin.into());
        self
    }

    pub fn with_capture_options(mut self, options: CaptureOptions) -> Self {
        self.capture = options;
        self
    }

    pub fn with_capture_scale(mut self, scale: f32) -> Self {
        self.capture.scale = scale;
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_pagination(mut self, mode: PaginationMode) -> Self {
        self.pagination = mode;
        self
    }

    pub fn with_sanitize_mode(mut self, mode: SanitizeMode) -> Self {
        self.sanitize_mode = mode;
        self
    }

    pub fn with_fallback_color(mut self, color: Color) -> Self {
        self.fallback_color = color;
        self
    }

    pub fn with_capture_target(mut self, id: impl Into<String>) -> Self {
        self.capture_target = id.into();
        self
    }

    pub fn with_preview_theme(mut self, theme: PreviewTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_preview_width(mut self, width: f32) -> Self {
        self.preview_width = Some(width);
        self
    }

    /// Posts to `{base_url}/api/generate-srs`; the URL is validated by `build`.
    pub fn with_backend_url(mut self, base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        self.backend = BackendSource::Http {
            base_url: base_url.into(),
            timeout,
        };
        self
    }

    pub fn with_backend(mut self, client: Arc<dyn BackendRenderClient>) -> Self {
        self.backend = BackendSource::Client(client);
        self
    }

    pub fn build(self) -> Result<ExportOrchestrator, ExportError> {
        self.capture.validate()?;

        let mut fonts = FontBook::empty().with_system_fonts(self.system_fonts);
        for dir in &self.font_dirs {
            fonts = fonts.with_font_dir(dir);
        }
        for data in self.font_data {
            fonts.add_font_data(data)?;
        }
        if let Some(family) = self.font_family {
            fonts = fonts.with_family(family);
        }
        if fonts.is_empty() {
            log::warn!("No fonts loaded; text will be left out of local exports");
        }
        let fonts = Arc::new(fonts);

        let mut rasterizer = Rasterizer::new(Arc::clone(&fonts));
        if let Some(resources) = self.resources {
            let resources: Arc<dyn ResourceProvider> = match self.resource_origin {
                Some(origin) => Arc::new(SameOriginProvider::new(resources, origin)),
                None => resources,
            };
            rasterizer = rasterizer.with_resources(resources);
        }

        let mut preview = PreviewRenderer::new(Arc::clone(&fonts)).with_theme(self.theme);
        if let Some(width) = self.preview_width {
            preview = preview.with_width(width);
        }

        let backend: Option<Arc<dyn BackendRenderClient>> = match self.backend {
            BackendSource::Unconfigured => None,
            BackendSource::Http { base_url, timeout } => Some(Arc::new(HttpRenderClient::new(&base_url, timeout)?)),
            BackendSource::Client(client) => Some(client),
        };

        Ok(ExportOrchestrator {
            preview,
            sanitizer: ColorSanitizer::new(self.sanitize_mode, self.fallback_color),
            rasterizer,
            capture: self.capture,
            layout: PageLayoutEngine::new(self.page_size, self.margins, self.pagination),
            capture_target: NodeId::new(self.capture_target),
            backend,
        })
    }
}
