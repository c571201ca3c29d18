//! Filesystem-based resource provider.
//!
//! URIs are resolved relative to a base directory. Resolved paths must stay
//! within that directory; anything that would escape it is reported as not found.

use srsforge_traits::{ResourceError, ResourceProvider, SharedResourceData};
use srsforge_types::ResourceUri;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Strips an optional `file:` scheme and rejects every other scheme.
    fn local_part(uri: &ResourceUri) -> Option<&str> {
        let raw = uri.as_str();
        if let Some(rest) = raw.strip_prefix("file://").or_else(|| raw.strip_prefix("file:")) {
            return Some(rest);
        }
        match raw.split_once(':') {
            // A colon before any slash means some other scheme (http:, data:, ...).
            Some((scheme, _)) if !scheme.contains('/') => None,
            _ => Some(raw),
        }
    }

    /// Returns `None` if the URI is not local or would escape the base directory.
    fn resolve_path_safe(&self, uri: &ResourceUri) -> Option<PathBuf> {
        let local = Self::local_part(uri)?;
        if Path::new(local).is_absolute() {
            return None;
        }
        if Path::new(local)
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return None;
        }

        let full_path = self.base_path.join(local);
        if let (Ok(canonical), Some(base)) = (full_path.canonicalize(), &self.canonical_base) {
            // Symlinks may still point outside the base.
            return canonical.starts_with(base).then_some(canonical);
        }
        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, uri: &ResourceUri) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve_path_safe(uri)
            .ok_or_else(|| ResourceError::NotFound(uri.clone()))?;

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(uri.clone())
            } else {
                ResourceError::LoadFailed {
                    uri: uri.clone(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, uri: &ResourceUri) -> bool {
        self.resolve_path_safe(uri).is_some_and(|p| p.is_file())
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
