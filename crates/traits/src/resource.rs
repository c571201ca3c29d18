//! ResourceProvider trait for loading resources embedded in a visual tree.
//!
//! The rasterizer never touches the filesystem or network directly; images are
//! fetched through a provider so that capture stays testable and so that a
//! same-origin rule can be layered on top of any source.

use srsforge_types::ResourceUri;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for resource loading operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(ResourceUri),

    #[error("Cross-origin resource blocked: {uri} (allowed origin: {allowed})")]
    Blocked { uri: ResourceUri, allowed: String },

    #[error("Failed to load resource '{uri}': {message}")]
    LoadFailed { uri: ResourceUri, message: String },

    #[error("Invalid resource format for '{uri}': {message}")]
    InvalidFormat { uri: ResourceUri, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// A source of embedded resource bytes, keyed by URI.
///
/// Implementations are shared across capture tasks, so loading must be callable
/// from any thread. Loading may block; callers run it off the async executor.
pub trait ResourceProvider: Send + Sync + Debug {
    fn load(&self, uri: &ResourceUri) -> Result<SharedResourceData, ResourceError>;

    fn exists(&self, uri: &ResourceUri) -> bool;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for Arc<P> {
    fn load(&self, uri: &ResourceUri) -> Result<SharedResourceData, ResourceError> {
        (**self).load(uri)
    }

    fn exists(&self, uri: &ResourceUri) -> bool {
        (**self).exists(uri)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// An in-memory resource provider.
///
/// Resources must be registered before capture. An empty store is the default
/// provider, under which every embedded image is reported as skipped.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    resources: RwLock<HashMap<ResourceUri, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource to the in-memory store, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, uri: impl Into<ResourceUri>, data: Vec<u8>) -> Result<(), ResourceError> {
        let uri = uri.into();
        let mut resources = self.resources.write().map_err(|_| ResourceError::LoadFailed {
            uri: uri.clone(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources.insert(uri, Arc::new(data));
        Ok(())
    }

    /// Remove a resource from the store.
    ///
    /// Returns `None` if the lock is poisoned or the resource doesn't exist.
    pub fn remove(&self, uri: &ResourceUri) -> Option<SharedResourceData> {
        self.resources.write().ok()?.remove(uri)
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, uri: &ResourceUri) -> Result<SharedResourceData, ResourceError> {
        let resources = self.resources.read().map_err(|_| ResourceError::LoadFailed {
            uri: uri.clone(),
            message: "resource store lock poisoned".to_string(),
        })?;
        resources
            .get(uri)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(uri.clone()))
    }

    fn exists(&self, uri: &ResourceUri) -> bool {
        self.resources
            .read()
            .map(|r| r.contains_key(uri))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryResourceProvider"
    }
}

/// Wraps a provider and refuses absolute http(s) URIs from any other origin.
///
/// Relative URIs and non-http schemes pass through to the inner provider.
#[derive(Debug)]
pub struct SameOriginProvider<P> {
    inner: P,
    origin: String,
}

impl<P: ResourceProvider> SameOriginProvider<P> {
    pub fn new(inner: P, origin: impl Into<String>) -> Self {
        Self {
            inner,
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    fn check(&self, uri: &ResourceUri) -> Result<(), ResourceError> {
        match uri.origin() {
            Some(origin) if !origin.eq_ignore_ascii_case(&self.origin) => Err(ResourceError::Blocked {
                uri: uri.clone(),
                allowed: self.origin.clone(),
            }),
            _ => Ok(()),
        }
    }
}

impl<P: ResourceProvider> ResourceProvider for SameOriginProvider<P> {
    fn load(&self, uri: &ResourceUri) -> Result<SharedResourceData, ResourceError> {
        self.check(uri)?;
        self.inner.load(uri)
    }

    fn exists(&self, uri: &ResourceUri) -> bool {
        self.check(uri).is_ok() && self.inner.exists(uri)
    }

    fn name(&self) -> &'static str {
        "SameOriginProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_provider_add_and_load() {
        let provider = InMemoryResourceProvider::new();
        provider.add("logo.png", b"PNGDATA".to_vec()).unwrap();

        let data = provider.load(&ResourceUri::new("logo.png")).unwrap();
        assert_eq!(&*data, b"PNGDATA");
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_in_memory_provider_not_found() {
        let provider = InMemoryResourceProvider::new();
        let result = provider.load(&ResourceUri::new("missing.png"));
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
        assert!(provider.is_empty());
    }

    #[test]
    fn test_in_memory_provider_overwrite_and_remove() {
        let provider = InMemoryResourceProvider::new();
        provider.add("a.png", b"original".to_vec()).unwrap();
        provider.add("a.png", b"updated".to_vec()).unwrap();
        let uri = ResourceUri::new("a.png");
        assert_eq!(&*provider.load(&uri).unwrap(), b"updated");

        assert!(provider.remove(&uri).is_some());
        assert!(!provider.exists(&uri));
    }

    #[test]
    fn test_same_origin_blocks_foreign_hosts() {
        let inner = InMemoryResourceProvider::new();
        inner.add("https://app.example.com/logo.png", vec![1]).unwrap();
        inner.add("https://cdn.other.net/logo.png", vec![2]).unwrap();
        inner.add("local.png", vec![3]).unwrap();
        let provider = SameOriginProvider::new(inner, "https://app.example.com/");

        assert!(provider.load(&ResourceUri::new("https://app.example.com/logo.png")).is_ok());
        assert!(provider.load(&ResourceUri::new("local.png")).is_ok());

        let foreign = ResourceUri::new("https://cdn.other.net/logo.png");
        assert!(matches!(provider.load(&foreign), Err(ResourceError::Blocked { .. })));
        assert!(!provider.exists(&foreign));
    }

    #[test]
    fn test_shared_provider_delegates() {
        let inner = InMemoryResourceProvider::new();
        inner.add("x", vec![9]).unwrap();
        let shared: Arc<dyn ResourceProvider> = Arc::new(inner);
        assert!(shared.exists(&ResourceUri::new("x")));
        assert_eq!(shared.name(), "InMemoryResourceProvider");
    }

    #[test]
    fn test_resource_error_display() {
        let err = ResourceError::Blocked {
            uri: ResourceUri::new("https://cdn.other.net/a.png"),
            allowed: "https://app.example.com".to_string(),
        };
        assert!(err.to_string().contains("cdn.other.net"));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let resource_err: ResourceError = io_err.into();
        assert!(matches!(resource_err, ResourceError::Io(_)));
    }
}
