//! Newtype wrappers for node identifiers and resource URIs.
//!
//! Keeps capture-target ids and embedded resource locations from being mixed up
//! with arbitrary strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// The id attribute of a node in a rendered visual tree (e.g. the capture target).
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Arc<str>);

impl NodeId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A URI for an embedded resource (images referenced by the visual tree).
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceUri(Arc<str>);

impl ResourceUri {
    pub fn new(uri: impl Into<Arc<str>>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the origin (`scheme://host[:port]`) for absolute http(s) URIs.
    pub fn origin(&self) -> Option<&str> {
        let rest_start = self.0.find("://")? + 3;
        let scheme = &self.0[..rest_start - 3];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return None;
        }
        let end = self.0[rest_start..]
            .find('/')
            .map(|i| rest_start + i)
            .unwrap_or(self.0.len());
        Some(&self.0[..end])
    }
}

impl From<String> for ResourceUri {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for ResourceUri {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for ResourceUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_creation() {
        let id1 = NodeId::new("srs-preview");
        let id2 = NodeId::from("srs-preview");
        let id3 = NodeId::from(String::from("srs-preview"));

        assert_eq!(id1, id2);
        assert_eq!(id2, id3);
        assert_eq!(id1.as_str(), "srs-preview");
    }

    #[test]
    fn test_resource_origin() {
        let remote = ResourceUri::new("https://cdn.example.com:8443/logo.png");
        assert_eq!(remote.origin(), Some("https://cdn.example.com:8443"));

        let bare = ResourceUri::new("http://example.com");
        assert_eq!(bare.origin(), Some("http://example.com"));

        assert_eq!(ResourceUri::new("images/logo.png").origin(), None);
        assert_eq!(ResourceUri::new("data://x").origin(), None);
    }
}
