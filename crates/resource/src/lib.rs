//! Resource providers backed by platform storage.
//!
//! - [`FilesystemResourceProvider`]: loads relative and `file:` URIs from a base directory
//!
//! The in-memory provider lives in srsforge-traits and is re-exported here.

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use srsforge_traits::InMemoryResourceProvider;
