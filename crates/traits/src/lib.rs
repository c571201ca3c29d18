pub mod cancel;
pub mod resource;

pub use cancel::{CancelErr, OrCancelExt};
pub use resource::{
    InMemoryResourceProvider, ResourceError, ResourceProvider, SameOriginProvider, SharedResourceData,
};
pub use tokio_util::sync::CancellationToken;
