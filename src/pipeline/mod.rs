//! Export pipeline orchestration.
//!
//! - [`Session`]: the single active document and its derived stages
//! - [`ExportOrchestratorBuilder`]: fluent configuration of both export paths
//! - [`ExportOrchestrator`]: runs the local or remote path over a session
//!
//! # Example
//!
//! ```ignore
//! use srsforge::{ExportOrchestratorBuilder, RawInput, Session};
//! use srsforge::CancellationToken;
//!
//! let orchestrator = ExportOrchestratorBuilder::new().with_system_fonts(true).build()?;
//! let mut session = Session::new(RawInput::new("Demo", "A demo project", vec![])?);
//! session.generate();
//! orchestrator.preview(&mut session)?;
//! let artifact = orchestrator.export_local(&mut session, &CancellationToken::new()).await?;
//! artifact.save_into(".")?;
//! ```

mod builder;
pub mod config;
mod orchestrator;
mod session;

pub use builder::ExportOrchestratorBuilder;
pub use config::ExportPath;
pub use orchestrator::ExportOrchestrator;
pub use session::Session;
