//! Project input and the SRS document it expands into.
//!
//! `expand` is a pure mapping from a [`RawInput`] to an [`ExpandedDocument`];
//! the only ambient input is the generation date stamped on the cover.

mod expanded;
mod expander;
mod raw;
pub mod templates;

pub use expanded::{Cover, Definition, ExpandedDocument, GeneralDescription, Introduction, SpecificRequirements};
pub use expander::{expand, expand_on};
pub use raw::{InputError, MAX_MEMBERS, RawInput};
