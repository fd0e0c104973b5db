//! Building GPU programs out of shader stages.
//!
//! The crate knows nothing about a particular graphics API. Every driver call goes through the
//! [`ShaderDriver`](driver::ShaderDriver) trait, which the host application implements for the
//! context it owns (the `glprogram` binary implements it on top of the `gl` crate). A
//! [`ShaderProgram`](program::ShaderProgram) compiles each stage, links them, hands back either a
//! usable [`ProgramHandle`](program::ProgramHandle) or a [`BuildError`](error::BuildError)
//! carrying the compiler's own words, and releases everything it allocated along the way.
//!
//! Nothing here prints diagnostics. What to do with a failed build is up to the caller.

pub mod driver;
pub mod error;
pub mod program;
pub mod source;
pub mod stage;

#[cfg(test)]
pub(crate) mod mock;

pub use driver::{RawId, ShaderDriver};
pub use error::{BuildError, StageFailure};
pub use program::{ProgramHandle, ProgramState, ShaderProgram};
pub use source::{load_or_empty, FileSource, MemorySource, SourceProvider};
pub use stage::{StageKind, StageSource};
