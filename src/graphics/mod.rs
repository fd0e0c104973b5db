//! A small set of wrappers around the OpenGL API.
//!
//! Only what is needed to compile and link shaders lives here: a headless context to run the
//! driver in, and the [`ShaderDriver`](shading::ShaderDriver) implementation that talks to it.

pub mod context;
pub mod opengl;
pub mod utils;

pub use context::{ContextInitError, HeadlessContext};
pub use opengl::GlDriver;
