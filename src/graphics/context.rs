use std::env;
use std::ffi::OsString;
use std::panic;

use glutin::dpi::PhysicalSize;
use glutin::event_loop::EventLoop;
use glutin::{Api, Context, ContextBuilder, ContextError, CreationError, GlProfile, GlRequest, PossiblyCurrent};
use log::debug;

use super::opengl::GlDriver;
use super::utils::gl_string;

#[derive(thiserror::Error, Debug)]
pub enum ContextInitError {
    #[error("could not create an OpenGL context: {0}")]
    Creation(#[from] CreationError),
    #[error("could not make the OpenGL context current: {0}")]
    MakeCurrent(#[from] ContextError),
    #[error("OpenGL functions could not be loaded from the context")]
    Loading,
    #[error("no display server is available to create an OpenGL context on (set DISPLAY or WAYLAND_DISPLAY)")]
    NoDisplay,
}

/// Whether a windowing backend can be reached. On Linux and the BSDs that needs an X11 or Wayland
/// display, found through the environment (`lookup` is `env::var_os`).
fn display_available<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<OsString>,
{
    if cfg!(all(unix, not(target_os = "macos"), not(target_os = "ios"), not(target_os = "android"))) {
        ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .any(|&var| lookup(var).map_or(false, |value| !value.is_empty()))
    } else {
        true
    }
}

/// An invisible core-profile context, current on the thread that created it.
///
/// Nothing is ever drawn to it. It exists so the driver has somewhere to compile and link.
pub struct HeadlessContext {
    context: Context<PossiblyCurrent>,
    // the context is dropped before the event loop it was built on
    _events: EventLoop<()>,
}

impl HeadlessContext {
    pub fn create(version: (u8, u8)) -> Result<Self, ContextInitError> {
        if !display_available(|var| env::var_os(var)) {
            return Err(ContextInitError::NoDisplay);
        }
        // winit panics instead of failing when no backend will open, e.g. a stale DISPLAY
        let events = panic::catch_unwind(EventLoop::<()>::new).map_err(|_| ContextInitError::NoDisplay)?;
        let context = ContextBuilder::new()
            .with_gl(GlRequest::Specific(Api::OpenGl, version))
            .with_gl_profile(GlProfile::Core)
            .build_headless(&events, PhysicalSize::new(1, 1))?;

        let context = unsafe { context.make_current() }.map_err(|(_, e)| e)?;

        gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);
        if !gl::CreateShader::is_loaded() || !gl::CreateProgram::is_loaded() {
            return Err(ContextInitError::Loading);
        }

        debug!("OpenGL {}.{} core context is current", version.0, version.1);

        Ok(Self { context, _events: events })
    }

    /// A driver for this context.
    pub fn driver(&self) -> GlDriver {
        debug_assert!(self.context.is_current());
        // Function pointers were loaded in `create` and the context is current on this thread,
        // which owns it (`HeadlessContext` is not Send).
        unsafe { GlDriver::current() }
    }

    /// Vendor, renderer and version strings reported by the driver.
    pub fn description(&self) -> String {
        format!(
            "{} {} (OpenGL {}, GLSL {})",
            gl_string(gl::VENDOR),
            gl_string(gl::RENDERER),
            gl_string(gl::VERSION),
            gl_string(gl::SHADING_LANGUAGE_VERSION)
        )
    }
}
