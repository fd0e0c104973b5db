//! The seam between [`ShaderProgram`](crate::program::ShaderProgram) and the graphics driver.

use crate::stage::StageKind;

/// A driver object name. Zero is the null object, as in OpenGL.
pub type RawId = u32;

/// The driver operations needed to compile, link, activate and delete programs.
///
/// An implementation stands for the graphics context that is current on the calling thread, so
/// every method takes `&self` and implementations are expected to be cheap to clone. Nothing here
/// validates that a context actually is current; that is the host application's job.
pub trait ShaderDriver: Clone {
    /// Allocates a shader object for `kind`. Returns 0 if the driver could not allocate one.
    fn create_shader(&self, kind: StageKind) -> RawId;

    /// Replaces the source of `shader` with `source` and compiles it.
    fn compile_shader(&self, shader: RawId, source: &str);

    fn compile_status(&self, shader: RawId) -> bool;

    /// The compiler's log for `shader`, possibly empty.
    fn shader_info_log(&self, shader: RawId) -> String;

    fn delete_shader(&self, shader: RawId);

    /// Allocates a program object. Returns 0 if the driver could not allocate one.
    fn create_program(&self) -> RawId;

    fn attach_shader(&self, program: RawId, shader: RawId);

    fn detach_shader(&self, program: RawId, shader: RawId);

    fn link_program(&self, program: RawId);

    fn link_status(&self, program: RawId) -> bool;

    /// The linker's log for `program`, possibly empty.
    fn program_info_log(&self, program: RawId) -> String;

    /// Makes `program` the active program for subsequent draws.
    fn use_program(&self, program: RawId);

    fn delete_program(&self, program: RawId);
}
