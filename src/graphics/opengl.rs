//! The OpenGL implementation of [`ShaderDriver`].
//!
//! Every call in here is a thin, unsafe call into the `gl` crate's function pointers. What makes
//! them safe to wrap is the single precondition checked when a [`GlDriver`] is created: the
//! function pointers are loaded and a context is current on this thread. The driver is neither
//! `Send` nor `Sync`, so it can't wander off to a thread where that stops being true.
//!
//! For background on the shader and program objects wrapped here, see
//! [the OpenGL wiki](https://www.khronos.org/opengl/wiki/Shader_Compilation).

use std::marker::PhantomData;

use gl;
use gl::types::*;

use shading::{RawId, ShaderDriver, StageKind};

use super::utils::{program_info_log, shader_info_log};

pub enum GlShaderType {
    Vertex = gl::VERTEX_SHADER as isize,
    Fragment = gl::FRAGMENT_SHADER as isize,
    Geometry = gl::GEOMETRY_SHADER as isize,
    Compute = gl::COMPUTE_SHADER as isize,
}

impl From<StageKind> for GlShaderType {
    fn from(kind: StageKind) -> Self {
        match kind {
            StageKind::Vertex => GlShaderType::Vertex,
            StageKind::Fragment => GlShaderType::Fragment,
            StageKind::Geometry => GlShaderType::Geometry,
            StageKind::Compute => GlShaderType::Compute,
        }
    }
}

/// Drives the OpenGL context current on this thread.
#[derive(Debug, Clone)]
pub struct GlDriver {
    // raw pointers are neither Send nor Sync
    _context: PhantomData<*const ()>,
}

impl GlDriver {
    /// # Safety
    ///
    /// The `gl` function pointers must have been loaded, and the context they belong to must be
    /// current on the calling thread for as long as this driver (or a clone of it) is in use.
    pub unsafe fn current() -> Self {
        Self { _context: PhantomData }
    }
}

fn get_shader_param(id: GLuint, param: GLenum) -> GLint {
    let mut value = 0;
    unsafe {
        gl::GetShaderiv(id, param, &mut value);
    }
    value
}

fn get_program_param(id: GLuint, param: GLenum) -> GLint {
    let mut value = 0;
    unsafe {
        gl::GetProgramiv(id, param, &mut value);
    }
    value
}

impl ShaderDriver for GlDriver {
    fn create_shader(&self, kind: StageKind) -> RawId {
        unsafe { gl::CreateShader(GlShaderType::from(kind) as GLenum) }
    }

    fn compile_shader(&self, shader: RawId, source: &str) {
        // Passing the length means the text needs no NUL terminator
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len().min(GLint::max_value() as usize) as GLint;
        unsafe {
            gl::ShaderSource(shader, 1, &ptr, &len);
            gl::CompileShader(shader);
        }
    }

    fn compile_status(&self, shader: RawId) -> bool {
        get_shader_param(shader, gl::COMPILE_STATUS) == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: RawId) -> String {
        shader_info_log(shader)
    }

    fn delete_shader(&self, shader: RawId) {
        unsafe {
            gl::DeleteShader(shader);
        }
    }

    fn create_program(&self) -> RawId {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: RawId, shader: RawId) {
        unsafe {
            gl::AttachShader(program, shader);
        }
    }

    fn detach_shader(&self, program: RawId, shader: RawId) {
        unsafe {
            gl::DetachShader(program, shader);
        }
    }

    fn link_program(&self, program: RawId) {
        unsafe {
            gl::LinkProgram(program);
        }
    }

    fn link_status(&self, program: RawId) -> bool {
        get_program_param(program, gl::LINK_STATUS) == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: RawId) -> String {
        program_info_log(program)
    }

    fn use_program(&self, program: RawId) {
        unsafe {
            gl::UseProgram(program);
        }
    }

    fn delete_program(&self, program: RawId) {
        unsafe {
            gl::DeleteProgram(program);
        }
    }
}
