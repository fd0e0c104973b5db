use std::ffi::CStr;
use std::os::raw::c_char;

use gl;
use gl::types::*;

/// Fetches the compiler log of a shader object.
pub fn shader_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }

    read_info_log(len, |capacity, written, buf| unsafe {
        gl::GetShaderInfoLog(id, capacity, written, buf);
    })
}

/// Fetches the linker log of a program object.
pub fn program_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }

    read_info_log(len, |capacity, written, buf| unsafe {
        gl::GetProgramInfoLog(id, capacity, written, buf);
    })
}

/// Allocates a `len`-byte buffer, lets `fetch` fill it the way `glGet*InfoLog` does, and keeps
/// only the bytes it reports as written (the driver's NUL terminator is not counted).
pub fn read_info_log<F>(len: GLint, fetch: F) -> String
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    if len <= 0 {
        return String::new();
    }

    let mut buf = whitespace_buffer(len as usize);
    let mut written: GLsizei = 0;
    fetch(len, &mut written, buf.as_mut_ptr() as *mut GLchar);

    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

pub fn whitespace_buffer(len: usize) -> Vec<u8> {
    vec![b' '; len]
}

/// Reads a `glGetString` value, e.g. `gl::VERSION`. Empty if the driver returns null.
pub fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return String::new();
    }

    unsafe { CStr::from_ptr(ptr as *const c_char) }
        .to_string_lossy()
        .into_owned()
}
