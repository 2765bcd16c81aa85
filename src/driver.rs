//! The seam between the wrapper objects and the actual OpenGL API.
//!
//! OpenGL is one big piece of global state, so rather than letting every
//! wrapper call `gl::*` directly, they all talk to a [`Driver`]. In a real
//! program that is [`GlDriver`]; in tests it's a recording stub (see
//! [`crate::testing`]) that counts creates and deletes and remembers every
//! attribute registration.

use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr::null_mut;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};

/// The subset of OpenGL the wrappers need, one method per GL verb.
///
/// Shader compilation and linking are exposed as composite operations
/// (source in, handle or info log out) because that's the granularity the
/// wrappers and the tests care about.
pub trait Driver {
    fn create_buffer(&self) -> GLuint;
    fn delete_buffer(&self, id: GLuint);
    fn bind_buffer(&self, target: GLenum, id: GLuint);
    fn buffer_data(&self, target: GLenum, data: &[u8], usage: GLenum);

    fn create_vertex_array(&self) -> GLuint;
    fn delete_vertex_array(&self, id: GLuint);
    fn bind_vertex_array(&self, id: GLuint);
    fn enable_vertex_attrib(&self, index: GLuint);
    fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        count: GLint,
        ty: GLenum,
        normalized: bool,
        stride: GLsizei,
        offset: usize,
    );

    fn compile_shader(&self, kind: GLenum, source: &str) -> Result<GLuint, String>;
    fn link_program(&self, shaders: &[GLuint]) -> Result<GLuint, String>;
    fn delete_shader(&self, id: GLuint);
    fn delete_program(&self, id: GLuint);
    fn use_program(&self, id: GLuint);
    fn uniform_location(&self, program: GLuint, name: &str) -> GLint;
    fn set_uniform_4f(&self, location: GLint, value: [f32; 4]);
    fn set_uniform_1i(&self, location: GLint, value: i32);

    fn clear(&self, mask: GLenum);
    fn draw_elements(&self, mode: GLenum, count: GLsizei, ty: GLenum);
}

/// The real thing. Forwards every call to the `gl` crate.
///
/// Must only be used after `gl::load_with` has run against a live context,
/// and only on the thread that context is current on.
pub struct GlDriver {
    check_errors: bool,
}

impl GlDriver {
    pub fn new() -> Self {
        Self {
            check_errors: cfg!(debug_assertions),
        }
    }

    /// Override the debug-build default for draining `glGetError`.
    pub fn with_error_checks(check_errors: bool) -> Self {
        Self { check_errors }
    }

    // GL errors are sticky: they sit in a queue until polled. Drain the
    // whole queue after each call so the log line names the call that
    // actually raised the error.
    fn drain_errors(&self, label: &str) {
        if !self.check_errors {
            return;
        }
        loop {
            let e = unsafe { gl::GetError() };
            if e == gl::NO_ERROR {
                break;
            }
            log::warn!("gl error 0x{:04x} after {}", e, label);
        }
    }
}

impl Default for GlDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for GlDriver {
    fn create_buffer(&self) -> GLuint {
        let mut id = 0;
        unsafe { gl::GenBuffers(1, &mut id) };
        self.drain_errors("GenBuffers");
        id
    }

    fn delete_buffer(&self, id: GLuint) {
        unsafe { gl::DeleteBuffers(1, &id) };
        self.drain_errors("DeleteBuffers");
    }

    fn bind_buffer(&self, target: GLenum, id: GLuint) {
        unsafe { gl::BindBuffer(target, id) };
        self.drain_errors("BindBuffer");
    }

    fn buffer_data(&self, target: GLenum, data: &[u8], usage: GLenum) {
        unsafe {
            gl::BufferData(
                target,
                data.len() as isize,
                data.as_ptr() as *const c_void,
                usage,
            );
        }
        self.drain_errors("BufferData");
    }

    fn create_vertex_array(&self) -> GLuint {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        self.drain_errors("GenVertexArrays");
        id
    }

    fn delete_vertex_array(&self, id: GLuint) {
        unsafe { gl::DeleteVertexArrays(1, &id) };
        self.drain_errors("DeleteVertexArrays");
    }

    fn bind_vertex_array(&self, id: GLuint) {
        unsafe { gl::BindVertexArray(id) };
        self.drain_errors("BindVertexArray");
    }

    fn enable_vertex_attrib(&self, index: GLuint) {
        unsafe { gl::EnableVertexAttribArray(index) };
        self.drain_errors("EnableVertexAttribArray");
    }

    fn vertex_attrib_pointer(
        &self,
        index: GLuint,
        count: GLint,
        ty: GLenum,
        normalized: bool,
        stride: GLsizei,
        offset: usize,
    ) {
        let normalized = if normalized { gl::TRUE } else { gl::FALSE };
        unsafe {
            gl::VertexAttribPointer(index, count, ty, normalized, stride, offset as *const c_void);
        }
        self.drain_errors("VertexAttribPointer");
    }

    fn compile_shader(&self, kind: GLenum, source: &str) -> Result<GLuint, String> {
        let source = CString::new(source)
            .map_err(|_| String::from("shader source contains a nul byte"))?;

        unsafe {
            let id = gl::CreateShader(kind);
            gl::ShaderSource(id, 1, &source.as_ptr(), std::ptr::null());
            gl::CompileShader(id);

            let mut success = 1;
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
            if success == 0 {
                let mut len = 0;
                gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
                let info_log = blank_cstring(len as usize);
                gl::GetShaderInfoLog(id, len, null_mut(), info_log.as_ptr() as *mut GLchar);
                gl::DeleteShader(id);
                return Err(info_log.to_string_lossy().into_owned());
            }

            Ok(id)
        }
    }

    fn link_program(&self, shaders: &[GLuint]) -> Result<GLuint, String> {
        unsafe {
            let id = gl::CreateProgram();
            for &shader in shaders {
                gl::AttachShader(id, shader);
            }
            gl::LinkProgram(id);

            let mut success = 1;
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);
            if success == 0 {
                let mut len = 0;
                gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
                let info_log = blank_cstring(len as usize);
                gl::GetProgramInfoLog(id, len, null_mut(), info_log.as_ptr() as *mut GLchar);
                gl::DeleteProgram(id);
                return Err(info_log.to_string_lossy().into_owned());
            }

            for &shader in shaders {
                gl::DetachShader(id, shader);
            }

            Ok(id)
        }
    }

    fn delete_shader(&self, id: GLuint) {
        unsafe { gl::DeleteShader(id) };
    }

    fn delete_program(&self, id: GLuint) {
        unsafe { gl::DeleteProgram(id) };
    }

    fn use_program(&self, id: GLuint) {
        unsafe { gl::UseProgram(id) };
        self.drain_errors("UseProgram");
    }

    fn uniform_location(&self, program: GLuint, name: &str) -> GLint {
        let name = match CString::new(name) {
            Ok(name) => name,
            Err(_) => return -1,
        };
        let location = unsafe { gl::GetUniformLocation(program, name.as_ptr()) };
        self.drain_errors("GetUniformLocation");
        location
    }

    fn set_uniform_4f(&self, location: GLint, value: [f32; 4]) {
        unsafe { gl::Uniform4f(location, value[0], value[1], value[2], value[3]) };
        self.drain_errors("Uniform4f");
    }

    fn set_uniform_1i(&self, location: GLint, value: i32) {
        unsafe { gl::Uniform1i(location, value) };
        self.drain_errors("Uniform1i");
    }

    fn clear(&self, mask: GLenum) {
        unsafe { gl::Clear(mask) };
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei, ty: GLenum) {
        unsafe { gl::DrawElements(mode, count, ty, std::ptr::null()) };
        self.drain_errors("DrawElements");
    }
}

// GetShaderInfoLog wants a pre-sized, writable buffer.
fn blank_cstring(len: usize) -> CString {
    let buf = vec![b' '; len];
    unsafe { CString::from_vec_unchecked(buf) }
}
