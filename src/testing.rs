//! A recording stand-in for the real driver.
//!
//! [`RecordingDriver`] implements [`Driver`] without ever touching OpenGL:
//! it hands out handles from a counter (never reusing one), tracks which
//! handles are live, and keeps a record of binds, uploads, attribute
//! registrations, draws and uniform traffic. Tests assert against those
//! records instead of needing a GPU context.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use gl::types::{GLenum, GLint, GLsizei, GLuint};

use crate::driver::Driver;

/// One `vertex_attrib_pointer` registration, exactly as the wrapper issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttribPointerCall {
    pub index: GLuint,
    pub count: GLint,
    pub ty: GLenum,
    pub normalized: bool,
    pub stride: GLsizei,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub mode: GLenum,
    pub count: GLsizei,
    pub ty: GLenum,
}

#[derive(Default)]
struct State {
    next_handle: GLuint,
    live_buffers: HashSet<GLuint>,
    live_arrays: HashSet<GLuint>,
    live_shaders: HashSet<GLuint>,
    live_programs: HashSet<GLuint>,
    bound_buffers: HashMap<GLenum, GLuint>,
    bound_vertex_array: GLuint,
    active_program: GLuint,
    uploads: Vec<(GLenum, usize)>,
    enabled_attribs: Vec<GLuint>,
    attrib_pointers: Vec<AttribPointerCall>,
    draw_calls: Vec<DrawCall>,
    clear_count: usize,
    uniform_lookups: Vec<String>,
    uniform_locations: HashMap<String, GLint>,
    missing_uniforms: HashSet<String>,
    uniform_4f_calls: Vec<(GLint, [f32; 4])>,
    uniform_1i_calls: Vec<(GLint, i32)>,
    fail_compiles: bool,
}

#[derive(Default)]
pub struct RecordingDriver {
    state: RefCell<State>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles currently alive across all object kinds.
    pub fn live_handles(&self) -> usize {
        let s = self.state.borrow();
        s.live_buffers.len() + s.live_arrays.len() + s.live_shaders.len() + s.live_programs.len()
    }

    pub fn bound_vertex_array(&self) -> GLuint {
        self.state.borrow().bound_vertex_array
    }

    pub fn bound_buffer(&self, target: GLenum) -> GLuint {
        *self.state.borrow().bound_buffers.get(&target).unwrap_or(&0)
    }

    pub fn active_program(&self) -> GLuint {
        self.state.borrow().active_program
    }

    /// `(target, byte length)` of every upload, in order.
    pub fn uploads(&self) -> Vec<(GLenum, usize)> {
        self.state.borrow().uploads.clone()
    }

    pub fn enabled_attribs(&self) -> Vec<GLuint> {
        self.state.borrow().enabled_attribs.clone()
    }

    pub fn attrib_pointers(&self) -> Vec<AttribPointerCall> {
        self.state.borrow().attrib_pointers.clone()
    }

    pub fn draw_calls(&self) -> Vec<DrawCall> {
        self.state.borrow().draw_calls.clone()
    }

    pub fn clear_count(&self) -> usize {
        self.state.borrow().clear_count
    }

    /// How many times a uniform's location was queried from the driver.
    pub fn uniform_lookup_count(&self, name: &str) -> usize {
        self.state
            .borrow()
            .uniform_lookups
            .iter()
            .filter(|n| *n == name)
            .count()
    }

    pub fn uniform_4f_calls(&self) -> Vec<(GLint, [f32; 4])> {
        self.state.borrow().uniform_4f_calls.clone()
    }

    pub fn uniform_1i_calls(&self) -> Vec<(GLint, i32)> {
        self.state.borrow().uniform_1i_calls.clone()
    }

    /// Make `uniform_location` answer -1 for `name` from now on.
    pub fn set_missing_uniform(&self, name: &str) {
        self.state.borrow_mut().missing_uniforms.insert(name.to_owned());
    }

    /// Make every subsequent `compile_shader` fail with a canned log.
    pub fn set_fail_compiles(&self, fail: bool) {
        self.state.borrow_mut().fail_compiles = fail;
    }

    // Handles start at 1 and are never reused, matching what a real driver
    // is allowed to do at its meanest.
    fn issue(state: &mut State) -> GLuint {
        state.next_handle += 1;
        state.next_handle
    }
}

impl Driver for RecordingDriver {
    fn create_buffer(&self) -> GLuint {
        let mut s = self.state.borrow_mut();
        let id = Self::issue(&mut s);
        s.live_buffers.insert(id);
        id
    }

    fn delete_buffer(&self, id: GLuint) {
        self.state.borrow_mut().live_buffers.remove(&id);
    }

    fn bind_buffer(&self, target: GLenum, id: GLuint) {
        self.state.borrow_mut().bound_buffers.insert(target, id);
    }

    fn buffer_data(&self, target: GLenum, data: &[u8], _usage: GLenum) {
        self.state.borrow_mut().uploads.push((target, data.len()));
    }

    fn create_vertex_array(&self) -> GLuint {
        let mut s = self.state.borrow_mut();
        let id = Self::issue(&mut s);
        s.live_arrays.insert(id);
        id
    }

    fn delete_vertex_array(&self, id: GLuint) {
        self.state.borrow_mut().live_arrays.remove(&id);
    }

    fn bind_vertex_array(&self, id: GLuint) {
        self.state.borrow_mut().bound_vertex_array = id;
    }

    fn enable_vertex_attrib(&self, index: GLuint) {
        self.state.borrow_mut().enabled_attribs.push(index);
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
        self.state.borrow_mut().attrib_pointers.push(AttribPointerCall {
            index,
            count,
            ty,
            normalized,
            stride,
            offset,
        });
    }

    fn compile_shader(&self, _kind: GLenum, _source: &str) -> Result<GLuint, String> {
        let mut s = self.state.borrow_mut();
        if s.fail_compiles {
            return Err(String::from("0:1: forced compile failure"));
        }
        let id = Self::issue(&mut s);
        s.live_shaders.insert(id);
        Ok(id)
    }

    fn link_program(&self, _shaders: &[GLuint]) -> Result<GLuint, String> {
        let mut s = self.state.borrow_mut();
        let id = Self::issue(&mut s);
        s.live_programs.insert(id);
        Ok(id)
    }

    fn delete_shader(&self, id: GLuint) {
        self.state.borrow_mut().live_shaders.remove(&id);
    }

    fn delete_program(&self, id: GLuint) {
        self.state.borrow_mut().live_programs.remove(&id);
    }

    fn use_program(&self, id: GLuint) {
        self.state.borrow_mut().active_program = id;
    }

    fn uniform_location(&self, _program: GLuint, name: &str) -> GLint {
        let mut s = self.state.borrow_mut();
        s.uniform_lookups.push(name.to_owned());
        if s.missing_uniforms.contains(name) {
            return -1;
        }
        let next = s.uniform_locations.len() as GLint;
        *s.uniform_locations.entry(name.to_owned()).or_insert(next)
    }

    fn set_uniform_4f(&self, location: GLint, value: [f32; 4]) {
        self.state.borrow_mut().uniform_4f_calls.push((location, value));
    }

    fn set_uniform_1i(&self, location: GLint, value: i32) {
        self.state.borrow_mut().uniform_1i_calls.push((location, value));
    }

    fn clear(&self, _mask: GLenum) {
        self.state.borrow_mut().clear_count += 1;
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei, ty: GLenum) {
        self.state.borrow_mut().draw_calls.push(DrawCall { mode, count, ty });
    }
}
