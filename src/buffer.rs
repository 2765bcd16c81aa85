//! Owned GPU buffer objects.
//!
//! A [vertex buffer object (VBO)](https://en.wikipedia.org/wiki/Vertex_buffer_object)
//! is raw per-vertex bytes handed to the graphics card; an element buffer is
//! a list of indices into one, so shared vertices only get uploaded once.
//! Both acquire their handle on construction and release it in `Drop`.

use std::rc::Rc;

use gl::types::{GLsizei, GLuint};

use crate::driver::Driver;
use crate::error::Error;

/// One GL buffer handle holding raw vertex attribute bytes, uploaded once
/// as static data.
pub struct VertexBuffer {
    driver: Rc<dyn Driver>,
    id: GLuint,
}

impl VertexBuffer {
    /// Acquire a buffer handle and upload `data`. Use `bytemuck::cast_slice`
    /// to get the byte view of a typed vertex slice.
    pub fn new(driver: Rc<dyn Driver>, data: &[u8]) -> Result<Self, Error> {
        let id = driver.create_buffer();
        if id == 0 {
            return Err(Error::ResourceCreation("buffer"));
        }
        driver.bind_buffer(gl::ARRAY_BUFFER, id);
        driver.buffer_data(gl::ARRAY_BUFFER, data, gl::STATIC_DRAW);
        Ok(Self { driver, id })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        self.driver.bind_buffer(gl::ARRAY_BUFFER, self.id);
    }

    pub fn unbind(&self) {
        self.driver.bind_buffer(gl::ARRAY_BUFFER, 0);
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        self.driver.delete_buffer(self.id);
    }
}

/// One GL buffer handle holding `u32` indices, bound to the element binding
/// point. Remembers how many indices it holds so the draw call knows how
/// many to consume.
pub struct IndexBuffer {
    driver: Rc<dyn Driver>,
    id: GLuint,
    count: GLsizei,
}

impl IndexBuffer {
    pub fn new(driver: Rc<dyn Driver>, indices: &[u32]) -> Result<Self, Error> {
        let id = driver.create_buffer();
        if id == 0 {
            return Err(Error::ResourceCreation("buffer"));
        }
        driver.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, id);
        driver.buffer_data(
            gl::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
            gl::STATIC_DRAW,
        );
        Ok(Self {
            driver,
            id,
            count: indices.len() as GLsizei,
        })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn count(&self) -> GLsizei {
        self.count
    }

    pub fn bind(&self) {
        self.driver.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, self.id);
    }

    pub fn unbind(&self) {
        self.driver.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, 0);
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        self.driver.delete_buffer(self.id);
    }
}
