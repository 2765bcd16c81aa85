//! The vertex array object ties a buffer's bytes to attribute slots.

use std::rc::Rc;

use gl::types::GLuint;

use crate::buffer::VertexBuffer;
use crate::driver::Driver;
use crate::error::Error;
use crate::layout::VertexBufferLayout;

/// One GL vertex-array handle. Does not own the buffers attached to it; the
/// caller keeps those alive for as long as this array is drawn from.
pub struct VertexArray {
    driver: Rc<dyn Driver>,
    id: GLuint,
}

impl VertexArray {
    pub fn new(driver: Rc<dyn Driver>) -> Result<Self, Error> {
        let id = driver.create_vertex_array();
        if id == 0 {
            return Err(Error::ResourceCreation("vertex array"));
        }
        Ok(Self { driver, id })
    }

    /// Register `buffer`'s contents with this array according to `layout`.
    ///
    /// Slot i gets the i-th layout element. Every slot is registered with
    /// the layout's *total* stride, and a byte offset equal to the sizes of
    /// all elements before it; the offset has to accumulate in declaration
    /// order. The driver can't tell a wrong offset/stride pair from a right
    /// one, it just reads garbage.
    pub fn add_buffer(&self, buffer: &VertexBuffer, layout: &VertexBufferLayout) {
        self.bind();
        buffer.bind();

        let mut offset = 0;
        for (i, element) in layout.elements().iter().enumerate() {
            let slot = i as GLuint;
            self.driver.enable_vertex_attrib(slot);
            self.driver.vertex_attrib_pointer(
                slot,
                element.count,
                element.ty.gl_enum(),
                element.normalized,
                layout.stride(),
                offset,
            );
            offset += element.byte_size();
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        self.driver.bind_vertex_array(self.id);
    }

    pub fn unbind(&self) {
        self.driver.bind_vertex_array(0);
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.driver.delete_vertex_array(self.id);
    }
}
