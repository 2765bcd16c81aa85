//! Issues the actual draw calls, given the pieces everything else built.

use std::rc::Rc;

use crate::buffer::IndexBuffer;
use crate::driver::Driver;
use crate::shader::Shader;
use crate::vertex_array::VertexArray;

pub struct Renderer {
    driver: Rc<dyn Driver>,
}

impl Renderer {
    pub fn new(driver: Rc<dyn Driver>) -> Self {
        Self { driver }
    }

    pub fn clear(&self) {
        self.driver.clear(gl::COLOR_BUFFER_BIT);
    }

    /// Bind the program, the vertex array and the index buffer, then draw
    /// the whole index buffer as triangles.
    pub fn draw(&self, vertex_array: &VertexArray, index_buffer: &IndexBuffer, shader: &Shader) {
        shader.bind();
        vertex_array.bind();
        index_buffer.bind();
        self.driver
            .draw_elements(gl::TRIANGLES, index_buffer.count(), gl::UNSIGNED_INT);
    }
}
