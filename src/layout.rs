//! CPU-side description of how the bytes in a vertex buffer map to
//! attribute slots. Nothing here touches the driver; a layout only becomes
//! GL state when [`crate::VertexArray::add_buffer`] walks it.

use gl::types::{GLenum, GLint, GLsizei};

/// The scalar types an attribute can be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Float,
    UnsignedInt,
    UnsignedByte,
}

impl AttributeType {
    /// Byte size of one component.
    pub fn size(self) -> usize {
        match self {
            AttributeType::Float => 4,
            AttributeType::UnsignedInt => 4,
            AttributeType::UnsignedByte => 1,
        }
    }

    pub fn gl_enum(self) -> GLenum {
        match self {
            AttributeType::Float => gl::FLOAT,
            AttributeType::UnsignedInt => gl::UNSIGNED_INT,
            AttributeType::UnsignedByte => gl::UNSIGNED_BYTE,
        }
    }

    /// Fixed normalization policy: byte components carry color data and get
    /// rescaled to [0, 1]; floats and uints are passed through raw.
    pub fn normalized_by_default(self) -> bool {
        match self {
            AttributeType::Float => false,
            AttributeType::UnsignedInt => false,
            AttributeType::UnsignedByte => true,
        }
    }
}

/// One attribute's slice of the vertex record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutElement {
    pub ty: AttributeType,
    pub count: GLint,
    pub normalized: bool,
}

impl LayoutElement {
    pub fn byte_size(&self) -> usize {
        self.count as usize * self.ty.size()
    }
}

/// Ordered list of attributes; an element's position is its slot index.
///
/// The stride only ever grows: every push widens the vertex record by the
/// new element's byte size. There is no way to remove an element.
#[derive(Debug, Clone, Default)]
pub struct VertexBufferLayout {
    elements: Vec<LayoutElement>,
    stride: GLsizei,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` components of `ty` as the next attribute slot,
    /// normalized per the [`AttributeType::normalized_by_default`] policy.
    ///
    /// `count` must be positive; a zero-component attribute has no meaning
    /// and a negative one would corrupt the stride.
    pub fn push(&mut self, ty: AttributeType, count: GLint) {
        assert!(count > 0, "attribute component count must be positive");
        let element = LayoutElement {
            ty,
            count,
            normalized: ty.normalized_by_default(),
        };
        self.stride += element.byte_size() as GLsizei;
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[LayoutElement] {
        &self.elements
    }

    /// Total byte size of one complete vertex record.
    pub fn stride(&self) -> GLsizei {
        self.stride
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_accumulates_in_push_order() {
        let mut layout = VertexBufferLayout::new();
        layout.push(AttributeType::Float, 2); // 8 bytes
        assert_eq!(layout.stride(), 8);
        layout.push(AttributeType::UnsignedInt, 1); // 4 bytes
        assert_eq!(layout.stride(), 12);
        layout.push(AttributeType::Float, 4); // 16 bytes
        assert_eq!(layout.stride(), 28);
    }

    #[test]
    fn stride_equals_sum_of_element_sizes() {
        let mut layout = VertexBufferLayout::new();
        layout.push(AttributeType::Float, 3);
        layout.push(AttributeType::UnsignedByte, 4);
        layout.push(AttributeType::Float, 2);
        layout.push(AttributeType::UnsignedInt, 2);

        let total: usize = layout.elements().iter().map(|e| e.byte_size()).sum();
        assert_eq!(total as GLsizei, layout.stride());
    }

    #[test]
    fn normalization_policy_is_per_type() {
        let mut layout = VertexBufferLayout::new();
        layout.push(AttributeType::Float, 2);
        layout.push(AttributeType::UnsignedByte, 4);
        layout.push(AttributeType::UnsignedInt, 1);

        let normalized: Vec<bool> = layout.elements().iter().map(|e| e.normalized).collect();
        assert_eq!(normalized, vec![false, true, false]);
    }

    #[test]
    #[should_panic(expected = "component count must be positive")]
    fn push_rejects_zero_component_count() {
        let mut layout = VertexBufferLayout::new();
        layout.push(AttributeType::Float, 0);
    }

    #[test]
    #[should_panic(expected = "component count must be positive")]
    fn push_rejects_negative_component_count() {
        let mut layout = VertexBufferLayout::new();
        layout.push(AttributeType::UnsignedInt, -3);
    }

    #[test]
    fn empty_layout_has_zero_stride() {
        let layout = VertexBufferLayout::new();
        assert!(layout.elements().is_empty());
        assert_eq!(layout.stride(), 0);
    }
}
