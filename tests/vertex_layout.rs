//! The one piece of real bookkeeping: add_buffer has to hand every slot the
//! layout's total stride and a cumulative byte offset, in declaration order.

use std::rc::Rc;

use glwrap::testing::RecordingDriver;
use glwrap::{AttributeType, VertexArray, VertexBuffer, VertexBufferLayout};

fn array_with_layout(driver: &Rc<RecordingDriver>, layout: &VertexBufferLayout) {
    let array = VertexArray::new(Rc::clone(driver) as _).unwrap();
    let buffer = VertexBuffer::new(Rc::clone(driver) as _, &[0u8; 256]).unwrap();
    array.add_buffer(&buffer, layout);
}

#[test]
fn offsets_accumulate_and_stride_is_total() {
    let driver = Rc::new(RecordingDriver::new());

    // Element byte sizes 8, 4, 16; stride must be 28 for every slot and the
    // offsets must be the running sums 0, 8, 12.
    let mut layout = VertexBufferLayout::new();
    layout.push(AttributeType::Float, 2);
    layout.push(AttributeType::UnsignedInt, 1);
    layout.push(AttributeType::Float, 4);
    assert_eq!(layout.stride(), 28);

    array_with_layout(&driver, &layout);

    let pointers = driver.attrib_pointers();
    assert_eq!(pointers.len(), 3);

    let offsets: Vec<usize> = pointers.iter().map(|p| p.offset).collect();
    assert_eq!(offsets, vec![0, 8, 12]);

    for (slot, pointer) in pointers.iter().enumerate() {
        assert_eq!(pointer.index, slot as u32);
        assert_eq!(pointer.stride, 28);
    }

    assert_eq!(driver.enabled_attribs(), vec![0, 1, 2]);
}

#[test]
fn registered_types_and_normalization_follow_the_layout() {
    let driver = Rc::new(RecordingDriver::new());

    let mut layout = VertexBufferLayout::new();
    layout.push(AttributeType::Float, 3);
    layout.push(AttributeType::UnsignedByte, 4);

    array_with_layout(&driver, &layout);

    let pointers = driver.attrib_pointers();
    assert_eq!(pointers[0].ty, gl::FLOAT);
    assert!(!pointers[0].normalized);
    assert_eq!(pointers[1].ty, gl::UNSIGNED_BYTE);
    assert!(pointers[1].normalized);
    assert_eq!(pointers[1].offset, 12);
}

#[test]
fn empty_layout_enables_nothing() {
    let driver = Rc::new(RecordingDriver::new());

    array_with_layout(&driver, &VertexBufferLayout::new());

    assert!(driver.enabled_attribs().is_empty());
    assert!(driver.attrib_pointers().is_empty());
}

#[test]
fn add_buffer_binds_array_then_buffer() {
    let driver = Rc::new(RecordingDriver::new());

    let array = VertexArray::new(Rc::clone(&driver) as _).unwrap();
    let buffer = VertexBuffer::new(Rc::clone(&driver) as _, &[0u8; 16]).unwrap();
    let mut layout = VertexBufferLayout::new();
    layout.push(AttributeType::Float, 2);
    array.add_buffer(&buffer, &layout);

    assert_eq!(driver.bound_vertex_array(), array.id());
    assert_eq!(driver.bound_buffer(gl::ARRAY_BUFFER), buffer.id());
}

#[test]
fn unbind_resets_the_current_vertex_array() {
    let driver = Rc::new(RecordingDriver::new());

    let array = VertexArray::new(Rc::clone(&driver) as _).unwrap();
    array.bind();
    assert_eq!(driver.bound_vertex_array(), array.id());

    array.unbind();
    assert_eq!(driver.bound_vertex_array(), 0);
}
