//! Acquire/release symmetry: every wrapper frees exactly the handle it
//! acquired, so construct-then-drop leaves the driver's live-handle count
//! where it started.

use std::rc::Rc;

use glwrap::testing::RecordingDriver;
use glwrap::{IndexBuffer, Shader, ShaderSource, VertexArray, VertexBuffer};

#[test]
fn vertex_buffer_releases_its_handle() {
    let driver = Rc::new(RecordingDriver::new());

    let buffer = VertexBuffer::new(Rc::clone(&driver) as _, &[0u8; 32]).unwrap();
    assert_eq!(driver.live_handles(), 1);

    drop(buffer);
    assert_eq!(driver.live_handles(), 0);
}

#[test]
fn index_buffer_releases_its_handle_and_keeps_count() {
    let driver = Rc::new(RecordingDriver::new());

    let indices = [0u32, 1, 2, 2, 3, 0];
    let buffer = IndexBuffer::new(Rc::clone(&driver) as _, &indices).unwrap();
    assert_eq!(buffer.count(), 6);
    assert_eq!(driver.live_handles(), 1);
    // 6 u32 indices upload as 24 bytes to the element binding point.
    assert_eq!(driver.uploads(), vec![(gl::ELEMENT_ARRAY_BUFFER, 24)]);

    drop(buffer);
    assert_eq!(driver.live_handles(), 0);
}

#[test]
fn vertex_array_releases_its_handle() {
    let driver = Rc::new(RecordingDriver::new());

    let array = VertexArray::new(Rc::clone(&driver) as _).unwrap();
    assert_eq!(driver.live_handles(), 1);

    drop(array);
    assert_eq!(driver.live_handles(), 0);
}

#[test]
fn shader_releases_program_and_stage_objects() {
    let driver = Rc::new(RecordingDriver::new());

    let source = ShaderSource {
        vertex: String::from("void main() {}\n"),
        fragment: String::from("void main() {}\n"),
    };
    let shader = Shader::from_source(Rc::clone(&driver) as _, &source).unwrap();
    // The two stage objects are deleted right after linking; only the
    // program itself stays alive.
    assert_eq!(driver.live_handles(), 1);

    drop(shader);
    assert_eq!(driver.live_handles(), 0);
}

#[test]
fn handles_are_never_reused() {
    let driver = Rc::new(RecordingDriver::new());

    let first = VertexBuffer::new(Rc::clone(&driver) as _, &[0u8; 8]).unwrap();
    let first_id = first.id();
    drop(first);

    let second = VertexBuffer::new(Rc::clone(&driver) as _, &[0u8; 8]).unwrap();
    assert_ne!(second.id(), first_id);
}
