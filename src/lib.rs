//! A small set of safe wrappers around the raw OpenGL API.
//!
//! OpenGL hands everything back as an opaque integer handle, and using those
//! handles means hundreds of lines of cryptic, unsafe function calls. These
//! wrappers pair each handle with an owning object (acquire in the
//! constructor, release in `Drop`) so the unsafe surface stays inside one
//! module and the rest of the code reads like ordinary Rust.
//!
//! All GL traffic goes through the [`driver::Driver`] trait. The real
//! implementation, [`driver::GlDriver`], forwards to the `gl` crate; the
//! [`testing::RecordingDriver`] stub records every call so the bookkeeping
//! (offsets, strides, handle lifecycles) can be checked without a GPU
//! context.
//!
//! If any of this is unfamiliar, [Learn OpenGL](https://learnopengl.com/) is
//! the classic set of tutorials, and [docs.gl](http://docs.gl/) documents the
//! individual calls these wrappers sit on top of.

pub mod buffer;
pub mod driver;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod shader;
pub mod testing;
pub mod vertex_array;

pub use buffer::{IndexBuffer, VertexBuffer};
pub use driver::{Driver, GlDriver};
pub use error::Error;
pub use layout::{AttributeType, LayoutElement, VertexBufferLayout};
pub use renderer::Renderer;
pub use shader::{Shader, ShaderSource, ShaderStage};
pub use vertex_array::VertexArray;
