//! Demo: draw a square from an index buffer and pulse its color through a
//! uniform, using the wrapper objects for all GL resource handling.

use std::ffi::CStr;
use std::rc::Rc;

use clap::{App, Arg};
use glutin::event::{Event, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;

use glwrap::{
    AttributeType, Driver, GlDriver, IndexBuffer, Renderer, Shader, VertexArray, VertexBuffer,
    VertexBufferLayout,
};

fn main() {
    env_logger::init();

    let matches = App::new("glwrap")
        .about("Draws a color-pulsing square with the glwrap objects")
        .arg(
            Arg::with_name("shader")
                .long("shader")
                .takes_value(true)
                .default_value("res/shaders/basic.shader")
                .help("Path to a combined #shader vertex/#shader fragment source file"),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .takes_value(true)
                .default_value("640"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .default_value("480"),
        )
        .get_matches();

    let shader_path = matches.value_of("shader").unwrap().to_owned();
    let width: f64 = matches.value_of("width").unwrap().parse().unwrap_or(640.0);
    let height: f64 = matches.value_of("height").unwrap().parse().unwrap_or(480.0);

    if let Err(e) = run(shader_path, width, height) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(shader_path: String, width: f64, height: f64) -> Result<(), Box<dyn std::error::Error>> {
    let events = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("glwrap")
        .with_inner_size(glutin::dpi::LogicalSize::new(width, height));
    let context = glutin::ContextBuilder::new()
        .with_vsync(true)
        .build_windowed(window, &events)?;

    let context = unsafe { context.make_current().map_err(|(_, e)| e)? };
    gl::load_with(|s| context.get_proc_address(s) as *const std::ffi::c_void);

    unsafe {
        let version = CStr::from_ptr(gl::GetString(gl::VERSION) as *const _);
        log::info!("OpenGL version: {}", version.to_string_lossy());
    }

    let driver: Rc<dyn Driver> = Rc::new(GlDriver::new());

    let positions: [f32; 8] = [
        -0.5, -0.5, // bottom left
        0.5, -0.5, // bottom right
        0.5, 0.5, // top right
        -0.5, 0.5, // top left
    ];
    let indices: [u32; 6] = [0, 1, 2, 2, 3, 0];

    let vertex_array = VertexArray::new(Rc::clone(&driver))?;
    let vertex_buffer = VertexBuffer::new(Rc::clone(&driver), bytemuck::cast_slice(&positions))?;
    let mut layout = VertexBufferLayout::new();
    layout.push(AttributeType::Float, 2);
    vertex_array.add_buffer(&vertex_buffer, &layout);

    let index_buffer = IndexBuffer::new(Rc::clone(&driver), &indices)?;
    let shader = Shader::from_file(Rc::clone(&driver), &shader_path)?;

    // Nothing needs to stay bound between frames; the draw rebinds it all.
    vertex_array.unbind();
    vertex_buffer.unbind();
    index_buffer.unbind();
    shader.unbind();

    let renderer = Renderer::new(Rc::clone(&driver));

    let mut red = 0.0f32;
    let mut increment = 0.05f32;

    events.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => {
                    context.resize(size);
                    unsafe {
                        gl::Viewport(0, 0, size.width as i32, size.height as i32);
                    }
                }
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                _ => {}
            },
            Event::MainEventsCleared => {
                context.window().request_redraw();
            }
            Event::RedrawRequested(_) => {
                renderer.clear();

                shader.bind();
                shader.set_uniform_4f("u_Color", [red, 0.3, 0.8, 1.0]);
                renderer.draw(&vertex_array, &index_buffer, &shader);

                if red > 1.0 {
                    increment = -0.05;
                } else if red < 0.0 {
                    increment = 0.05;
                }
                red += increment;

                if let Err(e) = context.swap_buffers() {
                    log::error!("swap_buffers failed: {}", e);
                }
            }
            _ => {}
        }

        // vertex_buffer has to outlive the array drawing from it, so the
        // closure owns it even though no arm mentions it.
        let _ = &vertex_buffer;
    })
}
