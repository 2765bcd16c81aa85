//! Shader program wrapper: compile, link, bind, set uniforms.
//!
//! Uniform locations are memoized per name, so each name costs exactly one
//! driver query over the life of a program object.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use gl::types::{GLenum, GLint, GLuint};

use crate::driver::Driver;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// The two stage sources split out of one combined shader file.
///
/// The combined format is line oriented: a line starting with `#shader`
/// names a stage (`vertex` or `fragment`), and every following line is
/// appended to that stage's source until the next marker. Lines before the
/// first marker are ignored, so a file can open with a comment header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn parse(combined: &str) -> Result<Self, Error> {
        let mut vertex = String::new();
        let mut fragment = String::new();
        let mut current: Option<ShaderStage> = None;

        for line in combined.lines() {
            let trimmed = line.trim_start();
            if let Some(rest) = strip_prefix(trimmed, "#shader") {
                current = Some(match rest.trim() {
                    "vertex" => ShaderStage::Vertex,
                    "fragment" => ShaderStage::Fragment,
                    other => return Err(Error::UnknownStage(other.to_owned())),
                });
                continue;
            }
            match current {
                Some(ShaderStage::Vertex) => {
                    vertex.push_str(line);
                    vertex.push('\n');
                }
                Some(ShaderStage::Fragment) => {
                    fragment.push_str(line);
                    fragment.push('\n');
                }
                None => {}
            }
        }

        if vertex.trim().is_empty() {
            return Err(Error::MissingStage(ShaderStage::Vertex));
        }
        if fragment.trim().is_empty() {
            return Err(Error::MissingStage(ShaderStage::Fragment));
        }

        Ok(Self { vertex, fragment })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::parse(&fs::read_to_string(path)?)
    }
}

// str::strip_prefix with the match requirement spelled out: the marker has
// to be its own token, "#shaderx" is not a marker.
fn strip_prefix<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    if !line.starts_with(marker) {
        return None;
    }
    let rest = &line[marker.len()..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

/// One linked shader program plus its uniform-location cache.
pub struct Shader {
    driver: Rc<dyn Driver>,
    id: GLuint,
    uniform_cache: RefCell<HashMap<String, GLint>>,
}

impl Shader {
    /// Load a combined source file, compile both stages and link them.
    pub fn from_file<P: AsRef<Path>>(driver: Rc<dyn Driver>, path: P) -> Result<Self, Error> {
        let source = ShaderSource::load(path)?;
        Self::from_source(driver, &source)
    }

    pub fn from_source(driver: Rc<dyn Driver>, source: &ShaderSource) -> Result<Self, Error> {
        let vs = Self::compile(&driver, ShaderStage::Vertex, &source.vertex)?;
        let fs = match Self::compile(&driver, ShaderStage::Fragment, &source.fragment) {
            Ok(fs) => fs,
            Err(e) => {
                driver.delete_shader(vs);
                return Err(e);
            }
        };

        let linked = driver.link_program(&[vs, fs]);
        // The stage objects are dead weight once linking has been attempted.
        driver.delete_shader(vs);
        driver.delete_shader(fs);

        let id = linked.map_err(|log| Error::ShaderLink { log })?;
        Ok(Self {
            driver,
            id,
            uniform_cache: RefCell::new(HashMap::new()),
        })
    }

    fn compile(driver: &Rc<dyn Driver>, stage: ShaderStage, source: &str) -> Result<GLuint, Error> {
        driver
            .compile_shader(stage.gl_enum(), source)
            .map_err(|log| Error::ShaderCompile { stage, log })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        self.driver.use_program(self.id);
    }

    pub fn unbind(&self) {
        self.driver.use_program(0);
    }

    pub fn set_uniform_4f(&self, name: &str, value: [f32; 4]) {
        let location = self.location(name);
        self.driver.set_uniform_4f(location, value);
    }

    pub fn set_uniform_1i(&self, name: &str, value: i32) {
        let location = self.location(name);
        self.driver.set_uniform_1i(location, value);
    }

    // Location -1 is cached too: the driver silently ignores sets at -1,
    // and caching it means we warn once instead of querying every frame.
    fn location(&self, name: &str) -> GLint {
        if let Some(&location) = self.uniform_cache.borrow().get(name) {
            return location;
        }
        let location = self.driver.uniform_location(self.id, name);
        if location == -1 {
            log::warn!("uniform '{}' does not exist in program {}", name, self.id);
        }
        self.uniform_cache.borrow_mut().insert(name.to_owned(), location);
        location
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.driver.delete_program(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMBINED: &str = "\
// a comment before any marker is fine
#shader vertex
#version 330 core
void main() { gl_Position = vec4(0.0); }
#shader fragment
#version 330 core
void main() {}
";

    #[test]
    fn parse_splits_stages_at_markers() {
        let source = ShaderSource::parse(COMBINED).unwrap();
        assert!(source.vertex.contains("gl_Position"));
        assert!(!source.vertex.contains("#shader"));
        assert!(source.fragment.starts_with("#version 330 core"));
    }

    #[test]
    fn parse_rejects_unknown_stage_marker() {
        let err = ShaderSource::parse("#shader geometry\nvoid main() {}\n").unwrap_err();
        match err {
            Error::UnknownStage(name) => assert_eq!(name, "geometry"),
            other => panic!("expected UnknownStage, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_missing_fragment_stage() {
        let err = ShaderSource::parse("#shader vertex\nvoid main() {}\n").unwrap_err();
        match err {
            Error::MissingStage(stage) => assert_eq!(stage, ShaderStage::Fragment),
            other => panic!("expected MissingStage, got {:?}", other),
        }
    }

    #[test]
    fn version_directives_are_not_markers() {
        let source = ShaderSource::parse(COMBINED).unwrap();
        assert!(source.vertex.contains("#version 330 core"));
    }
}
