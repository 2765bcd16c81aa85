use thiserror::Error;

use crate::shader::ShaderStage;

/// Everything that can go wrong while creating GL resources.
///
/// The driver itself reports problems through `glGetError` and the shader
/// info logs; this enum turns those side channels into ordinary result
/// values.
#[derive(Debug, Error)]
pub enum Error {
    /// The driver returned a null handle when asked to create an object.
    #[error("driver returned a null {0} handle")]
    ResourceCreation(&'static str),

    /// One shader stage failed to compile; `log` is the driver's info log.
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    /// The compiled stages could not be linked into a program.
    #[error("shader program failed to link: {log}")]
    ShaderLink { log: String },

    /// A combined shader source never declared the given stage.
    #[error("combined shader source has no {0} stage")]
    MissingStage(ShaderStage),

    /// A `#shader` marker named a stage we don't know about.
    #[error("unknown shader stage marker '{0}'")]
    UnknownStage(String),

    #[error("failed to read shader source: {0}")]
    Io(#[from] std::io::Error),
}
