use std::{io, path::PathBuf};

use thiserror::Error;

use crate::gpu::ShaderStage;

#[derive(Debug, Error)]
pub enum Error {
    #[error("window creation error: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("no compatible graphics adapter")]
    Adapter,

    #[error("graphics device creation error: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("window surface is not supported by the graphics adapter")]
    UnsupportedSurface,

    /// A GPU object could not be allocated. Carries the kind of object.
    #[error("{0} generation error")]
    Allocation(&'static str),

    #[error("{stage} shader compilation error: {log}")]
    ShaderCompilation { stage: ShaderStage, log: String },

    #[error("failed to link shader program: {0}")]
    ProgramLink(String),

    #[error("file reading error: {}: {source}", .path.display())]
    ReadFile { path: PathBuf, source: io::Error },

    #[error("frame acquisition error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, Error>;
