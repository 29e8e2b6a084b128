use thiserror::Error;

/// Fatal conditions raised while constructing or driving the engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("drawable surface is empty ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },
    #[error("no WebGPU adapter available")]
    NoAdapter,
    #[error("device request failed: {0}")]
    Device(String),
    #[error("surface configuration failed: {0}")]
    Surface(String),
    #[error("engine has been torn down")]
    Stopped,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}

/// Per-frame failures reported by a render backend.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("surface lost or outdated")]
    SurfaceLost,
    #[error("timed out acquiring the next frame")]
    Timeout,
    #[error("out of GPU memory")]
    OutOfMemory,
    #[error("{0}")]
    Other(String),
}

impl RenderError {
    /// Errors the next frame is expected to recover from on its own.
    pub fn is_transient(&self) -> bool {
        matches!(self, RenderError::SurfaceLost | RenderError::Timeout)
    }
}
