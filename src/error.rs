// Error types for the GL helpers
//
// Every failure a GL procedure can hit is one of these. The procedures also
// log the failure before returning it, so callers that only check `is_err()`
// still leave a trace.

use crate::gl::{ApiVersion, ShaderStage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlError {
    #[error("no compatible graphics context (tried {tried:?})")]
    NoCompatibleContext { tried: Vec<ApiVersion> },

    #[error("failed to create {what}: {reason}")]
    ResourceCreation { what: &'static str, reason: String },

    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("failed to link program: {log}")]
    ProgramLink { log: String },

    #[error("buffer '{name}' has no resolved attribute location")]
    UnresolvedAttribute { name: String },

    #[error("buffer '{name}' holds {len} bytes, not a multiple of its {stride}-byte element")]
    BufferLayout { name: String, len: usize, stride: usize },
}

pub type Result<T, E = GlError> = std::result::Result<T, E>;
