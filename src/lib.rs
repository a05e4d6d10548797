// =============================================================================
// GL HELPERS - small utilities around a GL / WebGL context
// =============================================================================
//
// ┌─────────────────────────────────────────────────────────────────┐
// │  math    Vector3, Matrix4 (value types, uploadable as bytes)    │
// │  gl      context acquisition, shaders, buffers, viewport        │
// │            └── GlContext trait (glow impl behind `glow`)        │
// │  config  gl-helpers.toml                                        │
// │  logging env_logger setup                                       │
// └─────────────────────────────────────────────────────────────────┘
//
// Typical use:
// 1. Acquire a context (newest API version first, older as fallback)
// 2. Compile + link a program, look up its binding points
// 3. Build BufferObjects, resolve their attribute locations, upload
// 4. Feed Vector3/Matrix4 math into the uniforms
//
// Everything is synchronous and runs on the thread that owns the context.
// =============================================================================

pub mod config;
pub mod error;
pub mod gl;
pub mod logging;
pub mod math;

pub use config::Config;
pub use error::GlError;
pub use gl::{BufferObject, GlContext};
pub use logging::init_logging;
pub use math::{Matrix4, Vector3};
