// GL module - thin helpers over a caller-owned graphics context
//
// Design: stateless procedures, one call in -> a handful of context calls out
// Errors: Result<_, GlError>, logged at the failure site
//
// Everything here is generic over `GlContext`, the boundary to the actual
// graphics API. Enable the `glow` feature for an implementation on
// `glow::Context`.

pub mod buffer;
pub mod context;
pub mod shader;
pub mod viewport;

#[cfg(feature = "glow")]
mod glow_backend;

#[cfg(test)]
pub(crate) mod mock;

pub use buffer::{load_buffers, BufferObject, BufferTarget, BufferUsage, DataType, VertexData};
pub use context::{acquire_context, AcquiredContext, ApiVersion, Canvas, ContextSource, DEFAULT_CANDIDATES};
pub use shader::{
    create_program, init_shaders, load_program_info, load_shader, AttribLocations, BindingNames,
    ProgramInfo, ShaderStage, UniformLocations,
};
pub use viewport::{reset_viewport, CanvasSize};

use std::fmt::Debug;

/// The graphics context boundary.
///
/// Mirrors the subset of the GL / WebGL API these helpers need. Handles are
/// small copyable ids. Implementations must only be called on the thread
/// that owns the device, with the context current.
pub trait GlContext {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type Buffer: Copy + Debug;
    type UniformLocation: Clone + Debug;

    // Shaders
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    // Programs
    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;

    // Buffers
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage);
    fn delete_buffer(&self, buffer: Self::Buffer);
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: DataType,
        normalized: bool,
        stride: i32,
        offset: i32,
    );
    fn enable_vertex_attrib_array(&self, index: u32);

    // Rasterizer
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
}
