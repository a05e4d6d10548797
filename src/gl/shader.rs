// Shader compilation, program linking and binding lookup
//
// GLSL is compiled by the driver at runtime. Every failure path releases the
// native objects it created before returning the error.

use super::context::AcquiredContext;
use super::GlContext;
use crate::error::{GlError, Result};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// GL enum value (`VERTEX_SHADER` / `FRAGMENT_SHADER`).
    pub fn raw(self) -> u32 {
        match self {
            ShaderStage::Vertex => 0x8B31,
            ShaderStage::Fragment => 0x8B30,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Compile one shader stage from GLSL source.
pub fn load_shader<C: GlContext>(gl: &C, source: &str, stage: ShaderStage) -> Result<C::Shader> {
    let shader = gl.create_shader(stage).map_err(|reason| {
        log::error!("Failed to create {} shader: {}", stage, reason);
        GlError::ResourceCreation { what: "shader", reason }
    })?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    let info_log = gl.shader_info_log(shader);
    if !gl.shader_compile_status(shader) {
        log::error!("Failed to compile {} shader: {}", stage, info_log);
        gl.delete_shader(shader);
        return Err(GlError::ShaderCompile { stage, log: info_log });
    }
    if !info_log.trim().is_empty() {
        log::warn!("{} shader compiled with messages: {}", stage, info_log);
    }

    Ok(shader)
}

/// Compile both stages and link them into a program.
///
/// On success the shader objects are flagged for deletion; the driver keeps
/// them alive for as long as the program is.
pub fn create_program<C: GlContext>(gl: &C, vertex_source: &str, fragment_source: &str) -> Result<C::Program> {
    let vert = load_shader(gl, vertex_source, ShaderStage::Vertex)?;
    let frag = match load_shader(gl, fragment_source, ShaderStage::Fragment) {
        Ok(frag) => frag,
        Err(e) => {
            gl.delete_shader(vert);
            return Err(e);
        }
    };

    let program = match gl.create_program() {
        Ok(program) => program,
        Err(reason) => {
            log::error!("Failed to create program: {}", reason);
            gl.delete_shader(vert);
            gl.delete_shader(frag);
            return Err(GlError::ResourceCreation { what: "program", reason });
        }
    };

    gl.attach_shader(program, vert);
    gl.attach_shader(program, frag);
    gl.link_program(program);

    if !gl.program_link_status(program) {
        let info_log = gl.program_info_log(program);
        log::error!("Failed to link program: {}", info_log);
        gl.delete_program(program);
        gl.delete_shader(vert);
        gl.delete_shader(frag);
        return Err(GlError::ProgramLink { log: info_log });
    }

    gl.delete_shader(vert);
    gl.delete_shader(frag);
    log::debug!("Linked program {:?}", program);
    Ok(program)
}

/// Build a program and register it on the context so it can be found again
/// through [`AcquiredContext::programs`].
pub fn init_shaders<C: GlContext>(
    ctx: &mut AcquiredContext<C>,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<C::Program> {
    let program = create_program(ctx.gl(), vertex_source, fragment_source).inspect_err(|_| {
        log::error!("Failed to create program");
    })?;
    ctx.register_program(program);
    Ok(program)
}

// =============================================================================
// BINDING LOOKUP
// =============================================================================

/// Names of the standard attributes and uniforms a program is expected to
/// declare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BindingNames {
    pub vertex_position: String,
    pub vertex_color: String,
    pub projection_matrix: String,
    pub view_matrix: String,
    pub model_matrix: String,
}

impl Default for BindingNames {
    fn default() -> Self {
        Self {
            vertex_position: "aVertexPosition".to_string(),
            vertex_color: "aVertexColor".to_string(),
            projection_matrix: "uProjectionMatrix".to_string(),
            view_matrix: "uViewMatrix".to_string(),
            model_matrix: "uModelMatrix".to_string(),
        }
    }
}

/// `None` means the program does not use that attribute (GL's -1).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AttribLocations {
    pub vertex_position: Option<u32>,
    pub vertex_color: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformLocations<U> {
    pub projection_matrix: Option<U>,
    pub view_matrix: Option<U>,
    pub model_matrix: Option<U>,
}

/// A program together with its resolved binding points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo<P, U> {
    pub program: P,
    pub attrib_locations: AttribLocations,
    pub uniform_locations: UniformLocations<U>,
}

/// Look up the standard binding points of `program`.
///
/// Missing bindings are not an error; they are logged at debug level and
/// left as `None`.
pub fn load_program_info<C: GlContext>(
    gl: &C,
    program: C::Program,
    names: &BindingNames,
) -> ProgramInfo<C::Program, C::UniformLocation> {
    let attrib = |name: &str| {
        let loc = gl.attrib_location(program, name);
        if loc.is_none() {
            log::debug!("Attribute '{}' not active in program {:?}", name, program);
        }
        loc
    };
    let uniform = |name: &str| {
        let loc = gl.uniform_location(program, name);
        if loc.is_none() {
            log::debug!("Uniform '{}' not active in program {:?}", name, program);
        }
        loc
    };

    ProgramInfo {
        program,
        attrib_locations: AttribLocations {
            vertex_position: attrib(&names.vertex_position),
            vertex_color: attrib(&names.vertex_color),
        },
        uniform_locations: UniformLocations {
            projection_matrix: uniform(&names.projection_matrix),
            view_matrix: uniform(&names.view_matrix),
            model_matrix: uniform(&names.model_matrix),
        },
    }
}
