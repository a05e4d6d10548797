// Recording context for tests
//
// Hands out sequential u32 handles and records every call. Shader sources
// containing `#error` fail to compile.

use super::{ApiVersion, BufferTarget, BufferUsage, ContextSource, DataType, GlContext, ShaderStage};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub const BAD_SOURCE: &str = "#error deliberately broken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateShader(u32, ShaderStage),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    CreateBuffer(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData(BufferTarget, usize, BufferUsage),
    DeleteBuffer(u32),
    VertexAttribPointer(u32, i32, DataType),
    EnableVertexAttribArray(u32),
    Viewport(i32, i32, i32, i32),
}

#[derive(Debug, Default)]
pub struct RecordingContext {
    next_id: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    sources: RefCell<HashMap<u32, String>>,
    attribs: RefCell<HashMap<String, u32>>,
    uniforms: RefCell<HashMap<String, u32>>,
    pub fail_link: Cell<bool>,
    pub fail_create: Cell<bool>,
}

impl RecordingContext {
    fn next(&self) -> Result<u32, String> {
        if self.fail_create.get() {
            return Err("out of memory".to_string());
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        Ok(id)
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn set_attrib(&self, name: &str, location: u32) {
        self.attribs.borrow_mut().insert(name.to_string(), location);
    }

    pub fn set_uniform(&self, name: &str, location: u32) {
        self.uniforms.borrow_mut().insert(name.to_string(), location);
    }

    pub fn deleted_shaders(&self) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::DeleteShader(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn deleted_programs(&self) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::DeleteProgram(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn viewports(&self) -> Vec<(i32, i32, i32, i32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Viewport(x, y, w, h) => Some((x, y, w, h)),
                _ => None,
            })
            .collect()
    }

    fn source_is_bad(&self, shader: u32) -> bool {
        self.sources
            .borrow()
            .get(&shader)
            .is_some_and(|s| s.contains("#error"))
    }
}

impl GlContext for RecordingContext {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.next()?;
        self.record(Call::CreateShader(id, stage));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.sources.borrow_mut().insert(shader, source.to_string());
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        !self.source_is_bad(shader)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.source_is_bad(shader) {
            "ERROR: 0:1: '#error' : deliberately broken".to_string()
        } else {
            String::new()
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.next()?;
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.fail_link.get()
    }

    fn program_info_log(&self, _program: u32) -> String {
        if self.fail_link.get() {
            "error: varying vColor not written by vertex shader".to_string()
        } else {
            String::new()
        }
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.attribs.borrow().get(name).copied()
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.uniforms.borrow().get(name).copied()
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let id = self.next()?;
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8], usage: BufferUsage) {
        self.record(Call::BufferData(target, data.len(), usage));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: DataType,
        _normalized: bool,
        _stride: i32,
        _offset: i32,
    ) {
        self.record(Call::VertexAttribPointer(index, size, data_type));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }
}

/// Context source that only supports the listed versions and remembers
/// every request.
#[derive(Debug, Default)]
pub struct MockSource {
    supported: Vec<ApiVersion>,
    pub requests: Vec<ApiVersion>,
}

impl MockSource {
    pub fn supporting(versions: &[ApiVersion]) -> Self {
        Self {
            supported: versions.to_vec(),
            requests: Vec::new(),
        }
    }
}

impl ContextSource for MockSource {
    type Context = RecordingContext;

    fn get_context(&mut self, version: ApiVersion) -> Option<RecordingContext> {
        self.requests.push(version);
        self.supported.contains(&version).then(RecordingContext::default)
    }
}
