// Buffer objects and upload
//
// A BufferObject is a plain record: what the data is, how it is laid out,
// where it binds. load_buffers pushes a batch of them to the device.

use super::GlContext;
use crate::error::{GlError, Result};
use crate::math::{Matrix4, Vector3};
use bytemuck::Pod;

/// Semantic role of a GPU buffer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data.
    #[default]
    ArrayBuffer,
    /// Index data.
    ElementArrayBuffer,
}

impl BufferTarget {
    pub fn raw(self) -> u32 {
        match self {
            BufferTarget::ArrayBuffer => 0x8892,
            BufferTarget::ElementArrayBuffer => 0x8893,
        }
    }
}

/// Usage hint passed along with the upload.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    #[default]
    StaticDraw,
    DynamicDraw,
    StreamDraw,
}

impl BufferUsage {
    pub fn raw(self) -> u32 {
        match self {
            BufferUsage::StaticDraw => 0x88E4,
            BufferUsage::DynamicDraw => 0x88E8,
            BufferUsage::StreamDraw => 0x88E0,
        }
    }
}

/// Element type of the buffer data.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum DataType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    #[default]
    Float,
}

impl DataType {
    pub fn raw(self) -> u32 {
        match self {
            DataType::Byte => 0x1400,
            DataType::UnsignedByte => 0x1401,
            DataType::Short => 0x1402,
            DataType::UnsignedShort => 0x1403,
            DataType::Int => 0x1404,
            DataType::UnsignedInt => 0x1405,
            DataType::Float => 0x1406,
        }
    }

    pub fn size_bytes(self) -> usize {
        match self {
            DataType::Byte | DataType::UnsignedByte => 1,
            DataType::Short | DataType::UnsignedShort => 2,
            DataType::Int | DataType::UnsignedInt | DataType::Float => 4,
        }
    }
}

/// Plain data that can be uploaded as buffer contents, together with the
/// GL element type it is made of.
pub trait VertexData: Pod {
    const DATA_TYPE: DataType;
}

macro_rules! vertex_data {
    ($($ty:ty => $data_type:ident),* $(,)?) => {
        $(impl VertexData for $ty {
            const DATA_TYPE: DataType = DataType::$data_type;
        })*
    };
}

vertex_data! {
    i8 => Byte,
    u8 => UnsignedByte,
    i16 => Short,
    u16 => UnsignedShort,
    i32 => Int,
    u32 => UnsignedInt,
    f32 => Float,
    Vector3 => Float,
    Matrix4 => Float,
}

impl<T: VertexData, const N: usize> VertexData for [T; N]
where
    [T; N]: Pod,
{
    const DATA_TYPE: DataType = T::DATA_TYPE;
}

/// Metadata and contents of one GPU buffer.
///
/// `B` is the context's buffer handle type. The device buffer is created up
/// front by [`BufferObject::new`]; nothing is uploaded until
/// [`load_buffers`] runs.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferObject<B> {
    pub name: String,
    pub num_components: i32,
    pub target: BufferTarget,
    pub data: Vec<u8>,
    pub buffer: B,
    pub data_type: DataType,
    /// `None` until resolved against a compiled program.
    pub attrib_location: Option<u32>,
    pub usage: BufferUsage,
}

impl<B: Copy> BufferObject<B> {
    /// Create the device buffer and record `data` for upload.
    ///
    /// The element type follows `T` (`u16` data is `UnsignedShort`, `f32`
    /// and `Vector3` data is `Float`). Other defaults: array buffer, static
    /// draw, unresolved attribute location.
    pub fn new<C, T>(gl: &C, name: impl Into<String>, num_components: i32, data: &[T]) -> Result<Self>
    where
        C: GlContext<Buffer = B>,
        T: VertexData,
    {
        let name = name.into();
        let buffer = gl.create_buffer().map_err(|reason| {
            log::error!("Failed to create buffer '{}': {}", name, reason);
            GlError::ResourceCreation { what: "buffer", reason }
        })?;

        Ok(Self {
            name,
            num_components,
            target: BufferTarget::default(),
            data: bytemuck::cast_slice(data).to_vec(),
            buffer,
            data_type: T::DATA_TYPE,
            attrib_location: None,
            usage: BufferUsage::default(),
        })
    }

    pub fn with_target(mut self, target: BufferTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_attrib_location(mut self, location: Option<u32>) -> Self {
        self.attrib_location = location;
        self
    }

    pub fn with_usage(mut self, usage: BufferUsage) -> Self {
        self.usage = usage;
        self
    }

    /// Replace the contents. The element type follows `T`. Takes effect on
    /// the next [`load_buffers`].
    pub fn set_data<T: VertexData>(&mut self, data: &[T]) {
        self.data_type = T::DATA_TYPE;
        self.data.clear();
        self.data.extend_from_slice(bytemuck::cast_slice(data));
    }

    /// Bytes per vertex for array buffers, bytes per index for element
    /// buffers.
    pub fn stride(&self) -> usize {
        match self.target {
            BufferTarget::ArrayBuffer => self.num_components.max(0) as usize * self.data_type.size_bytes(),
            BufferTarget::ElementArrayBuffer => self.data_type.size_bytes(),
        }
    }

    /// Number of vertices (array buffer) or indices (element buffer).
    pub fn element_count(&self) -> usize {
        match self.stride() {
            0 => 0,
            stride => self.data.len() / stride,
        }
    }

    /// Check the layout invariants upload relies on.
    pub fn validate(&self) -> Result<()> {
        let stride = self.stride();
        if stride == 0 || self.data.len() % stride != 0 {
            return Err(GlError::BufferLayout {
                name: self.name.clone(),
                len: self.data.len(),
                stride,
            });
        }
        if self.target == BufferTarget::ArrayBuffer && self.attrib_location.is_none() {
            return Err(GlError::UnresolvedAttribute {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Release the device buffer.
    pub fn delete<C: GlContext<Buffer = B>>(self, gl: &C) {
        gl.delete_buffer(self.buffer);
    }
}

/// Upload a batch of buffers.
///
/// Every buffer is validated first so a bad record leaves the device
/// untouched. Then each one is bound and uploaded; array buffers also get
/// their vertex attribute pointer set and enabled.
pub fn load_buffers<C: GlContext>(gl: &C, buffers: &[BufferObject<C::Buffer>]) -> Result<()> {
    for bo in buffers {
        bo.validate().inspect_err(|e| log::error!("Refusing to upload buffers: {}", e))?;
    }

    for bo in buffers {
        gl.bind_buffer(bo.target, Some(bo.buffer));
        gl.buffer_data(bo.target, &bo.data, bo.usage);
        log::debug!("Uploaded {} bytes to '{}' ({:?})", bo.data.len(), bo.name, bo.target);

        if bo.target == BufferTarget::ElementArrayBuffer {
            continue;
        }

        if let Some(location) = bo.attrib_location {
            gl.vertex_attrib_pointer(location, bo.num_components, bo.data_type, false, 0, 0);
            gl.enable_vertex_attrib_array(location);
        }
    }

    Ok(())
}
