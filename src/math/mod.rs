// Math module - vector and matrix value types
//
// Both types are #[repr(C)] + Pod so they can be handed to the GPU as bytes.

pub mod matrix4;
pub mod vector3;

pub use matrix4::Matrix4;
pub use vector3::Vector3;
