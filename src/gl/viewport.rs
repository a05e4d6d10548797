// Viewport sizing
//
// The drawing buffer follows the client (logical) size; the GL viewport
// covers it in device pixels.

use super::GlContext;
use winit::dpi::{validate_scale_factor, LogicalSize, PhysicalSize};

/// Client size (logical pixels, as laid out) and drawing-buffer size of a
/// canvas.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CanvasSize {
    pub client_width: u32,
    pub client_height: u32,
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(client_width: u32, client_height: u32) -> Self {
        Self {
            client_width,
            client_height,
            width: client_width,
            height: client_height,
        }
    }
}

/// Copy the client size into the drawing-buffer size and point the viewport
/// at `(0, 0, dpr * width, dpr * height)`.
///
/// A non-positive or non-finite ratio is replaced by 1.0. Returns the
/// viewport extent in device pixels.
pub fn reset_viewport<C: GlContext>(gl: &C, size: &mut CanvasSize, device_pixel_ratio: f64) -> (i32, i32) {
    let dpr = if validate_scale_factor(device_pixel_ratio) {
        device_pixel_ratio
    } else {
        log::warn!("Invalid device pixel ratio {}, using 1.0", device_pixel_ratio);
        1.0
    };

    size.width = size.client_width;
    size.height = size.client_height;

    let physical: PhysicalSize<i32> = LogicalSize::new(size.width, size.height).to_physical(dpr);
    gl.viewport(0, 0, physical.width, physical.height);
    log::debug!(
        "Viewport reset to {}x{} ({}x{} @ {})",
        physical.width,
        physical.height,
        size.width,
        size.height,
        dpr
    );

    (physical.width, physical.height)
}
