// Context acquisition
//
// Responsibilities:
// - Try API versions newest first, fall back to older ones
// - Tag the result with the version actually obtained
// - Cache the context on the canvas so later calls reuse it

use super::viewport::{self, CanvasSize};
use super::GlContext;
use crate::config::Config;
use crate::error::{GlError, Result};
use serde::Deserialize;
use std::fmt;

/// Graphics API versions a context can be requested for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
pub enum ApiVersion {
    #[serde(rename = "webgl2")]
    WebGl2,
    #[serde(rename = "webgl")]
    WebGl,
}

impl ApiVersion {
    /// Context id passed to `getContext`.
    pub fn context_id(self) -> &'static str {
        match self {
            ApiVersion::WebGl2 => "webgl2",
            ApiVersion::WebGl => "webgl",
        }
    }

    /// Version number reported for the running context.
    pub fn version(self) -> f32 {
        match self {
            ApiVersion::WebGl2 => 3.0,
            ApiVersion::WebGl => 1.0,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiVersion::WebGl2 => f.write_str("WebGL2"),
            ApiVersion::WebGl => f.write_str("WebGL"),
        }
    }
}

/// Newest first.
pub const DEFAULT_CANDIDATES: [ApiVersion; 2] = [ApiVersion::WebGl2, ApiVersion::WebGl];

/// Something that can hand out a graphics context for a given API version,
/// typically a canvas element or a window surface.
pub trait ContextSource {
    type Context: GlContext;

    /// `None` when the version is unavailable on this device.
    fn get_context(&mut self, version: ApiVersion) -> Option<Self::Context>;
}

/// A context together with the version it was obtained for and the programs
/// linked against it through [`init_shaders`](super::init_shaders).
pub struct AcquiredContext<C: GlContext> {
    context: C,
    version: ApiVersion,
    programs: Vec<C::Program>,
}

impl<C: GlContext> AcquiredContext<C> {
    pub fn new(context: C, version: ApiVersion) -> Self {
        Self {
            context,
            version,
            programs: Vec::new(),
        }
    }

    #[inline]
    pub fn gl(&self) -> &C {
        &self.context
    }

    #[inline]
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn programs(&self) -> &[C::Program] {
        &self.programs
    }

    pub(crate) fn register_program(&mut self, program: C::Program) {
        self.programs.push(program);
    }

    pub fn into_inner(self) -> C {
        self.context
    }
}

impl<C: GlContext + fmt::Debug> fmt::Debug for AcquiredContext<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcquiredContext")
            .field("context", &self.context)
            .field("version", &self.version)
            .field("programs", &self.programs)
            .finish()
    }
}

/// Ask `source` for each candidate in order and keep the first that works.
pub fn acquire_context<S: ContextSource>(
    source: &mut S,
    candidates: &[ApiVersion],
) -> Result<AcquiredContext<S::Context>> {
    for &version in candidates {
        match source.get_context(version) {
            Some(context) => {
                log::info!("Running {} (version {:.1})", version, version.version());
                return Ok(AcquiredContext::new(context, version));
            }
            None => log::debug!("{} context unavailable, trying next candidate", version),
        }
    }

    log::warn!("Sorry, this device is not set up for GL (tried {:?})", candidates);
    Err(GlError::NoCompatibleContext {
        tried: candidates.to_vec(),
    })
}

/// Drawing surface that owns its context source and caches the acquired
/// context.
pub struct Canvas<S: ContextSource> {
    source: S,
    candidates: Vec<ApiVersion>,
    fallback_pixel_ratio: f64,
    pub size: CanvasSize,
    gl: Option<AcquiredContext<S::Context>>,
}

impl<S: ContextSource> Canvas<S> {
    pub fn new(source: S, client_width: u32, client_height: u32) -> Self {
        Self {
            source,
            candidates: DEFAULT_CANDIDATES.to_vec(),
            fallback_pixel_ratio: 1.0,
            size: CanvasSize::new(client_width, client_height),
            gl: None,
        }
    }

    /// Canvas using the configured API preference order and device pixel
    /// ratio.
    pub fn from_config(source: S, config: &Config, client_width: u32, client_height: u32) -> Self {
        let mut canvas = Self::new(source, client_width, client_height)
            .with_candidates(config.context.preferred.clone());
        canvas.fallback_pixel_ratio = config.viewport.device_pixel_ratio;
        canvas
    }

    /// Override the order in which API versions are tried.
    pub fn with_candidates(mut self, candidates: Vec<ApiVersion>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Swap in a new context source, e.g. after the element or surface was
    /// recreated. The cached context belonged to the old one and is dropped.
    pub fn replace_source(&mut self, source: S) -> S {
        self.invalidate();
        std::mem::replace(&mut self.source, source)
    }

    /// Drop the cached context; the next [`Canvas::gl`] acquires a fresh one.
    pub fn invalidate(&mut self) {
        if self.gl.take().is_some() {
            log::debug!("Dropped cached context");
        }
    }

    /// Return the cached context, acquiring it on first use.
    ///
    /// A failed acquisition is not cached; the next call tries again.
    pub fn gl(&mut self) -> Result<&mut AcquiredContext<S::Context>> {
        let acquired = match self.gl.take() {
            Some(acquired) => acquired,
            None => acquire_context(&mut self.source, &self.candidates)?,
        };
        Ok(self.gl.insert(acquired))
    }

    /// The cached context, if one was acquired.
    pub fn cached_gl(&self) -> Option<&AcquiredContext<S::Context>> {
        self.gl.as_ref()
    }

    /// Record a new client (CSS) size, e.g. from a resize event.
    pub fn set_client_size(&mut self, client_width: u32, client_height: u32) {
        self.size.client_width = client_width;
        self.size.client_height = client_height;
    }

    /// Acquire (or reuse) the context and reset its viewport to the current
    /// client size. `None` uses the configured device pixel ratio. Returns
    /// the viewport in device pixels.
    pub fn reset_viewport(&mut self, device_pixel_ratio: Option<f64>) -> Result<(i32, i32)> {
        let device_pixel_ratio = device_pixel_ratio.unwrap_or(self.fallback_pixel_ratio);
        self.gl()?;
        match &self.gl {
            Some(acquired) => Ok(viewport::reset_viewport(
                acquired.gl(),
                &mut self.size,
                device_pixel_ratio,
            )),
            None => Err(GlError::NoCompatibleContext {
                tried: self.candidates.clone(),
            }),
        }
    }
}
