//! Rendering context and parameters.

use crate::config::Config;
use crate::math::{Color3f, Mat4x4, viewport};

use super::clip::ClipVolume;
use super::{Mode, NdcToScreen, Stats};

/// Context and parameters used by the pipeline entry points.
///
/// A context is built once per frame from the [`Config`] and the
/// dimensions of the render target, and collects statistics as primitives
/// pass through it.
#[derive(Clone, Debug)]
pub struct Context {
    /// Maps normalized device coordinates to pixel coordinates.
    pub viewport: Mat4x4<NdcToScreen>,

    /// Volume that line segments are clipped against, in NDC.
    ///
    /// Filled triangles are not clipped; instead the rasterizer clamps
    /// them to the extent of the target.
    pub clip: ClipVolume,

    /// Smallest magnitude of w at which a point may still be divided by it.
    pub w_epsilon: f32,

    /// Whether triangles are filled or drawn as outlines.
    pub mode: Mode,

    /// Colors of the first, second, and third vertex of each filled
    /// triangle.
    pub vertex_colors: [Color3f; 3],

    /// Color of triangle outlines in wireframe mode.
    pub wire_color: u32,

    /// Statistics of the primitives and pixels rendered with this context.
    pub stats: Stats,
}

impl Context {
    /// Creates a context for a `width` × `height` target with the
    /// parameters in `cfg`.
    pub fn new(cfg: &Config, width: usize, height: usize) -> Self {
        Self {
            viewport: viewport(width as f32, height as f32).to(),
            clip: ClipVolume::ndc(cfg.clip_axes),
            w_epsilon: cfg.w_epsilon,
            mode: cfg.mode,
            vertex_colors: cfg.vertex_colors,
            wire_color: cfg.wire_color,
            stats: Stats::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::math::vec3;
    use crate::render::clip::Axes;

    use super::*;

    #[test]
    fn context_from_config() {
        let cfg = Config::default().clip_axes(Axes::Xy).w_epsilon(1e-3);
        let ctx = Context::new(&cfg, 640, 480);

        assert_eq!(ctx.clip, ClipVolume::ndc(Axes::Xy));
        assert_eq!(ctx.w_epsilon, 1e-3);
        assert_eq!(ctx.mode, Mode::Fill);
        assert_eq!(ctx.stats, Stats::default());

        // NDC corners map to the target corners
        let vp = &ctx.viewport;
        assert_eq!(vp.apply(&vec3(-1.0, 1.0, 0.0)), vec3(0.0, 0.0, 0.0));
        assert_eq!(vp.apply(&vec3(1.0, -1.0, 0.0)), vec3(640.0, 480.0, 0.0));
    }
}
