//! Turning 3D geometry into raster images.
//!
//! This module constitutes the transform-and-rasterize pipeline. A model
//! space point `p` goes through
//!
//! ```text
//!   Model ──M──> World ──V──> View ──P──> homogeneous ──/w──> NDC ──VP──> Screen
//! ```
//!
//! where the model, view, and projection matrices are composed into a
//! single `P · V · M` matrix once per object, the perspective divide is
//! done by [`project`], line segments are [clipped][clip] in NDC, and the
//! viewport matrix `VP` is applied last, just before the primitive is
//! [rasterized][raster] into the [target][target].

use core::fmt::{self, Display, Formatter};

use crate::geom::{Mesh, Tri, vertex};
use crate::math::mat::{RealToProjective, RealToReal};
use crate::math::{Mat4x4, Vec3, float, vec3};

use clip::clip_segment;
use ctx::Context;
use raster::{line, tri_fill, tri_wire};
use stats::Throughput;
use target::Target;

pub use stats::Stats;

pub mod clip;
pub mod ctx;
pub mod raster;
pub mod stats;
pub mod target;

/// Model space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Model;

/// World space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct World;

/// View (camera) space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct View;

/// NDC space coordinate basis (normalized device coordinates).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Ndc;

/// Screen space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Screen;

/// Mapping from model space to world space.
pub type ModelToWorld = RealToReal<3, Model, World>;

/// Mapping from world space to view space.
pub type WorldToView = RealToReal<3, World, View>;

/// Mapping from model space to view space.
pub type ModelToView = RealToReal<3, Model, View>;

/// Mapping from view space to projective space.
pub type ViewToProjective = RealToProjective<View>;

/// Mapping from model space to projective space.
pub type ModelToProjective = RealToProjective<Model>;

/// Mapping from NDC space to screen space.
pub type NdcToScreen = RealToReal<3, Ndc, Screen>;

/// Default smallest magnitude of w that a point may be divided by.
pub const W_EPSILON: f32 = 1e-6;

/// Why a point could not be projected into NDC.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Degenerate {
    /// The w component was zero, or too close to zero, or NaN.
    AtInfinity,
    /// The w component was negative: the point lies behind the eye.
    BehindEye,
}

/// How triangles are rasterized.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// Filled, with the vertex colors interpolated across the face.
    #[default]
    Fill,
    /// Only the three edges, clipped like any line segment.
    Wireframe,
}

/// The world axes as (segment, color) pairs: X red, Y green, Z blue.
///
/// Each axis is 20 units long and centered on the origin. The segments are
/// tagged as model space; drawn with an identity model matrix, model space
/// coincides with world space.
pub const AXES: [([Vec3<Model>; 2], u32); 3] = [
    ([vec3(-10.0, 0.0, 0.0), vec3(10.0, 0.0, 0.0)], 0xFF_FF_00_00),
    ([vec3(0.0, -10.0, 0.0), vec3(0.0, 10.0, 0.0)], 0xFF_00_FF_00),
    ([vec3(0.0, 0.0, -10.0), vec3(0.0, 0.0, 10.0)], 0xFF_33_33_FF),
];

/// Transforms `p` by `mvp` and divides the result by its w component.
///
/// # Errors
/// [`Degenerate::AtInfinity`] if |w| < `w_epsilon` (or w is NaN), and
/// [`Degenerate::BehindEye`] if w is negative. Callers are expected to
/// drop the primitive `p` belongs to.
///
/// # Examples
/// ```
/// use softras_core::math::{Mat4x4, vec3};
/// use softras_core::render::{Degenerate, W_EPSILON, project};
///
/// let id = Mat4x4::identity();
/// assert_eq!(project(&id, &vec3(1.0, 2.0, 3.0), W_EPSILON), Ok(vec3(1.0, 2.0, 3.0)));
///
/// let flat = Mat4x4::new([[1.0, 0.0, 0.0, 0.0]; 4]);
/// assert_eq!(project(&flat, &vec3(0.0, 1.0, 0.0), W_EPSILON), Err(Degenerate::AtInfinity));
/// ```
pub fn project(
    mvp: &Mat4x4<ModelToProjective>,
    p: &Vec3<Model>,
    w_epsilon: f32,
) -> Result<Vec3<Ndc>, Degenerate> {
    use float::f32 as fp;

    let v = mvp.apply(p);
    let w = v.w();
    if !(fp::abs(w) >= w_epsilon) {
        return Err(Degenerate::AtInfinity);
    }
    if w < 0.0 {
        return Err(Degenerate::BehindEye);
    }
    Ok(vec3(v.x() / w, v.y() / w, v.z() / w))
}

/// Renders the triangles of `mesh`, transformed by `mvp`, into `target`.
///
/// Triangles with any vertex that fails to [project] are dropped. In
/// [`Mode::Fill`], the surviving triangles are filled whole, as there is
/// no polygon clipping; in [`Mode::Wireframe`], each edge is clipped to
/// `ctx.clip` separately.
pub fn render_tris(
    mesh: &Mesh,
    mvp: &Mat4x4<ModelToProjective>,
    target: &mut impl Target,
    ctx: &mut Context,
) {
    for Tri(vs) in mesh.tris() {
        ctx.stats.prims.i += 1;

        let ndc = match vs.map(|v| project(mvp, &v, ctx.w_epsilon)) {
            [Ok(a), Ok(b), Ok(c)] => [a, b, c],
            [a, b, c] => {
                let e = a.and(b).and(c).err();
                log::trace!("discarding triangle {vs:?}: {e:?}");
                continue;
            }
        };

        let io = match ctx.mode {
            Mode::Fill => {
                let [a, b, c] = ndc.map(|v| ctx.viewport.apply(&v));
                let [ca, cb, cc] = ctx.vertex_colors;
                tri_fill(
                    target,
                    Tri([vertex(a, ca), vertex(b, cb), vertex(c, cc)]),
                )
            }
            Mode::Wireframe if ndc.iter().all(|v| ctx.clip.contains(v)) => {
                let screen = ndc.map(|v| ctx.viewport.apply(&v));
                tri_wire(target, Tri(screen), ctx.wire_color)
            }
            Mode::Wireframe => {
                let [a, b, c] = ndc;
                let mut io = Throughput::default();
                for seg in [[a, b], [b, c], [c, a]] {
                    io += draw_clipped(seg, ctx.wire_color, target, ctx)
                        .unwrap_or_default();
                }
                io
            }
        };
        ctx.stats.prims.o += 1;
        ctx.stats.pixels += io;
    }
}

/// Renders line segments, transformed by `mvp`, into `target`.
///
/// Each segment is projected, clipped to `ctx.clip`, and mapped to the
/// screen before it is drawn in the color `argb`. Segments with an
/// endpoint that fails to [project], or that lie wholly outside the clip
/// volume, are dropped.
pub fn render_lines(
    segs: &[[Vec3<Model>; 2]],
    mvp: &Mat4x4<ModelToProjective>,
    argb: u32,
    target: &mut impl Target,
    ctx: &mut Context,
) {
    for &[a, b] in segs {
        ctx.stats.prims.i += 1;

        let ndc = project(mvp, &a, ctx.w_epsilon)
            .and_then(|a| Ok([a, project(mvp, &b, ctx.w_epsilon)?]));
        let seg = match ndc {
            Ok(seg) => seg,
            Err(e) => {
                log::trace!("discarding segment {a:?}–{b:?}: {e}");
                continue;
            }
        };
        if let Some(io) = draw_clipped(seg, argb, target, ctx) {
            ctx.stats.prims.o += 1;
            ctx.stats.pixels += io;
        }
    }
}

/// Renders the world [axes][AXES] as seen through `view_proj`.
pub fn render_axes(
    view_proj: &Mat4x4<ModelToProjective>,
    target: &mut impl Target,
    ctx: &mut Context,
) {
    for (seg, argb) in AXES {
        render_lines(&[seg], view_proj, argb, target, ctx);
    }
}

/// Clips an NDC segment, maps it to the screen, and draws it.
///
/// Returns `None` if the segment lies outside the clip volume.
fn draw_clipped(
    seg: [Vec3<Ndc>; 2],
    argb: u32,
    target: &mut impl Target,
    ctx: &Context,
) -> Option<Throughput> {
    let Some(clipped) = clip_segment(seg, &ctx.clip) else {
        log::trace!("segment {seg:?} outside clip volume");
        return None;
    };
    let screen = clipped.map(|v| ctx.viewport.apply(&v));
    Some(line(target, screen, argb))
}

impl Display for Degenerate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AtInfinity => "point at infinity",
            Self::BehindEye => "point behind the eye",
        })
    }
}
