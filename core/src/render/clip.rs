//! Clipping line segments against an axis-aligned box.
//!
//! Clipping means shortening a shape so that only the points inside a
//! volume remain. Segments are clipped in normalized device coordinates,
//! after the perspective divide and before the viewport transform, so
//! that the rasterizer never walks pixels far outside the target.
//!
//! The algorithm is the parametric one due to Liang and Barsky. A segment
//! from *a* to *b* is written as *p(u) = a + u(b − a)* for *u* in [0, 1].
//! Every boundary plane yields one inequality *pₖu ≤ qₖ*, where *pₖ* is
//! the component of *b − a* along the plane's outward normal and *qₖ* the
//! distance from *a* to the plane. Planes with *pₖ* < 0 are entered and
//! can only raise the lower bound *u₁*; planes with *pₖ* > 0 are exited and
//! can only lower the upper bound *u₂*. The visible part, if any, is
//! *p(u₁)..p(u₂)*.
//!
//! ```text
//!             u₁          u₂
//!   a ---------x==========x------- b
//!              |          |
//!           min.x      max.x
//! ```

use crate::math::float;
use crate::math::vec::Vec3;

/// Component of the segment direction below which a segment is treated as
/// parallel to a boundary plane.
pub const PARALLEL_EPSILON: f32 = 1e-7;

/// The axes whose boundary planes take part in clipping.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Axes {
    /// The left, right, bottom, and top planes.
    Xy,
    /// The four planes of `Xy` plus the near and far planes.
    #[default]
    Xyz,
}

/// An axis-aligned box that segments are clipped against.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClipVolume {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub axes: Axes,
}

impl Axes {
    /// Returns the number of axes, and thus half the number of planes.
    pub const fn count(self) -> usize {
        match self {
            Self::Xy => 2,
            Self::Xyz => 3,
        }
    }
}

impl ClipVolume {
    /// The canonical view volume, [−1, 1] on every axis.
    pub const NDC: Self = Self::ndc(Axes::Xyz);

    /// Returns the canonical view volume clipping only on `axes`.
    pub const fn ndc(axes: Axes) -> Self {
        Self { min: [-1.0; 3], max: [1.0; 3], axes }
    }

    /// Returns whether `v` is inside `self` or on its boundary,
    /// considering only the active axes.
    pub fn contains<B>(&self, v: &Vec3<B>) -> bool {
        (0..self.axes.count())
            .all(|i| self.min[i] <= v.0[i] && v.0[i] <= self.max[i])
    }
}

impl Default for ClipVolume {
    fn default() -> Self {
        Self::NDC
    }
}

/// Clips the segment `a`–`b` against `vol`.
///
/// Returns `None` if no part of the segment lies inside the volume.
/// Otherwise returns the endpoints of the part that does. An endpoint
/// that needs no clipping is returned bit-for-bit unchanged, so a segment
/// fully inside the volume comes back exactly as it went in.
///
/// # Examples
/// ```
/// use softras_core::math::vec3;
/// use softras_core::render::clip::{ClipVolume, clip_segment};
///
/// let seg = [vec3::<()>(-2.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0)];
/// assert_eq!(
///     clip_segment(seg, &ClipVolume::NDC),
///     Some([vec3(-1.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)])
/// );
///
/// let outside = [vec3::<()>(2.0, 0.0, 0.0), vec3(2.0, 1.0, 0.0)];
/// assert_eq!(clip_segment(outside, &ClipVolume::NDC), None);
/// ```
pub fn clip_segment<B>(
    [a, b]: [Vec3<B>; 2],
    vol: &ClipVolume,
) -> Option<[Vec3<B>; 2]> {
    let d = b - a;
    let (mut u1, mut u2) = (0.0_f32, 1.0_f32);

    for i in 0..vol.axes.count() {
        // Two planes per axis: pₖ·u ≤ qₖ
        let planes = [(-d[i], a[i] - vol.min[i]), (d[i], vol.max[i] - a[i])];
        for (p, q) in planes {
            if float::f32::abs(p) <= PARALLEL_EPSILON {
                if q < 0.0 {
                    return None;
                }
            } else if p < 0.0 {
                u1 = u1.max(q / p);
            } else {
                u2 = u2.min(q / p);
            }
        }
    }
    if u1 > u2 {
        return None;
    }
    let at = |u: f32| a + d * u;
    let a = if u1 > 0.0 { at(u1) } else { a };
    let b = if u2 < 1.0 { at(u2) } else { b };
    Some([a, b])
}
