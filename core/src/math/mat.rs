//! Matrices and affine and projective transforms.
//!
//! Matrices are row-major and applied to column vectors, so the product
//! `A · B` applied to `v` first applies `B`, then `A`. The `Map` type
//! parameter records the spaces a matrix maps between; composing matrices
//! whose spaces do not line up is a type error.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use crate::math::approx::ApproxEq;
use crate::math::vec::{ProjVec3, Vec3, vec3, vec4};

/// Tag type for an affine map from real 3-space `FromBasis` to
/// real 3-space `ToBasis`.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct RealToReal<const DIM: usize, FromBasis, ToBasis>(
    PhantomData<(FromBasis, ToBasis)>,
);

/// Tag type for a map from real 3-space `FromBasis` to projective 4-space.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RealToProjective<FromBasis>(PhantomData<FromBasis>);

#[repr(transparent)]
pub struct Matrix<Repr, Map>(Repr, PhantomData<Map>);

pub type Mat4x4<Map = ()> = Matrix<[[f32; 4]; 4], Map>;

impl<Scalar, Map, const N: usize> Matrix<[[Scalar; N]; N], Map> {
    pub const fn new(els: [[Scalar; N]; N]) -> Self {
        Self(els, PhantomData)
    }
}

impl<M> Mat4x4<M> {
    pub const fn identity() -> Self {
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns `self` with its map tag changed to `N`.
    pub fn to<N>(&self) -> Mat4x4<N> {
        self.0.into()
    }

    /// Returns the matrix product `self · other`, ignoring the map tags.
    fn mul<N, O>(&self, other: &Mat4x4<N>) -> Mat4x4<O> {
        let mut els = [[0.0_f32; 4]; 4];
        for (i, row) in els.iter_mut().enumerate() {
            for (j, el) in row.iter_mut().enumerate() {
                *el = (0..4).map(|k| self.0[i][k] * other.0[k][j]).sum();
            }
        }
        els.into()
    }

    /// Returns `self` times the homogeneous column vector `[x, y, z, 1]`.
    fn mul_point(&self, [x, y, z]: [f32; 3]) -> [f32; 4] {
        let r = |i: usize| {
            let [a, b, c, d] = self.0[i];
            a * x + b * y + c * z + d
        };
        [r(0), r(1), r(2), r(3)]
    }
}

impl<F, T> Mat4x4<RealToReal<3, F, T>> {
    /// Returns the composite matrix `self · other`, which first applies
    /// `other` and then `self`.
    pub fn compose<G>(
        &self,
        other: &Mat4x4<RealToReal<3, G, F>>,
    ) -> Mat4x4<RealToReal<3, G, T>> {
        self.mul(other)
    }

    /// Returns the composite matrix `other · self`, which first applies
    /// `self` and then `other`.
    pub fn then<U>(
        &self,
        other: &Mat4x4<RealToReal<3, T, U>>,
    ) -> Mat4x4<RealToReal<3, F, U>> {
        other.compose(self)
    }

    /// Returns the composite matrix `other · self` when `other` is a
    /// projection.
    pub fn then_project(
        &self,
        other: &Mat4x4<RealToProjective<T>>,
    ) -> Mat4x4<RealToProjective<F>> {
        other.mul(self)
    }

    /// Transforms the point `v` by `self`.
    ///
    /// The implicit w component of `v` is one, and the bottom row of
    /// an affine matrix is assumed to be `[0, 0, 0, 1]`.
    pub fn apply(&self, v: &Vec3<F>) -> Vec3<T> {
        let [x, y, z, _] = self.mul_point(v.0);
        vec3(x, y, z)
    }
}

impl<F> Mat4x4<RealToProjective<F>> {
    /// Transforms the point `v` into homogeneous coordinates.
    ///
    /// The result must be divided by its w component to map it back to
    /// real space; see [`render::project`][crate::render::project].
    pub fn apply(&self, v: &Vec3<F>) -> ProjVec3 {
        let [x, y, z, w] = self.mul_point(v.0);
        vec4(x, y, z, w)
    }
}

// Manual impls to avoid superfluous where Map: Trait bounds

impl<R: Copy, M> Copy for Matrix<R, M> {}

impl<R: PartialEq, M> PartialEq for Matrix<R, M> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Clone, M> Clone for Matrix<R, M> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<S: Debug, M: Debug + Default, const N: usize> Debug
    for Matrix<[[S; N]; N], M>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix<{:?}>[", M::default())?;
        for i in 0..N {
            writeln!(f, "    {:6.2?}", self.0[i])?;
        }
        write!(f, "]")
    }
}

impl<const DIM: usize, F, T> Debug for RealToReal<DIM, F, T>
where
    F: Debug + Default,
    T: Debug + Default,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}->{:?}", F::default(), T::default())
    }
}

impl<const N: usize, S, M> From<[[S; N]; N]> for Matrix<[[S; N]; N], M> {
    fn from(els: [[S; N]; N]) -> Self {
        Self(els, PhantomData)
    }
}

impl<Map, const N: usize> ApproxEq<Self, f32> for Matrix<[[f32; N]; N], Map> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

/// Returns a matrix scaling by the per-axis factors in `s`.
pub fn scale(s: Vec3) -> Mat4x4 {
    [
        [s[0], 0.0, 0.0, 0.0],
        [0.0, s[1], 0.0, 0.0],
        [0.0, 0.0, s[2], 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
    .into()
}

/// Returns a matrix translating by `t`.
pub fn translate(t: Vec3) -> Mat4x4 {
    [
        [1.0, 0.0, 0.0, t[0]],
        [0.0, 1.0, 0.0, t[1]],
        [0.0, 0.0, 1.0, t[2]],
        [0.0, 0.0, 0.0, 1.0],
    ]
    .into()
}

/// Returns a matrix rotating counterclockwise by `rad` radians about
/// the y axis, looking down from positive y.
#[cfg(feature = "fp")]
pub fn rotate_y(rad: f32) -> Mat4x4 {
    use crate::math::float::f32;
    let (sin, cos) = (f32::sin(rad), f32::cos(rad));
    [
        [cos, 0.0, sin, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-sin, 0.0, cos, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
    .into()
}

/// Returns a right-handed perspective projection matrix.
///
/// The eye looks down the negative z axis. Points on the near plane map to
/// depth −1 and points on the far plane to depth +1.
///
/// # Parameters
/// * `fov_y`: vertical field of view in radians.
/// * `aspect`: viewport width divided by height.
/// * `near_far`: distances of the near and far planes from the eye.
///
/// # Panics
/// If debug assertions are enabled and `near_far` is empty or starts at
/// a non-positive distance.
#[cfg(feature = "fp")]
pub fn perspective(
    fov_y: f32,
    aspect: f32,
    near_far: core::ops::Range<f32>,
) -> Mat4x4 {
    use crate::math::float::f32;
    let (n, f) = (near_far.start, near_far.end);
    debug_assert!(0.0 < n && n < f, "invalid near/far planes {n}..{f}");

    let focal = 1.0 / f32::tan(fov_y / 2.0);
    [
        [focal / aspect, 0.0, 0.0, 0.0],
        [0.0, focal, 0.0, 0.0],
        [0.0, 0.0, (n + f) / (n - f), 2.0 * n * f / (n - f)],
        [0.0, 0.0, -1.0, 0.0],
    ]
    .into()
}

/// Returns a matrix mapping normalized device coordinates to pixel
/// coordinates in a `width` × `height` target.
///
/// Equivalent to `translate(w/2, h/2) · scale(w/2, −h/2)`. The y axis is
/// flipped, so NDC y = 1 maps to the top row and y = −1 to the bottom.
pub fn viewport(width: f32, height: f32) -> Mat4x4 {
    let (h, v) = (width / 2.0, height / 2.0);
    [
        [h, 0.0, 0.0, h],
        [0.0, -v, 0.0, v],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
    .into()
}
