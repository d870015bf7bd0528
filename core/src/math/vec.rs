//! Real and projective vectors.
//!
//! Vectors are tagged with the *space* they belong to, so that, for example,
//! a model-space position cannot be fed to a matrix expecting view-space
//! input without an explicit conversion.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::{Add, AddAssign, Index, Mul, Sub};

use crate::math::approx::ApproxEq;

/// A generic vector type, parameterized by its representation and the space
/// it is embedded in.
#[repr(transparent)]
pub struct Vector<Repr, Space = ()>(pub Repr, Pd<Space>);

/// Tag type for real vector spaces of dimension `DIM`, with `Basis`
/// distinguishing between different coordinate systems of the same
/// dimension.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Real<const DIM: usize, Basis = ()>(Pd<Basis>);

/// Tag type for the projective 4-space. Points are transformed by the
/// projection matrix into this space and mapped back to real 3-space by
/// the perspective divide.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Proj4;

/// A 3-vector with `f32` components.
pub type Vec3<Basis = ()> = Vector<[f32; 3], Real<3, Basis>>;
/// A homogeneous 4-vector with `f32` components.
pub type ProjVec3 = Vector<[f32; 4], Proj4>;

/// Returns a real 3-vector with components `x`, `y`, and `z`.
#[inline]
pub const fn vec3<B>(x: f32, y: f32, z: f32) -> Vec3<B> {
    Vector([x, y, z], Pd)
}

/// Returns a homogeneous vector with components `x`, `y`, `z`, and `w`.
#[inline]
pub const fn vec4(x: f32, y: f32, z: f32, w: f32) -> ProjVec3 {
    Vector([x, y, z, w], Pd)
}

/// Returns a vector with all components equal to `s`.
#[inline]
pub fn splat<Sp, const N: usize>(s: f32) -> Vector<[f32; N], Sp> {
    Vector([s; N], Pd)
}

//
// Inherent impls
//

impl<R, Sp> Vector<R, Sp> {
    /// Returns `self` with its space tag changed to `S`.
    ///
    /// This is the explicit escape hatch for reinterpreting coordinates.
    #[inline]
    pub fn to<S>(self) -> Vector<R, S> {
        Vector(self.0, Pd)
    }
}

impl<Sp, const N: usize> Vector<[f32; N], Sp> {
    /// Applies `f` to each component of `self`.
    #[inline]
    pub fn map(self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self(self.0.map(&mut f), Pd)
    }
}

impl<B> Vec3<B> {
    /// Returns the x component of `self`.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }
}

impl ProjVec3 {
    /// Returns the x component of `self`.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }
    /// Returns the w component of `self`.
    #[inline]
    pub const fn w(&self) -> f32 {
        self.0[3]
    }
}

//
// Foreign trait impls
//

// Manual impls of Copy, Clone, PartialEq, etc. to avoid
// superfluous where Space: Trait bounds

impl<R: Copy, Sp> Copy for Vector<R, Sp> {}

impl<R: Clone, Sp> Clone for Vector<R, Sp> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), Pd)
    }
}

impl<R: Default, Sp> Default for Vector<R, Sp> {
    fn default() -> Self {
        Self(R::default(), Pd)
    }
}

impl<R: PartialEq, Sp> PartialEq for Vector<R, Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Debug, Sp> Debug for Vector<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Vec")?;
        Debug::fmt(&self.0, f)
    }
}

impl<R, Sp> From<R> for Vector<R, Sp> {
    #[inline]
    fn from(repr: R) -> Self {
        Self(repr, Pd)
    }
}

impl<Sp, const N: usize> Index<usize> for Vector<[f32; N], Sp> {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl<Sp, const N: usize> Add for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] + rhs.0[i]), Pd)
    }
}

impl<Sp, const N: usize> AddAssign for Vector<[f32; N], Sp> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<Sp, const N: usize> Sub for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] - rhs.0[i]), Pd)
    }
}

impl<Sp, const N: usize> Mul<f32> for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.map(|c| c * rhs)
    }
}

impl<Sp, const N: usize> ApproxEq<Self, f32> for Vector<[f32; N], Sp> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn vector_addition_and_subtraction() {
        let a: Vec3 = vec3(1.0, 2.0, 0.0);
        let b = vec3(-2.0, 1.0, -1.0);
        assert_eq!(a + b, vec3(-1.0, 3.0, -1.0));
        assert_eq!(a - b, vec3(3.0, 1.0, 1.0));

        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
    }

    #[test]
    fn scalar_multiplication() {
        let v: Vec3 = vec3(1.0, -2.0, 3.0);
        assert_eq!(v * 3.0, vec3(3.0, -6.0, 9.0));
        assert_eq!(v * 0.0, vec3(0.0, 0.0, 0.0));
        assert_approx_eq!(vec3::<()>(0.1, 0.2, 0.3) * 3.0, vec3(0.3, 0.6, 0.9));
    }

    #[test]
    fn splat_and_retag() {
        let v: Vec3 = splat(0.5);
        assert_eq!(v, vec3(0.5, 0.5, 0.5));
        let w: Vec3<u8> = v.to();
        assert_eq!(w.0, v.0);
    }

    #[test]
    fn homogeneous_components() {
        let p = vec4(1.0, 2.0, 3.0, 0.5);
        assert_eq!([p.x(), p.y(), p.z(), p.w()], [1.0, 2.0, 3.0, 0.5]);
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", vec3::<()>(1.0, -2.0, 0.0)), "Vec[1.0, -2.0, 0.0]");
        assert_eq!(format!("{:?}", vec4(1.0, 0.0, 0.0, 1.0)), "Vec[1.0, 0.0, 0.0, 1.0]");
    }
}
