//! Colors and color packing.

use core::array;
use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{Add, Index, Mul, Sub};

use crate::math::approx::ApproxEq;

//
// Types
//

/// A generic color type, similar to [`Vector`][crate::math::vec::Vector].
///
/// # Type parameters
/// * `Repr`: the representation of the components of `Self`.
/// Color components are also called *channels*.
/// * `Space`: the color space that `Self` is an element of.
#[repr(transparent)]
pub struct Color<Repr, Space>(pub Repr, PhantomData<Space>);

/// The (S)RGB color space.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rgb;

/// An RGB color with `u8` components.
pub type Color3<Space = Rgb> = Color<[u8; 3], Space>;

/// An RGB color with `f32` components, nominally in the range [0, 1].
pub type Color3f<Space = Rgb> = Color<[f32; 3], Space>;

/// Returns a new RGB color with `r`, `g`, and `b` components.
pub const fn rgb<Ch>(r: Ch, g: Ch, b: Ch) -> Color<[Ch; 3], Rgb> {
    Color([r, g, b], PhantomData)
}

//
// Inherent impls
//

impl Color3 {
    /// Returns a `u32` containing the component bytes of `self`
    /// in format `0xFF_RR_GG_BB`, that is, with full alpha.
    #[inline]
    pub const fn to_argb_u32(self) -> u32 {
        let [r, g, b] = self.0;
        u32::from_be_bytes([0xFF, r, g, b])
    }

    /// Returns the color components of the packed `0xAA_RR_GG_BB` value,
    /// discarding alpha.
    #[inline]
    pub const fn from_argb_u32(argb: u32) -> Self {
        let [_, r, g, b] = argb.to_be_bytes();
        rgb(r, g, b)
    }
}

impl Color3f {
    /// Returns a `Color3` with the components of `self` mapped to `u8`
    /// with `(c.clamp(0.0, 1.0) * 255.0) as u8`.
    #[inline]
    pub fn to_color3(self) -> Color3 {
        Color(self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8), PhantomData)
    }

    /// Clamps the channels of `self` to [0, 1] and packs them into
    /// a `0xFF_RR_GG_BB` value.
    #[inline]
    pub fn to_argb_u32(self) -> u32 {
        self.to_color3().to_argb_u32()
    }

    /// Linearly interpolates between `self` and `other`.
    #[inline]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }
}

impl<Ch: Copy, Sp> Color<[Ch; 3], Sp> {
    /// Returns the red component of `self`.
    pub const fn r(&self) -> Ch {
        self.0[0]
    }
    /// Returns the green component of `self`.
    pub const fn g(&self) -> Ch {
        self.0[1]
    }
    /// Returns the blue component of `self`.
    pub const fn b(&self) -> Ch {
        self.0[2]
    }
}

//
// Foreign trait impls
//

impl<R: Copy, Sp> Copy for Color<R, Sp> {}

impl<R: Clone, Sp> Clone for Color<R, Sp> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<R: Default, Sp> Default for Color<R, Sp> {
    fn default() -> Self {
        Self(R::default(), PhantomData)
    }
}

impl<R: PartialEq, Sp> PartialEq for Color<R, Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Debug, Space: Debug + Default> Debug for Color<R, Space> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Color<{:?}>{:?}", Space::default(), self.0)
    }
}

impl<R, Sp> From<R> for Color<R, Sp> {
    #[inline]
    fn from(els: R) -> Self {
        Self(els, PhantomData)
    }
}

impl<Sp, Ch, const N: usize> Index<usize> for Color<[Ch; N], Sp> {
    type Output = Ch;
    fn index(&self, i: usize) -> &Ch {
        &self.0[i]
    }
}

impl<Sp, const N: usize> Add for Color<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] + rhs.0[i]), PhantomData)
    }
}

impl<Sp, const N: usize> Sub for Color<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(array::from_fn(|i| self.0[i] - rhs.0[i]), PhantomData)
    }
}

impl<Sp, const N: usize> Mul<f32> for Color<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self(self.0.map(|c| c * rhs), PhantomData)
    }
}

impl<Sp, const N: usize> ApproxEq<Self, f32> for Color<[f32; N], Sp> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn color_components() {
        let c = rgb(0xFF, 0x66, 0x00);
        assert_eq!(c.r(), 0xFF);
        assert_eq!(c.g(), 0x66);
        assert_eq!(c.b(), 0x00);
    }

    #[test]
    fn packing_adds_full_alpha() {
        assert_eq!(rgb(0x22u8, 0x22, 0x33).to_argb_u32(), 0xFF_22_22_33);
        assert_eq!(rgb(1.0, 0.0, 0.0).to_argb_u32(), 0xFF_FF_00_00);
    }

    #[test]
    fn unpacking_discards_alpha() {
        assert_eq!(Color3::from_argb_u32(0x80_33_33_FF), rgb(0x33, 0x33, 0xFF));
        assert_eq!(Color3::from_argb_u32(0xFF_00_FF_00).g(), 0xFF);
    }

    #[test]
    fn float_channels_are_clamped() {
        let c = rgb(-0.5, 0.5, 1.5);
        assert_eq!(c.to_color3(), rgb(0, 127, 255));
        assert_eq!(c.to_argb_u32(), 0xFF_00_7F_FF);
    }

    #[test]
    fn lerp_between_colors() {
        let red = rgb(1.0, 0.0, 0.0);
        let blue = rgb(0.0, 0.0, 1.0);
        assert_approx_eq!(red.lerp(&blue, 0.25), rgb(0.75, 0.0, 0.25));
        assert_eq!(red.lerp(&blue, 0.0), red);
    }

    #[test]
    fn color_debug() {
        let c = rgb(0x12u8, 0x34, 0x56);
        assert_eq!(alloc::format!("{c:?}"), "Color<Rgb>[18, 52, 86]");
    }
}
