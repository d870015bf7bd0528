//! Linear algebra and other useful mathematics.
//!
//! Includes [vectors][self::vec], [matrices][mat] and [colors][color], as
//! well as approximate equality comparisons and a floating-point
//! [compatibility layer][float] for `no_std` builds.
//!
//! Vectors are tagged with a type that represents the *space* they're
//! embedded in, and values in different spaces cannot be mixed without
//! explicit conversion (transformation). Matrices, similarly, are tagged by
//! both source and destination space, and can only be applied to matching
//! vectors. A transform pipeline composed in the wrong order fails to
//! compile instead of rendering garbage.

pub use {
    approx::ApproxEq,
    color::{Color, Color3, Color3f, rgb},
    mat::{Mat4x4, Matrix, scale, translate, viewport},
    vec::{ProjVec3, Vec3, Vector, splat, vec3, vec4},
};
#[cfg(feature = "fp")]
pub use mat::{perspective, rotate_y};

pub mod approx;
pub mod color;
pub mod float;
pub mod mat;
pub mod vec;
