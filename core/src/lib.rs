//! ```text
//!                     ___
//!     _____ ____  ___/ _/_ ____  ____ _____
//!    / ___// __ \/_  __/ // __/ / __ `/ ___/
//!   (__  )/ /_/ / / / / // /   / /_/ (__  )
//!  /____/ \____/ /_/ /_//_/    \__,_/____/
//! ```
//!
//! Core functionality of the `softras` project.
//!
//! A minimal software rasterizer: a math library with space-tagged vectors
//! and matrices, triangle meshes, a transform pipeline with perspective
//! divide and line clipping, DDA line drawing and scanline triangle fill,
//! and a frame driver tying them together.
//!
//! # Crate features
//!
//! * `std`:
//!   Makes available items requiring I/O, timekeeping, or any floating-point
//!   functions not included in `core`. In particular this means trigonometric
//!   functions, needed to build rotation and projection matrices.
//!
//!   If this feature is disabled, the crate only depends on `alloc`.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate.
//!
//! * `mm`:
//!   Provides fast approximate implementations of floating-point functions
//!   via the [micromath](https://crates.io/crates/micromath) crate.
//!
//! Only `std` is enabled by default.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

pub mod config;
pub mod driver;
pub mod error;
pub mod geom;
pub mod math;
pub mod render;
pub mod scene;
pub mod util;

pub use error::Error;

pub mod prelude {
    #[cfg(feature = "fp")]
    pub use crate::math::{perspective, rotate_y};
    pub use crate::math::{
        Color3, Color3f, Mat4x4, Matrix, Vec3, Vector, rgb, scale, splat,
        translate, vec3, viewport,
    };

    pub use crate::config::Config;
    pub use crate::driver::{Clock, Driver, State, SteppedClock};
    #[cfg(feature = "std")]
    pub use crate::driver::SystemClock;
    pub use crate::geom::{Cube, Mesh, MeshError, MeshSource, Tri, Vertex};

    pub use crate::render::{
        Mode, Model, Ndc, Screen, View, World, target::Target,
    };

    pub use crate::util::buf::{Buf2, MutSlice2};

    pub use crate::Error;
}
