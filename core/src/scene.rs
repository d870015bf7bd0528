//! Per-frame scene state: the camera, the rendered object, and timing.

use crate::config::Config;
use crate::math::{Mat4x4, Vec3, translate, vec3};
use crate::render::{World, WorldToView};

/// A camera that moves at a constant velocity per frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Camera {
    /// The offset of the world relative to the eye.
    pub pos: Vec3<World>,
    /// The change in `pos` per frame.
    pub vel: Vec3<World>,
}

/// The rendered object.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Object {
    pub pos: Vec3<World>,
    /// Accumulated rotation phase in seconds. Unbounded; the rotation
    /// itself is a periodic function of it.
    pub angle: f32,
    pub scale: f32,
}

/// Frame timing counters, all in milliseconds of the driver's clock.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Timing {
    /// Clock reading when the driver was started.
    pub start_ms: u64,
    /// Clock reading at the start of the latest frame.
    pub last_frame_ms: u64,
    /// Time from `start_ms` to `last_frame_ms`.
    pub elapsed_ms: u64,
    /// Number of frames completed.
    pub frames: u64,
}

/// All mutable state of a running driver.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub object: Object,
    pub timing: Timing,
}

impl Camera {
    /// Moves `self` by one frame's worth of velocity.
    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    /// Returns the view matrix, a translation by `self.pos`.
    pub fn world_to_view(&self) -> Mat4x4<WorldToView> {
        translate(self.pos.to()).to()
    }
}

impl Object {
    /// Returns the model matrix of `self`.
    ///
    /// The object is first scaled uniformly, then rotated about the y axis
    /// by `sin(angle) · π` radians, swinging back and forth, and finally
    /// translated to `pos`.
    #[cfg(feature = "fp")]
    pub fn model_to_world(&self) -> Mat4x4<crate::render::ModelToWorld> {
        use crate::math::{float::f32 as fp, mat::RealToReal};
        use crate::math::{rotate_y, scale, splat};
        use crate::render::Model;
        use core::f32::consts::PI;

        let s: Mat4x4<RealToReal<3, Model, Model>> =
            scale(splat(self.scale)).to();
        let r = rotate_y(fp::sin(self.angle) * PI).to();
        let t: Mat4x4<RealToReal<3, Model, World>> = translate(self.pos.to()).to();
        s.then(&r).then(&t)
    }
}

impl Timing {
    /// Returns timing counters for a driver started at `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self {
            start_ms: now_ms,
            last_frame_ms: now_ms,
            elapsed_ms: 0,
            frames: 0,
        }
    }

    /// Records the start of a new frame at `now_ms`, returning the time
    /// since the previous frame in milliseconds.
    ///
    /// A clock reading earlier than the previous one counts as no time
    /// having passed.
    pub fn tick(&mut self, now_ms: u64) -> u64 {
        let now_ms = now_ms.max(self.last_frame_ms);
        let dt = now_ms - self.last_frame_ms;
        self.last_frame_ms = now_ms;
        self.elapsed_ms = now_ms - self.start_ms;
        dt
    }
}

impl Scene {
    /// Returns the initial scene described by `cfg`, started at `now_ms`.
    pub fn new(cfg: &Config, now_ms: u64) -> Self {
        Self {
            camera: Camera {
                pos: cfg.camera_pos,
                vel: vec3(0.0, 0.0, 0.0),
            },
            object: Object {
                pos: cfg.object_pos,
                angle: 0.0,
                scale: cfg.object_scale,
            },
            timing: Timing::new(now_ms),
        }
    }
}
