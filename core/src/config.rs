//! Tunable parameters of the renderer and the frame driver.

use core::ops::Range;

use crate::Error;
use crate::math::{Color3f, Vec3, rgb, vec3};
use crate::render::{Mode, W_EPSILON, World, clip::Axes};

/// Parameters read by the [driver][crate::driver::Driver] each frame.
///
/// All fields are public; the builder-style setters exist for
/// convenience when only a few fields differ from the defaults:
///
/// ```
/// use softras_core::config::Config;
/// use softras_core::render::Mode;
///
/// let cfg = Config::default()
///     .mode(Mode::Wireframe)
///     .draw_axes(false);
/// assert_eq!(cfg.clear_color, 0xFF_22_22_33);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The color the target is cleared to at the start of every frame.
    pub clear_color: u32,
    /// Whether the mesh is filled or drawn as a wireframe.
    pub mode: Mode,
    /// The color of mesh edges in wireframe mode.
    pub wire_color: u32,
    /// The colors interpolated across each filled triangle, in vertex
    /// order.
    pub vertex_colors: [Color3f; 3],
    /// Which boundary planes line segments are clipped against.
    pub clip_axes: Axes,
    /// Vertical field of view of the projection, in radians.
    pub fov_y: f32,
    /// Distances of the near and far planes from the eye.
    pub near_far: Range<f32>,
    /// Initial camera position. The view transform translates the world
    /// by this vector.
    pub camera_pos: Vec3<World>,
    /// Magnitude of the camera velocity set by a single key.
    pub camera_speed: f32,
    /// Position of the rendered object.
    pub object_pos: Vec3<World>,
    /// Uniform scale factor of the rendered object.
    pub object_scale: f32,
    /// Whether to draw the world axes.
    pub draw_axes: bool,
    /// Smallest magnitude of w that a point may be divided by.
    pub w_epsilon: f32,
}

impl Default for Config {
    /// Returns the default configuration:
    /// * Clear color:    `0xFF_22_22_33` (dark blue-gray)
    /// * Mode:           Filled
    /// * Wire color:     `0xFF_00_FF_FF` (cyan)
    /// * Vertex colors:  Red, green, blue
    /// * Clip axes:      X, Y, and Z (six planes)
    /// * Field of view:  45°
    /// * Near..far:      0.01..100
    /// * Camera:         (0, 0, −3), speed 0.01 per frame
    /// * Object:         (0, 0.5, 0), scaled by 0.5
    /// * Axes:           Drawn
    /// * W epsilon:      [`W_EPSILON`]
    fn default() -> Self {
        Self {
            clear_color: 0xFF_22_22_33,
            mode: Mode::Fill,
            wire_color: 0xFF_00_FF_FF,
            vertex_colors: [
                rgb(1.0, 0.0, 0.0),
                rgb(0.0, 1.0, 0.0),
                rgb(0.0, 0.0, 1.0),
            ],
            clip_axes: Axes::Xyz,
            fov_y: core::f32::consts::FRAC_PI_4,
            near_far: 0.01..100.0,
            camera_pos: vec3(0.0, 0.0, -3.0),
            camera_speed: 0.01,
            object_pos: vec3(0.0, 0.5, 0.0),
            object_scale: 0.5,
            draw_axes: true,
            w_epsilon: W_EPSILON,
        }
    }
}

impl Config {
    /// Sets the color the target is cleared to.
    pub fn clear_color(mut self, argb: u32) -> Self {
        self.clear_color = argb;
        self
    }
    /// Sets whether the mesh is filled or drawn as a wireframe.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
    /// Sets the color of mesh edges in wireframe mode.
    pub fn wire_color(mut self, argb: u32) -> Self {
        self.wire_color = argb;
        self
    }
    /// Sets the colors interpolated across filled triangles.
    pub fn vertex_colors(mut self, colors: [Color3f; 3]) -> Self {
        self.vertex_colors = colors;
        self
    }
    /// Sets which boundary planes line segments are clipped against.
    pub fn clip_axes(mut self, axes: Axes) -> Self {
        self.clip_axes = axes;
        self
    }
    /// Sets the vertical field of view, in radians.
    pub fn fov_y(mut self, rad: f32) -> Self {
        self.fov_y = rad;
        self
    }
    /// Sets the near and far plane distances.
    ///
    /// Both must be finite and `0 < near < far`; otherwise
    /// [`Driver::start`][crate::driver::Driver::start] fails.
    pub fn near_far(mut self, near_far: Range<f32>) -> Self {
        self.near_far = near_far;
        self
    }
    /// Sets the initial camera position.
    pub fn camera_pos(mut self, pos: Vec3<World>) -> Self {
        self.camera_pos = pos;
        self
    }
    /// Sets the camera speed.
    pub fn camera_speed(mut self, speed: f32) -> Self {
        self.camera_speed = speed;
        self
    }
    /// Sets the position of the rendered object.
    pub fn object_pos(mut self, pos: Vec3<World>) -> Self {
        self.object_pos = pos;
        self
    }
    /// Sets the scale factor of the rendered object.
    pub fn object_scale(mut self, scale: f32) -> Self {
        self.object_scale = scale;
        self
    }
    /// Sets whether to draw the world axes.
    pub fn draw_axes(mut self, draw: bool) -> Self {
        self.draw_axes = draw;
        self
    }
    /// Sets the smallest magnitude of w that may be divided by.
    pub fn w_epsilon(mut self, eps: f32) -> Self {
        self.w_epsilon = eps;
        self
    }
}

impl Config {
    /// Checks that the values of `self` can be rendered with.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), Error> {
        let Range { start: n, end: f } = self.near_far;
        if !(0.0 < n && n < f && f.is_finite()) {
            return Err(Error::InvalidConfig { field: "near_far" });
        }
        Ok(())
    }
}
