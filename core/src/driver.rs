//! Per-frame orchestration.
//!
//! A [`Driver`] owns the scene state and the mesh and is advanced one frame
//! at a time by the frontend. It moves through three states:
//!
//! ```text
//!   Uninitialized ──start──> Running ──quit──> Stopped
//!                            │     ^
//!                            └─────┘
//!                            process
//! ```
//!
//! Calling an operation in a state that does not permit it returns
//! [`Error::InvalidState`] and has no other effect.

use alloc::boxed::Box;
use core::fmt::{self, Debug, Formatter};

use crate::Error;
use crate::config::Config;
use crate::geom::{Mesh, MeshSource};
use crate::math::Vec3;
use crate::render::{Stats, World};
use crate::scene::Scene;

/// The lifecycle state of a [`Driver`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum State {
    #[default]
    Uninitialized,
    Running,
    Stopped,
}

/// A source of monotonically non-decreasing timestamps.
pub trait Clock {
    /// Returns the current time in milliseconds since an arbitrary epoch.
    fn now_ms(&mut self) -> u64;
}

/// A clock measuring wall-clock time since its creation.
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug)]
pub struct SystemClock(std::time::Instant);

/// A clock that advances by a fixed step every time it is read.
///
/// Makes frame timing deterministic in tests and headless rendering.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SteppedClock {
    now: u64,
    step: u64,
}

/// Drives the rendering of frames.
pub struct Driver<C> {
    cfg: Config,
    clock: C,
    source: Option<Box<dyn MeshSource>>,
    mesh: Mesh,
    state: State,
    scene: Scene,
    stats: Stats,
}

//
// Impls
//

#[cfg(feature = "std")]
impl SystemClock {
    /// Returns a clock whose epoch is now.
    pub fn new() -> Self {
        Self(std::time::Instant::now())
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_ms(&mut self) -> u64 {
        self.0.elapsed().as_millis() as u64
    }
}

impl SteppedClock {
    /// Returns a clock that first reads zero, then `step_ms` more on
    /// every subsequent read.
    pub const fn new(step_ms: u64) -> Self {
        Self { now: 0, step: step_ms }
    }
}

impl Clock for SteppedClock {
    fn now_ms(&mut self) -> u64 {
        let now = self.now;
        self.now += self.step;
        now
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_ms(&mut self) -> u64 {
        (**self).now_ms()
    }
}

impl<C: Clock> Driver<C> {
    /// Creates a driver in the [`Uninitialized`][State::Uninitialized]
    /// state. Until a mesh source is given, the driver renders an empty
    /// mesh.
    pub fn new(cfg: Config, clock: C) -> Self {
        Self {
            cfg,
            clock,
            source: None,
            mesh: Mesh::empty(),
            state: State::Uninitialized,
            scene: Scene::default(),
            stats: Stats::new(),
        }
    }

    /// Sets the collaborator that [`start`][Self::start] loads the mesh from.
    pub fn with_mesh_source(mut self, src: impl MeshSource + 'static) -> Self {
        self.source = Some(Box::new(src));
        self
    }

    /// Initializes the scene and loads the mesh.
    ///
    /// If the mesh source fails, the failure is logged and the driver
    /// continues with an empty mesh.
    ///
    /// # Errors
    /// [`Error::InvalidState`] unless the driver is uninitialized, and
    /// [`Error::InvalidConfig`] if the configuration fails
    /// [validation][Config::validate]. The driver stays uninitialized
    /// in both cases.
    pub fn start(&mut self) -> Result<(), Error> {
        self.expect_state("start", State::Uninitialized)?;
        self.cfg.validate()?;

        let now = self.clock.now_ms();
        self.scene = Scene::new(&self.cfg, now);
        self.mesh = match self.source.as_mut().map(|src| src.load()) {
            Some(Ok(mesh)) => mesh,
            Some(Err(e)) => {
                log::warn!("could not load mesh, rendering none: {e}");
                Mesh::empty()
            }
            None => Mesh::empty(),
        };
        self.state = State::Running;
        log::info!("started with {} triangles", self.mesh.len());
        Ok(())
    }

    /// Renders one frame into `target`.
    ///
    /// In order: updates frame timing, clears `target`, moves the camera,
    /// rebuilds the view, projection, and viewport transforms, advances the
    /// object's rotation, draws the axes (if enabled) and the mesh, and
    /// increments the frame counter.
    ///
    /// # Errors
    /// [`Error::InvalidState`] unless the driver is running.
    #[cfg(feature = "fp")]
    pub fn process(
        &mut self,
        target: &mut impl crate::render::target::Target,
    ) -> Result<(), Error> {
        use core::time::Duration;

        use crate::math::{Mat4x4, perspective};
        use crate::render::{
            ModelToView, ViewToProjective, ctx::Context, render_axes,
            render_tris,
        };

        self.expect_state("process", State::Running)?;

        let Scene { camera, object, timing } = &mut self.scene;

        let dt_ms = timing.tick(self.clock.now_ms());
        let delta = dt_ms as f32 / 1000.0;
        if dt_ms > 0 {
            log::debug!("FPS: {:.2} ({dt_ms} ms)", 1000.0 / dt_ms as f32);
        }

        target.clear(self.cfg.clear_color);

        camera.step();

        let (w, h) = (target.width(), target.height());
        let view = camera.world_to_view();
        let aspect = w as f32 / h as f32;
        let proj: Mat4x4<ViewToProjective> =
            perspective(self.cfg.fov_y, aspect, self.cfg.near_far.clone()).to();
        let mut ctx = Context::new(&self.cfg, w, h);

        object.angle += delta;

        if w > 0 && h > 0 {
            if self.cfg.draw_axes {
                let axes: Mat4x4<ModelToView> = view.to();
                render_axes(&axes.then_project(&proj), target, &mut ctx);
            }
            let mvp = object
                .model_to_world()
                .then(&view)
                .then_project(&proj);
            render_tris(&self.mesh, &mvp, target, &mut ctx);
        }

        timing.frames += 1;

        ctx.stats.frames = 1.0;
        ctx.stats.time = Duration::from_millis(dt_ms);
        self.stats += ctx.stats;
        Ok(())
    }

    /// Stops the driver. No resources are released; the mesh and the
    /// scene remain inspectable.
    ///
    /// # Errors
    /// [`Error::InvalidState`] unless the driver is running.
    pub fn quit(&mut self) -> Result<(), Error> {
        self.expect_state("quit", State::Running)?;
        self.state = State::Stopped;
        log::info!("stopped after {} frames", self.scene.timing.frames);
        log::info!("render stats:\n{}", self.stats);
        Ok(())
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the scene state.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the loaded mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Returns the statistics accumulated over all frames so far.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Sets the per-frame velocity of the camera.
    ///
    /// [`start`][Self::start] resets the velocity to zero, so this has
    /// a lasting effect only once the driver is running.
    pub fn set_camera_velocity(&mut self, vel: Vec3<World>) {
        self.scene.camera.vel = vel;
    }

    fn expect_state(&self, op: &'static str, ok: State) -> Result<(), Error> {
        if self.state == ok {
            Ok(())
        } else {
            Err(Error::InvalidState { op, state: self.state })
        }
    }
}

impl<C: Debug> Debug for Driver<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("state", &self.state)
            .field("clock", &self.clock)
            .field("scene", &self.scene)
            .field("mesh_len", &self.mesh.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::geom::{Cube, MeshError};
    use crate::math::vec3;

    use super::*;

    fn driver() -> Driver<SteppedClock> {
        Driver::new(Config::default(), SteppedClock::new(16))
    }

    #[test]
    fn stepped_clock() {
        let mut c = SteppedClock::new(10);
        assert_eq!([c.now_ms(), c.now_ms(), c.now_ms()], [0, 10, 20]);
    }

    #[test]
    fn start_loads_mesh() {
        let mut d = driver().with_mesh_source(Cube);
        assert_eq!(d.state(), State::Uninitialized);
        d.start().unwrap();
        assert_eq!(d.state(), State::Running);
        assert_eq!(d.mesh().len(), 12);
        assert_eq!(d.scene().camera.pos, d.config().camera_pos);
    }

    #[test]
    fn start_twice_is_invalid() {
        let mut d = driver();
        d.start().unwrap();
        assert_eq!(
            d.start(),
            Err(Error::InvalidState { op: "start", state: State::Running })
        );
        assert_eq!(d.state(), State::Running);
    }

    #[test]
    fn start_with_invalid_near_far_fails() {
        let cfg = Config::default().near_far(0.0..1.0);
        let mut d = Driver::new(cfg, SteppedClock::new(16));
        assert_eq!(
            d.start(),
            Err(Error::InvalidConfig { field: "near_far" })
        );
        assert_eq!(d.state(), State::Uninitialized);
    }

    #[test]
    fn quit_before_start_is_invalid() {
        let mut d = driver();
        assert_eq!(
            d.quit(),
            Err(Error::InvalidState { op: "quit", state: State::Uninitialized })
        );
        assert_eq!(d.state(), State::Uninitialized);
    }

    #[test]
    fn quit_stops() {
        let mut d = driver();
        d.start().unwrap();
        d.quit().unwrap();
        assert_eq!(d.state(), State::Stopped);
        assert!(d.quit().is_err());
        assert!(d.start().is_err());
    }

    #[test]
    fn failing_mesh_source_gives_empty_mesh() {
        let mut d = driver().with_mesh_source(|| -> Result<Mesh, MeshError> {
            Err(MeshError::Unavailable("disk on fire".into()))
        });
        assert_eq!(d.start(), Ok(()));
        assert!(d.mesh().is_empty());
    }

    #[test]
    fn camera_velocity_is_settable() {
        let mut d = driver();
        d.start().unwrap();
        d.set_camera_velocity(vec3(0.0, 0.01, 0.0));
        assert_eq!(d.scene().camera.vel, vec3(0.0, 0.01, 0.0));
    }

    #[cfg(feature = "fp")]
    mod process {
        use crate::util::buf::Buf2;

        use super::*;

        #[test]
        fn process_before_start_is_invalid() {
            let mut d = driver();
            let mut buf = Buf2::<u32>::new_default(8, 8);
            assert_eq!(
                d.process(&mut buf),
                Err(Error::InvalidState {
                    op: "process",
                    state: State::Uninitialized
                })
            );
            assert!(buf.iter().all(|&p| p == 0));
        }

        #[test]
        fn process_after_quit_is_invalid() {
            let mut d = driver();
            let mut buf = Buf2::<u32>::new_default(8, 8);
            d.start().unwrap();
            d.quit().unwrap();
            assert!(d.process(&mut buf).is_err());
            assert_eq!(d.scene().timing.frames, 0);
        }

        #[test]
        fn process_advances_timing_and_angle() {
            let mut d = driver().with_mesh_source(Cube);
            let mut buf = Buf2::<u32>::new_default(64, 48);
            d.start().unwrap();
            d.process(&mut buf).unwrap();
            d.process(&mut buf).unwrap();

            let s = d.scene();
            assert_eq!(s.timing.frames, 2);
            assert_eq!(s.timing.elapsed_ms, 32);
            assert_eq!(s.object.angle, 0.032);
            assert_eq!(d.stats().frames, 2.0);
            assert_eq!(d.stats().prims.i, 2 * (12 + 3));
        }

        #[test]
        fn process_clears_to_background() {
            let cfg = Config::default().draw_axes(false);
            let mut d = Driver::new(cfg, SteppedClock::new(16));
            let mut buf = Buf2::<u32>::new_default(16, 16);
            d.start().unwrap();
            d.process(&mut buf).unwrap();
            assert!(buf.iter().all(|&p| p == 0xFF_22_22_33));
        }

        #[test]
        fn process_zero_sized_target() {
            let mut d = driver().with_mesh_source(Cube);
            let mut buf = Buf2::<u32>::new_default(0, 0);
            d.start().unwrap();
            assert_eq!(d.process(&mut buf), Ok(()));
            assert_eq!(d.scene().timing.frames, 1);
        }
    }
}
