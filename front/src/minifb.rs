//! Frontend using the `minifb` crate for window creation and event handling.

use minifb::{Key, KeyRepeat, WindowOptions};

use softras_core::driver::{Clock, Driver, State};
use softras_core::util::buf::Buf2;

use crate::input::{Input, Motion};
use crate::{Dims, Error, dims::QHD_960_540};

/// A lightweight wrapper of a `minifb` window.
pub struct Window {
    /// The wrapped minifb window.
    pub imp: minifb::Window,
    /// The width and height of the window.
    pub dims: Dims,
}

/// Builder for creating `Window`s.
pub struct Builder<'title> {
    pub dims: Dims,
    pub title: &'title str,
    pub target_fps: Option<u32>,
    pub opts: WindowOptions,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self {
            dims: QHD_960_540,
            title: "// softras //",
            target_fps: Some(60),
            opts: WindowOptions::default(),
        }
    }
}

impl<'t> Builder<'t> {
    /// Sets the width and height of the window.
    pub fn dims(mut self, dims: Dims) -> Self {
        self.dims = dims;
        self
    }
    /// Sets the title of the window.
    pub fn title(mut self, title: &'t str) -> Self {
        self.title = title;
        self
    }
    /// Sets the frame rate cap of the window. `None` means unlimited
    /// frame rate (the main loop runs as fast as possible).
    pub fn target_fps(mut self, fps: Option<u32>) -> Self {
        self.target_fps = fps;
        self
    }
    /// Sets other `minifb` options.
    pub fn options(mut self, opts: WindowOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Creates the window.
    pub fn build(self) -> minifb::Result<Window> {
        let Self { dims, title, target_fps, opts } = self;
        let mut imp =
            minifb::Window::new(title, dims.0 as usize, dims.1 as usize, opts)?;
        if let Some(fps) = target_fps {
            imp.set_target_fps(fps as usize);
        }
        log::info!("created {}x{} minifb window", dims.0, dims.1);
        Ok(Window { imp, dims })
    }
}

impl Window {
    /// Returns a window builder.
    pub fn builder() -> Builder<'static> {
        Builder::default()
    }

    /// Updates the window content with the pixels in `buf` and polls
    /// for new input events.
    pub fn present(&mut self, buf: &Buf2<u32>) -> Result<(), Error> {
        let (w, h) = self.dims;
        self.imp
            .update_with_buffer(buf.data(), w as usize, h as usize)
            .map_err(|e| Error::Window(e.to_string()))
    }

    /// Runs the main loop, rendering one frame with `driver` per iteration.
    ///
    /// Starts `driver` if it has not been started yet, and quits it before
    /// returning. The main loop stops if:
    /// * the user closes the window via the GUI (e.g. titlebar close button);
    /// * the Esc key is pressed; or
    /// * the driver returns an error.
    pub fn run<C: Clock>(&mut self, driver: &mut Driver<C>) -> Result<(), Error> {
        let (w, h) = self.dims;
        let mut buf = Buf2::<u32>::new_default(w as usize, h as usize);
        let mut input = Input::new(driver.config().camera_speed);

        if driver.state() == State::Uninitialized {
            driver.start()?;
        }
        while !self.should_quit() {
            self.handle_keys(&mut input);
            driver.set_camera_velocity(input.velocity());
            driver.process(&mut buf)?;
            self.present(&buf)?;
        }
        driver.quit()?;
        Ok(())
    }

    fn handle_keys(&self, input: &mut Input) {
        let pressed = self.imp.get_keys_pressed(KeyRepeat::No);
        for m in pressed.into_iter().filter_map(motion) {
            input.press(m);
        }
        for m in self.imp.get_keys_released().into_iter().filter_map(motion) {
            input.release(m);
        }
    }

    fn should_quit(&self) -> bool {
        !self.imp.is_open() || self.imp.is_key_down(Key::Escape)
    }
}

fn motion(key: Key) -> Option<Motion> {
    Motion::from_key(match key {
        Key::W => 'w',
        Key::S => 's',
        Key::Q => 'q',
        Key::E => 'e',
        Key::A => 'a',
        Key::D => 'd',
        _ => return None,
    })
}
