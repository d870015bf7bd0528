//! Frontend using the `sdl2` crate for window creation and event handling.

use sdl2::{
    EventPump,
    event::Event,
    keyboard::Keycode,
    pixels::PixelFormatEnum,
    render::{Texture, WindowCanvas},
};

use softras_core::driver::{Clock, Driver, State};
use softras_core::util::buf::Buf2;

use crate::input::{Input, Motion};
use crate::{Dims, Error, dims};

/// A lightweight wrapper of an `SDL2` window.
pub struct Window {
    /// The SDL canvas.
    pub canvas: WindowCanvas,
    /// The SDL event pump.
    pub ev_pump: EventPump,
    /// The width and height of the window.
    pub dims: Dims,
}

/// Builder for creating `Window`s.
pub struct Builder<'title> {
    pub dims: Dims,
    pub title: &'title str,
    pub vsync: bool,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self {
            dims: dims::QHD_960_540,
            title: "// softras //",
            vsync: true,
        }
    }
}

impl<'t> Builder<'t> {
    /// Sets the width and height of the window.
    pub fn dims(mut self, w: u32, h: u32) -> Self {
        self.dims = (w, h);
        self
    }
    /// Sets the title of the window.
    pub fn title(mut self, title: &'t str) -> Self {
        self.title = title;
        self
    }
    /// Sets whether vertical sync is enabled.
    ///
    /// If true, frame rate is tied to the monitor's refresh rate.
    pub fn vsync(mut self, enabled: bool) -> Self {
        self.vsync = enabled;
        self
    }

    /// Creates the window.
    pub fn build(self) -> Result<Window, String> {
        let Self { dims, title, vsync } = self;

        let sdl = sdl2::init()?;

        let mut canvas = sdl
            .video()?
            .window(title, dims.0, dims.1)
            .build()
            .map_err(|e| e.to_string())?
            .into_canvas();

        if vsync {
            canvas = canvas.present_vsync();
        }

        let canvas = canvas
            .accelerated()
            .build()
            .map_err(|e| e.to_string())?;

        let ev_pump = sdl.event_pump()?;

        log::info!("created {}x{} SDL2 window", dims.0, dims.1);
        Ok(Window { canvas, ev_pump, dims })
    }
}

impl Window {
    /// Returns a window builder.
    pub fn builder() -> Builder<'static> {
        Builder::default()
    }

    /// Copies `tex` to the window and shows it.
    pub fn present(&mut self, tex: &Texture) -> Result<(), String> {
        self.canvas.copy(tex, None, None)?;
        self.canvas.present();
        Ok(())
    }

    /// Runs the main loop, rendering one frame with `driver` per iteration.
    ///
    /// Starts `driver` if it has not been started yet, and quits it before
    /// returning. The main loop stops if:
    /// * the user closes the window via the GUI (e.g. title bar close button);
    /// * the Esc key is pressed; or
    /// * the driver returns an error.
    pub fn run<C: Clock>(&mut self, driver: &mut Driver<C>) -> Result<(), Error> {
        let (w, h) = self.dims;

        let tc = self.canvas.texture_creator();
        let mut tex = tc
            .create_texture_streaming(PixelFormatEnum::ARGB8888, w, h)
            .map_err(|e| e.to_string())?;

        let mut buf = Buf2::<u32>::new_default(w as usize, h as usize);
        let mut input = Input::new(driver.config().camera_speed);

        if driver.state() == State::Uninitialized {
            driver.start()?;
        }
        'main: loop {
            for e in self.ev_pump.poll_iter() {
                match e {
                    Event::Quit { .. }
                    | Event::KeyDown {
                        keycode: Some(Keycode::Escape), ..
                    } => break 'main,
                    Event::KeyDown {
                        keycode: Some(k), repeat: false, ..
                    } => {
                        if let Some(m) = motion(k) {
                            input.press(m);
                        }
                    }
                    Event::KeyUp { keycode: Some(k), .. } => {
                        if let Some(m) = motion(k) {
                            input.release(m);
                        }
                    }
                    _ => (),
                }
            }
            driver.set_camera_velocity(input.velocity());
            driver.process(&mut buf)?;

            tex.with_lock(None, |bytes, pitch| {
                // ARGB8888 is stored as B, G, R, A on little-endian targets
                for (dst, src) in bytes.chunks_mut(pitch).zip(buf.rows()) {
                    for (d, s) in dst.chunks_exact_mut(4).zip(src) {
                        d.copy_from_slice(&s.to_ne_bytes());
                    }
                }
            })?;
            self.present(&tex)?;
        }
        driver.quit()?;
        Ok(())
    }
}

fn motion(key: Keycode) -> Option<Motion> {
    Motion::from_key(match key {
        Keycode::W => 'w',
        Keycode::S => 's',
        Keycode::Q => 'q',
        Keycode::E => 'e',
        Keycode::A => 'a',
        Keycode::D => 'd',
        _ => return None,
    })
}
