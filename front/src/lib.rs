//! Frontends for running the `softras` renderer in a window.
//!
//! A frontend owns the window and the pixel buffer. Its `run` method starts
//! a [`Driver`][softras_core::driver::Driver], then on every iteration of
//! the main loop feeds the keyboard state to the driver as camera velocity,
//! lets the driver render a frame into the buffer, and presents the buffer.

use core::fmt::{self, Display, Formatter};

pub mod input;
pub mod logging;

#[cfg(feature = "minifb")]
pub mod minifb;

#[cfg(feature = "sdl2")]
pub mod sdl2;

/// Width and height of a window, in pixels.
pub type Dims = (u32, u32);

pub mod dims {
    use super::Dims;

    pub const SVGA_800_600: Dims = (800, 600);
    pub const QHD_960_540: Dims = (960, 540);
    pub const HD_1280_720: Dims = (1280, 720);
}

/// Errors that can stop a frontend main loop.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The driver was used incorrectly.
    Core(softras_core::Error),
    /// The windowing library reported an error.
    Window(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(e) => write!(f, "renderer error: {e}"),
            Self::Window(msg) => write!(f, "window error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<softras_core::Error> for Error {
    fn from(e: softras_core::Error) -> Self {
        Self::Core(e)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Self::Window(msg)
    }
}

#[cfg(test)]
mod tests {
    use softras_core::driver::State;

    use super::*;

    #[test]
    fn error_display() {
        let e: Error = softras_core::Error::InvalidState {
            op: "quit",
            state: State::Stopped,
        }
        .into();
        assert_eq!(e.to_string(), "renderer error: cannot quit while Stopped");

        let e = Error::from("no display".to_string());
        assert_eq!(e.to_string(), "window error: no display");
    }
}
