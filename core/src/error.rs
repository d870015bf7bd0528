//! The crate error type.

use core::fmt::{self, Display, Formatter};

use crate::driver::State;

/// Error returned by the frame driver and by buffer constructors.
///
/// Degenerate geometry is never an error: primitives that cannot be
/// projected or that are clipped away are skipped and logged instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A driver operation was called in a state that does not permit it.
    /// The driver state is left unchanged.
    InvalidState {
        /// The name of the operation.
        op: &'static str,
        /// The state the driver was in.
        state: State,
    },
    /// The dimensions of a 2D buffer do not fit its backing slice.
    InvalidBuffer {
        w: usize,
        h: usize,
        stride: usize,
        len: usize,
    },
    /// A configuration value is out of its valid range.
    InvalidConfig {
        /// The name of the offending [`Config`][crate::config::Config] field.
        field: &'static str,
    },
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState { op, state } => {
                write!(f, "cannot {op} while {state:?}")
            }
            Self::InvalidBuffer { w, h, stride, len } => write!(
                f,
                "buffer of length {len} cannot hold {w}x{h} elements \
                 with stride {stride}"
            ),
            Self::InvalidConfig { field } => {
                write!(f, "invalid configuration value: {field}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn error_display() {
        let e = Error::InvalidState { op: "process", state: State::Stopped };
        assert_eq!(e.to_string(), "cannot process while Stopped");

        let e = Error::InvalidBuffer { w: 4, h: 3, stride: 2, len: 12 };
        assert_eq!(
            e.to_string(),
            "buffer of length 12 cannot hold 4x3 elements with stride 2"
        );

        let e = Error::InvalidConfig { field: "near_far" };
        assert_eq!(e.to_string(), "invalid configuration value: near_far");
    }
}
