//! PPM (binary NetPBM pixmap) output.
//!
//! PPM is an extremely simple image format: a short textual header
//! followed by raw 8-bit RGB triplets. It is handy for dumping rendered
//! frames to disk without pulling in an image codec.

use core::fmt::{self, Display, Formatter};
use core::ops::Deref;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::math::color::Color3;
use crate::util::buf::inner::Inner;

/// The header of a P6 image.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Header {
    width: usize,
    height: usize,
    max: u16,
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self { width, height, max } = *self;
        write!(f, "P6 {width} {height} {max}")
    }
}

/// Saves a buffer of `0xAA_RR_GG_BB` pixels to a file in binary PPM
/// format. Alpha is discarded.
///
/// Caution: This function overwrites the file if it already exists.
/// Use [`write_ppm`] for more control over file creation.
///
/// # Errors
/// Returns [`std::io::Error`] if an error occurs while writing.
pub fn save_ppm<D>(path: impl AsRef<Path>, data: &Inner<u32, D>) -> io::Result<()>
where
    D: Deref<Target = [u32]>,
{
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_ppm(&mut out, data)?;
    out.flush()?;
    log::info!(
        "wrote {}x{} image to {}",
        data.width(),
        data.height(),
        path.display()
    );
    Ok(())
}

/// Writes a buffer of `0xAA_RR_GG_BB` pixels to `out` in PPM format,
/// P6 sub-format (binary 8-bits-per-channel RGB). Alpha is discarded.
///
/// # Errors
/// Returns [`std::io::Error`] if an error occurs while writing.
pub fn write_ppm<D>(mut out: impl Write, data: &Inner<u32, D>) -> io::Result<()>
where
    D: Deref<Target = [u32]>,
{
    let header = Header {
        width: data.width(),
        height: data.height(),
        max: 255,
    };
    writeln!(out, "{header}")?;

    data.iter()
        .map(|&argb| Color3::from_argb_u32(argb).0)
        .try_for_each(|rgb| out.write_all(&rgb))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::util::buf::{Buf2, MutSlice2};

    use super::*;

    #[test]
    fn header_display() {
        let h = Header { width: 16, height: 8, max: 255 };
        assert_eq!(alloc::format!("{h}"), "P6 16 8 255");
    }

    #[test]
    fn write_ppm_discards_alpha() {
        let buf = Buf2::new(
            2,
            2,
            [0xFF_FF_00_00, 0x00_00_FF_00, 0x80_00_00_FF, 0xFF_FF_FF_00],
        );

        let mut out = vec![];
        write_ppm(&mut out, &buf).unwrap();

        assert_eq!(
            &out,
            b"P6 2 2 255\n\
              \xFF\x00\x00\
              \x00\xFF\x00\
              \x00\x00\xFF\
              \xFF\xFF\x00"
        );
    }

    #[test]
    fn write_ppm_skips_row_padding() {
        let mut data = [0xFF_11_22_33, 0xFF_44_55_66, 0xFF_FF_FF_FF, 0xFF_77_88_99];
        let slice = MutSlice2::new(1, 2, 3, &mut data[..]).unwrap();

        let mut out = vec![];
        write_ppm(&mut out, &slice).unwrap();

        assert_eq!(&out, b"P6 1 2 255\n\x11\x22\x33\x77\x88\x99");
    }
}
