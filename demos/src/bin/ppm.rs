//! Renders frames without a window and saves the last one as a PPM file.
//!
//! Usage: `ppm [OUTPUT] [FRAMES] [MESH]`
//!
//! `MESH` is an optional text file of whitespace-separated floats, nine per
//! triangle. Without it, a cube is rendered.

use std::{env, fs};

use sr::prelude::*;
use sr::util::pnm::save_ppm;

use sr_front::logging;

/// Reads a mesh from a file of whitespace-separated floats.
fn load_mesh(path: &str) -> Result<Mesh, MeshError> {
    let text = fs::read_to_string(path)
        .map_err(|e| MeshError::Unavailable(format!("{path}: {e}")))?;
    let coords = text
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|e| MeshError::Unavailable(format!("{path}: {e}")))?;
    Mesh::from_flat(&coords)
}

fn main() {
    logging::init();

    let mut args = env::args().skip(1);
    let out = args.next().unwrap_or_else(|| "cube.ppm".into());
    let frames: u32 = args
        .next()
        .map(|n| n.parse().expect("frame count should be a number"))
        .unwrap_or(30);
    let mesh = args.next();

    // 60 fps
    let clock = SteppedClock::new(16);
    let driver = Driver::new(Config::default(), clock);
    let mut driver = match mesh {
        Some(path) => driver.with_mesh_source(move || load_mesh(&path)),
        None => driver.with_mesh_source(Cube),
    };

    let mut buf = Buf2::<u32>::new_default(640, 480);
    driver.start().unwrap();
    for _ in 0..frames {
        driver.process(&mut buf).unwrap();
    }
    driver.quit().unwrap();

    save_ppm(&out, &buf).unwrap();
}
