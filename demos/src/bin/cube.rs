use sr::prelude::*;

use sr_front::{dims, logging, minifb::Window};

fn main() {
    logging::init();

    let mode = if std::env::args().any(|a| a == "--wire") {
        Mode::Wireframe
    } else {
        Mode::Fill
    };
    let cfg = Config::default().mode(mode);

    let mut win = Window::builder()
        .title("softras // cube")
        .dims(dims::QHD_960_540)
        .build()
        .expect("should create window");

    let mut driver =
        Driver::new(cfg, SystemClock::new()).with_mesh_source(Cube);

    if let Err(e) = win.run(&mut driver) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
