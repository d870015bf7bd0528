use sr::prelude::*;

use sr_front::{logging, sdl2::Window};

fn main() {
    logging::init();

    let mut win = Window::builder()
        .title("softras // cube")
        .dims(960, 540)
        .build()
        .expect("should create window");

    let mut driver = Driver::new(Config::default(), SystemClock::new())
        .with_mesh_source(Cube);

    if let Err(e) = win.run(&mut driver) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
