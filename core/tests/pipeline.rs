use softras_core::prelude::*;

use softras_core::assert_approx_eq;
use softras_core::geom::vertex;
use softras_core::render::clip::{ClipVolume, clip_segment};
use softras_core::render::raster::{line, plot, tri_fill};

const CLEAR: u32 = 0xFF_22_22_33;

#[test]
fn clip_horizontal_segment_to_ndc() {
    let seg = [vec3::<Ndc>(-2.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0)];
    assert_eq!(
        clip_segment(seg, &ClipVolume::NDC),
        Some([vec3(-1.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)])
    );
}

#[test]
fn plot_on_first_column_is_rejected() {
    let mut buf = Buf2::<u32>::new_default(100, 100);
    assert!(!plot(&mut buf, 0, 5, 0xFF_FF_FF_FF));
    assert!(buf.iter().all(|&p| p == 0));
}

#[test]
fn line_between_identical_points() {
    let mut buf = Buf2::<u32>::new_default(10, 10);
    let p = vec3::<Screen>(4.0, 4.0, 0.0);
    let io = line(&mut buf, [p, p], 0xFF_FF_FF_FF);
    assert_eq!(io.o, 0);
    assert!(buf.iter().all(|&p| p == 0));
}

#[test]
fn filled_triangle_centroid_is_average_color() {
    let mut buf = Buf2::<u32>::new_default(400, 400);
    let tri = Tri([
        vertex(vec3::<Screen>(200.0, 200.0, 0.0), rgb(1.0, 0.0, 0.0)),
        vertex(vec3(250.0, 380.0, 0.0), rgb(0.0, 1.0, 0.0)),
        vertex(vec3(100.0, 275.0, 0.0), rgb(0.0, 0.0, 1.0)),
    ]);
    tri_fill(&mut buf, tri);

    let c = Color3::from_argb_u32(buf[[183, 285]]);
    for ch in c.0 {
        assert!((80..=89).contains(&ch), "{c:?}");
    }
}

#[test]
fn origin_maps_inside_framebuffer() {
    use softras_core::render::{ModelToView, W_EPSILON, project};
    use softras_core::scene::Camera;

    let (w, h) = (320.0, 200.0);
    let cam = Camera {
        pos: vec3(0.0, 0.0, -2.0),
        vel: vec3(0.0, 0.0, 0.0),
    };
    let mv: Mat4x4<ModelToView> = cam.world_to_view().to();
    let proj = perspective(core::f32::consts::FRAC_PI_4, w / h, 0.01..100.0);
    let mvp = mv.then_project(&proj.to());

    let ndc = project(&mvp, &vec3(0.0, 0.0, 0.0), W_EPSILON).unwrap();
    let vp: Mat4x4<softras_core::render::NdcToScreen> = viewport(w, h).to();
    let px = vp.apply(&ndc);

    assert_approx_eq!(px.x(), 160.0);
    assert_approx_eq!(px.y(), 100.0);
    assert!(-1.0 < px.z() && px.z() < 1.0, "{px:?}");
}

#[test]
fn camera_moves_one_unit_in_hundred_frames() {
    let mut d = Driver::new(Config::default(), SteppedClock::new(16));
    let mut buf = Buf2::<u32>::new_default(64, 48);
    d.start().unwrap();
    d.set_camera_velocity(vec3(0.0, 0.0, 0.01));

    let z0 = d.scene().camera.pos.z();
    for _ in 0..100 {
        d.process(&mut buf).unwrap();
    }
    let z1 = d.scene().camera.pos.z();
    assert_approx_eq!(z1 - z0, 1.0, eps = 1e-4);
    assert_eq!(d.scene().timing.frames, 100);
}

#[test]
fn failing_mesh_source_renders_background_and_axes() {
    let axis_colors = [0xFF_FF_00_00, 0xFF_00_FF_00, 0xFF_33_33_FF];
    let failing = || -> Result<Mesh, MeshError> {
        Err(MeshError::Unavailable("no such file".into()))
    };

    let mut d = Driver::new(Config::default(), SteppedClock::new(16))
        .with_mesh_source(failing);
    let mut buf = Buf2::<u32>::new_default(64, 48);
    d.start().unwrap();
    d.process(&mut buf).unwrap();

    assert!(buf.iter().all(|p| *p == CLEAR || axis_colors.contains(p)));
    assert!(buf.iter().any(|p| axis_colors.contains(p)));

    let cfg = Config::default().draw_axes(false);
    let mut d = Driver::new(cfg, SteppedClock::new(16)).with_mesh_source(failing);
    d.start().unwrap();
    d.process(&mut buf).unwrap();
    assert!(buf.iter().all(|&p| p == CLEAR));
}

#[test]
fn first_row_and_column_are_never_written() {
    // Camera right in front of the cube, so that it covers the whole view
    let cfg = Config::default()
        .camera_pos(vec3(0.0, -0.5, -0.6))
        .draw_axes(false);
    let mut d = Driver::new(cfg, SteppedClock::new(16)).with_mesh_source(Cube);
    let mut buf = Buf2::<u32>::new_default(40, 30);
    d.start().unwrap();
    d.process(&mut buf).unwrap();

    assert!(buf[0].iter().all(|&p| p == CLEAR));
    assert!(buf.rows().all(|row| row[0] == CLEAR));
    // Everything else is covered
    assert!(buf.rows().skip(1).all(|row| row[1..].iter().all(|&p| p != CLEAR)));
}

#[test]
fn render_into_borrowed_strided_buffer() {
    let (w, h, stride) = (30, 20, 32);
    let mut data = vec![0u32; stride * h];
    let mut d = Driver::new(Config::default(), SteppedClock::new(16))
        .with_mesh_source(Cube);
    d.start().unwrap();
    {
        let mut buf = MutSlice2::new(w, h, stride, &mut data).unwrap();
        d.process(&mut buf).unwrap();
    }
    // Padding between rows is untouched
    for row in data.chunks(stride) {
        assert!(row[..w].iter().all(|&p| p != 0));
        assert!(row[w..].iter().all(|&p| p == 0));
    }
    assert!(d.stats().pixels.o > 0);
}

#[test]
fn invalid_buffer_is_rejected() {
    let mut data = [0u32; 10];
    assert_eq!(
        MutSlice2::new(4, 3, 4, &mut data).map(|_| ()),
        Err(Error::InvalidBuffer { w: 4, h: 3, stride: 4, len: 10 })
    );
    assert!(MutSlice2::new(4, 2, 3, &mut data).is_err());
}

#[test]
fn lifecycle_errors() {
    let mut d = Driver::new(Config::default(), SteppedClock::new(16));
    let mut buf = Buf2::<u32>::new_default(8, 8);

    assert_eq!(
        d.process(&mut buf),
        Err(Error::InvalidState { op: "process", state: State::Uninitialized })
    );
    d.start().unwrap();
    assert!(d.start().is_err());
    d.process(&mut buf).unwrap();
    d.quit().unwrap();
    assert_eq!(
        d.process(&mut buf),
        Err(Error::InvalidState { op: "process", state: State::Stopped })
    );
    assert_eq!(d.scene().timing.frames, 1);
}

#[test]
fn flat_mesh_with_bad_length() {
    assert_eq!(
        Mesh::from_flat(&[0.0; 8]),
        Err(MeshError::NotTriangles { len: 8 })
    );
}

#[test]
fn frame_as_ppm() {
    use softras_core::util::pnm::write_ppm;

    let mut d = Driver::new(Config::default(), SteppedClock::new(16))
        .with_mesh_source(Cube);
    let mut buf = Buf2::<u32>::new_default(32, 24);
    d.start().unwrap();
    d.process(&mut buf).unwrap();

    let mut out = Vec::new();
    write_ppm(&mut out, &buf).unwrap();

    let header = b"P6 32 24 255\n";
    assert_eq!(&out[..header.len()], header);
    assert_eq!(out.len(), header.len() + 32 * 24 * 3);
    // Top left pixel is the background
    assert_eq!(&out[header.len()..][..3], &[0x22, 0x22, 0x33]);
}
