//! Translation of vector shapes into discrete pixels in the render target.
//!
//! The rasterizer works in screen space: x grows to the right and y grows
//! downwards, one unit per pixel. Lines are drawn with a digital
//! differential analyzer (DDA) that takes one unit-length step along the
//! major axis per pixel. Triangles are split into an upper and a lower
//! half at the middle vertex and filled one *scanline* (horizontal span of
//! pixels) at a time, interpolating the vertex colors linearly first down
//! the edges and then across each span.
//!
//! ```text
//!          p0
//!          /\          <- upper half, short edge p0–p1
//!         /  \
//!        /  __p1
//!       / __/          <- lower half, short edge p1–p2
//!     p2
//! ```
//!
//! All primitives write pixels through [`plot`], which never touches the
//! first row or the first column of the target.

use core::ops::Range;

use crate::geom::{Tri, Vertex};
use crate::math::{Color3f, Vec3, float};
use crate::render::stats::Throughput;
use crate::render::target::Target;

/// Line lengths, in pixels, at or below which a line is not drawn.
pub const STEP_EPSILON: f32 = 1e-6;

/// Heights and widths, in pixels, at or below which a triangle or a part
/// of it is treated as degenerate.
pub const SPAN_EPSILON: f32 = 1e-6;

/// Writes the color `argb` to the pixel (x, y) of `target`.
///
/// Returns whether the pixel was written. Pixels outside the target are
/// rejected, and so are those on the first row or column (x = 0 or y = 0).
///
/// # Examples
/// ```
/// use softras_core::render::raster::plot;
/// use softras_core::util::buf::Buf2;
///
/// let mut buf = Buf2::<u32>::new_default(4, 4);
/// assert!(plot(&mut buf, 3, 2, 0xFF_FF_00_00));
/// assert!(!plot(&mut buf, 0, 2, 0xFF_FF_00_00));
/// assert!(!plot(&mut buf, 4, 2, 0xFF_FF_00_00));
/// assert_eq!(buf[[3, 2]], 0xFF_FF_00_00);
/// ```
pub fn plot(target: &mut impl Target, x: i32, y: i32, argb: u32) -> bool {
    let (w, h) = (target.width(), target.height());
    if x <= 0 || y <= 0 || x as usize >= w || y as usize >= h {
        return false;
    }
    target.put(x as usize, y as usize, argb);
    true
}

/// Draws a one-pixel-thick line from `a` to `b`.
///
/// Takes `ceil(n)` unit steps along the major axis, where `n` is the
/// number of pixels the line spans on that axis, and plots the pixel
/// nearest to each step. The far endpoint is thus not plotted unless the
/// length has a fractional part. The z coordinates are ignored.
///
/// Returns the number of pixels attempted and written.
pub fn line<B>(
    target: &mut impl Target,
    [a, b]: [Vec3<B>; 2],
    argb: u32,
) -> Throughput {
    use float::f32 as fp;

    let (dx, dy) = (b.x() - a.x(), b.y() - a.y());
    let step = fp::abs(dx).max(fp::abs(dy));
    let mut io = Throughput::default();

    if !step.is_finite() || step <= STEP_EPSILON {
        log::debug!("skipping degenerate line {a:?}–{b:?}");
        return io;
    }
    let (dx, dy) = (dx / step, dy / step);
    let (mut x, mut y) = (a.x(), a.y());

    for _ in 0..fp::ceil(step) as usize {
        io.i += 1;
        if plot(target, fp::round(x) as i32, fp::round(y) as i32, argb) {
            io.o += 1;
        }
        x += dx;
        y += dy;
    }
    io
}

/// Draws the outline of a triangle as three lines.
pub fn tri_wire<B>(
    target: &mut impl Target,
    Tri([a, b, c]): Tri<Vec3<B>>,
    argb: u32,
) -> Throughput {
    let mut io = line(target, [a, b], argb);
    io += line(target, [b, c], argb);
    io += line(target, [c, a], argb);
    io
}

/// Fills a triangle, linearly interpolating the vertex colors.
///
/// The covered rows are those from `ceil(y0)` through `floor(y2)`, where
/// y0 and y2 are the topmost and bottommost vertex y coordinates. On each
/// row, the covered columns are from `ceil(xl)` through `floor(xr)`, where
/// xl and xr are where the row meets the left and right edges. The result
/// does not depend on the order of the vertices. The z coordinates are
/// ignored; interpolation is affine in screen space.
///
/// Returns the number of pixels attempted and written.
pub fn tri_fill<B>(
    target: &mut impl Target,
    Tri(verts): Tri<Vertex<Vec3<B>, Color3f>>,
) -> Throughput {
    use float::f32 as fp;

    let mut io = Throughput::default();

    let mut vs = verts.map(|v| (v.pos.x(), v.pos.y(), v.attrib));
    vs.sort_by(|(ax, ay, _), (bx, by, _)| {
        ay.total_cmp(by).then(ax.total_cmp(bx))
    });
    let [p0, p1, p2] = vs;

    let long_h = p2.1 - p0.1;
    if !(long_h > SPAN_EPSILON) {
        log::trace!("skipping zero-height triangle at y={}", p0.1);
        return io;
    }
    let (w, h) = (target.width(), target.height());

    // Point at relative position t along the edge from p to q
    let along = |p: (f32, f32, Color3f), q: (f32, f32, Color3f), t: f32| {
        (p.0 + (q.0 - p.0) * t, p.2.lerp(&q.2, t))
    };

    let halves = [
        (p0, p1, clamp(fp::ceil(p0.1), fp::ceil(p1.1), h)),
        (p1, p2, clamp(fp::ceil(p1.1), fp::floor(p2.1) + 1.0, h)),
    ];
    for (top, bot, rows) in halves {
        let short_h = bot.1 - top.1;
        if !(short_h > SPAN_EPSILON) {
            continue;
        }
        for y in rows {
            let yf = y as f32;
            let long = along(p0, p2, (yf - p0.1) / long_h);
            let short = along(top, bot, (yf - top.1) / short_h);

            let ((xl, cl), (xr, cr)) = if long.0 <= short.0 {
                (long, short)
            } else {
                (short, long)
            };
            let span = xr - xl;

            for x in clamp(fp::ceil(xl), fp::floor(xr) + 1.0, w) {
                let t = if span > SPAN_EPSILON {
                    (x as f32 - xl) / span
                } else {
                    0.0
                };
                let argb = cl.lerp(&cr, t).to_argb_u32();
                io.i += 1;
                if plot(target, x as i32, y as i32, argb) {
                    io.o += 1;
                }
            }
        }
    }
    io
}

/// Returns the integers in `lo..hi` that are also less than `max`.
///
/// Both `lo` and `hi` must be integral.
fn clamp(lo: f32, hi: f32, max: usize) -> Range<usize> {
    let lo = lo.max(0.0);
    let hi = hi.min(max as f32);
    if lo < hi {
        lo as usize..hi as usize
    } else {
        0..0
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use crate::geom::vertex;
    use crate::math::{rgb, vec3};
    use crate::util::buf::Buf2;

    use super::*;

    const RED: u32 = 0xFF_FF_00_00;

    fn buf(w: usize, h: usize) -> Buf2<u32> {
        Buf2::<u32>::new_default(w, h)
    }

    fn mask(buf: &Buf2<u32>) -> String {
        let mut s = String::new();
        for row in buf.rows() {
            s.extend(row.iter().map(|&p| if p == 0 { '.' } else { '#' }));
            s.push('\n');
        }
        s
    }

    fn pt(x: f32, y: f32) -> Vec3 {
        vec3(x, y, 0.0)
    }

    fn rgb_tri(
        [a, b, c]: [(f32, f32); 3],
    ) -> Tri<Vertex<Vec3, Color3f>> {
        Tri([
            vertex(pt(a.0, a.1), rgb(1.0, 0.0, 0.0)),
            vertex(pt(b.0, b.1), rgb(0.0, 1.0, 0.0)),
            vertex(pt(c.0, c.1), rgb(0.0, 0.0, 1.0)),
        ])
    }

    #[test]
    fn plot_rejects_first_row_and_column() {
        let mut b = buf(100, 100);
        assert!(!plot(&mut b, 0, 5, RED));
        assert!(!plot(&mut b, 5, 0, RED));
        assert!(!plot(&mut b, -3, 5, RED));
        assert!(!plot(&mut b, 100, 5, RED));
        assert!(!plot(&mut b, 5, 100, RED));
        assert!(b.data().iter().all(|&p| p == 0));

        assert!(plot(&mut b, 1, 1, RED));
        assert!(plot(&mut b, 99, 99, RED));
        assert_eq!(b[[1, 1]], RED);
        assert_eq!(b[[99, 99]], RED);
    }

    #[test]
    fn line_between_identical_points_plots_nothing() {
        let mut b = buf(8, 8);
        let io = line(&mut b, [pt(3.0, 3.0), pt(3.0, 3.0)], RED);
        assert_eq!(io, Throughput::default());
        assert!(b.data().iter().all(|&p| p == 0));
    }

    #[test]
    fn line_with_non_finite_endpoint_plots_nothing() {
        let mut b = buf(8, 8);
        let io = line(&mut b, [pt(3.0, 3.0), pt(f32::INFINITY, 3.0)], RED);
        assert_eq!(io.o, 0);
        let io = line(&mut b, [pt(f32::NAN, 3.0), pt(5.0, 3.0)], RED);
        assert_eq!(io.o, 0);
    }

    #[test]
    fn line_shallow_slope() {
        let mut b = buf(8, 8);
        let io = line(&mut b, [pt(1.0, 1.0), pt(6.0, 4.0)], RED);
        assert_eq!(io, Throughput { i: 5, o: 5 });
        assert_eq!(
            mask(&b),
            "........\n\
             .#......\n\
             ..##....\n\
             ....##..\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n"
        );
    }

    #[test]
    fn line_steep_slope_is_symmetric_to_shallow() {
        let mut b = buf(8, 8);
        line(&mut b, [pt(1.0, 1.0), pt(4.0, 6.0)], RED);
        assert_eq!(
            mask(&b),
            "........\n\
             .#......\n\
             ..#.....\n\
             ..#.....\n\
             ...#....\n\
             ...#....\n\
             ........\n\
             ........\n"
        );
    }

    #[test]
    fn diagonal_line_skips_origin() {
        let mut b = buf(8, 8);
        let io = line(&mut b, [pt(0.0, 0.0), pt(7.0, 7.0)], RED);
        assert_eq!(io, Throughput { i: 7, o: 6 });
        for i in 1..7 {
            assert_eq!(b[[i, i]], RED, "pixel ({i}, {i})");
        }
        assert_eq!(b[[0, 0]], 0);
        assert_eq!(b[[7, 7]], 0);
    }

    #[test]
    fn line_far_outside_plots_nothing() {
        let mut b = buf(8, 8);
        let io = line(&mut b, [pt(-20.0, 3.0), pt(-10.0, 5.0)], RED);
        assert_eq!(io.o, 0);
        assert!(b.data().iter().all(|&p| p == 0));
    }

    #[test]
    fn wireframe_draws_three_edges() {
        let mut b = buf(8, 8);
        let io = tri_wire(
            &mut b,
            Tri([pt(1.0, 1.0), pt(6.0, 1.0), pt(1.0, 6.0)]),
            RED,
        );
        assert_eq!(io.o, 15);
        assert_eq!(
            mask(&b),
            "........\n\
             .######.\n\
             .#...#..\n\
             .#..#...\n\
             .#.#....\n\
             .##.....\n\
             .#......\n\
             ........\n"
        );
    }

    #[test]
    fn fill_right_triangle() {
        let mut b = buf(8, 8);
        let io = tri_fill(&mut b, rgb_tri([(1.0, 1.0), (6.0, 1.0), (1.0, 6.0)]));
        assert_eq!(io, Throughput { i: 21, o: 21 });
        assert_eq!(
            mask(&b),
            "........\n\
             .######.\n\
             .#####..\n\
             .####...\n\
             .###....\n\
             .##.....\n\
             .#......\n\
             ........\n"
        );
        // Corners take the vertex colors exactly
        assert_eq!(b[[1, 1]], 0xFF_FF_00_00);
        assert_eq!(b[[6, 1]], 0xFF_00_FF_00);
        assert_eq!(b[[1, 6]], 0xFF_00_00_FF);
    }

    #[test]
    fn fill_never_writes_first_row_or_column() {
        let mut b = buf(8, 8);
        tri_fill(&mut b, rgb_tri([(-4.0, -4.0), (12.0, -2.0), (-2.0, 12.0)]));
        assert!(b.rows().next().unwrap().iter().all(|&p| p == 0));
        assert!(b.rows().all(|row| row[0] == 0));
        assert_eq!(b[[1, 1]] >> 24, 0xFF);
    }

    #[test]
    fn fill_zero_height_draws_nothing() {
        let mut b = buf(8, 8);
        let io = tri_fill(&mut b, rgb_tri([(1.0, 3.0), (6.0, 3.0), (3.0, 3.0)]));
        assert_eq!(io, Throughput::default());
        assert!(b.data().iter().all(|&p| p == 0));
    }

    #[test]
    fn fill_is_invariant_under_vertex_permutation() {
        let [a, b, c] = [(200.0, 200.0), (250.0, 380.0), (100.0, 275.0)];
        let perms = [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]];

        let pixel_set = |tri: [(f32, f32); 3]| {
            let mut buf = buf(400, 400);
            tri_fill(&mut buf, rgb_tri(tri));
            buf.data().iter().map(|&p| p != 0).collect::<Vec<_>>()
        };
        let expected = pixel_set(perms[0]);
        assert_eq!(expected.iter().filter(|&&p| p).count(), 10901);
        for p in &perms[1..] {
            assert!(pixel_set(*p) == expected, "permutation {p:?}");
        }
    }

    #[test]
    fn fill_centroid_is_average_color() {
        let mut b = buf(400, 400);
        let io = tri_fill(
            &mut b,
            rgb_tri([(200.0, 200.0), (250.0, 380.0), (100.0, 275.0)]),
        );
        assert_eq!(io.o, 10901);

        // Centroid at (183.3, 285)
        let px = b[[183, 285]];
        assert_eq!(px >> 24, 0xFF);
        let [r, g, bl] = [16, 8, 0].map(|s| ((px >> s) & 0xFF) as i32);
        for (ch, expected) in [(r, 84), (g, 84), (bl, 85)] {
            assert!((ch - expected).abs() <= 4, "{px:#010X}");
        }
    }

    #[test]
    fn fill_far_off_screen_is_clamped() {
        let mut b = buf(8, 8);
        let io = tri_fill(
            &mut b,
            rgb_tri([(-1e6, -1e6), (1e6, -1e6), (0.0, 1e6)]),
        );
        // Every attempt lies inside the 8×8 target
        assert!(io.i <= 64);
        assert_eq!(io.o, 49);
    }
}
