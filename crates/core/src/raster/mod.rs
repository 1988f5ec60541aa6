use serde::{Deserialize, Serialize};

/// Screen-space coordinate. Y grows downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, other: PixelPoint, t: f32) -> PixelPoint {
        PixelPoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Digital differential analyzer.
///
/// Steps along the axis of greatest delta, taking `ceil(max(|dx|, |dy|))`
/// steps, and rounds every sample to the nearest pixel. The output holds
/// `steps + 1` points including both (rounded) endpoints, even for spans
/// shorter than a pixel. Identical endpoints produce a single point.
///
/// `line_dda(a, b)` is not guaranteed to equal the reverse of
/// `line_dda(b, a)`: samples that land exactly on a half pixel round away from
/// zero regardless of the walking direction.
pub fn line_dda(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<PixelPoint> {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let steps = dx.abs().max(dy.abs()).ceil();

    if steps == 0.0 {
        return vec![PixelPoint::new(x1.round(), y1.round())];
    }

    let x_inc = dx / steps;
    let y_inc = dy / steps;
    let count = steps as usize;

    let mut points = Vec::with_capacity(count + 1);
    for k in 0..=count {
        let k = k as f32;
        points.push(PixelPoint::new(
            (x1 + x_inc * k).round(),
            (y1 + y_inc * k).round(),
        ));
    }
    points
}

/// Integer-error Bresenham line. Inputs are truncated towards zero first.
///
/// Produces an 8-connected path that ends exactly on the (truncated) end
/// point.
pub fn line_bresenham(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<PixelPoint> {
    let (mut x, mut y) = (x1 as i32, y1 as i32);
    let (x_end, y_end) = (x2 as i32, y2 as i32);

    let dx = (x_end - x).abs();
    let dy = (y_end - y).abs();
    let sx = if x < x_end { 1 } else { -1 };
    let sy = if y < y_end { 1 } else { -1 };
    let mut err = dx - dy;

    let mut points = Vec::with_capacity(dx.max(dy) as usize + 1);
    loop {
        points.push(PixelPoint::new(x as f32, y as f32));
        if x == x_end && y == y_end {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// Midpoint circle outline around `(cx, cy)`.
///
/// Walks one octant and mirrors each sample into the eight symmetric points,
/// so the result contains duplicates on the octant boundaries. A radius of
/// zero yields eight copies of the center.
pub fn circle_midpoint(cx: f32, cy: f32, radius: f32) -> Vec<PixelPoint> {
    let mut x = 0i32;
    let mut y = radius as i32;
    let mut p = 1 - y;

    let mut points = Vec::with_capacity(8 * (y.max(0) as usize + 1));
    plot_octants(&mut points, cx, cy, x, y);

    while x < y {
        x += 1;
        if p < 0 {
            p += 2 * x + 1;
        } else {
            y -= 1;
            p += 2 * (x - y) + 1;
        }
        plot_octants(&mut points, cx, cy, x, y);
    }
    points
}

fn plot_octants(points: &mut Vec<PixelPoint>, cx: f32, cy: f32, x: i32, y: i32) {
    let (x, y) = (x as f32, y as f32);
    points.extend_from_slice(&[
        PixelPoint::new(cx + x, cy + y),
        PixelPoint::new(cx - x, cy + y),
        PixelPoint::new(cx + x, cy - y),
        PixelPoint::new(cx - x, cy - y),
        PixelPoint::new(cx + y, cy + x),
        PixelPoint::new(cx - y, cy + x),
        PixelPoint::new(cx + y, cy - x),
        PixelPoint::new(cx - y, cy - x),
    ]);
}

/// Rasterizes every edge of a vertex ring with Bresenham, wrapping from the
/// last vertex back to the first.
///
/// A closed polygon (first == last) contributes one extra zero-length edge,
/// which emits a single duplicate pixel.
pub fn polygon_outline(vertices: &[PixelPoint]) -> Vec<PixelPoint> {
    let mut points = Vec::new();
    for (i, start) in vertices.iter().enumerate() {
        let end = vertices[(i + 1) % vertices.len()];
        points.extend(line_bresenham(start.x, start.y, end.x, end.y));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(points: &[PixelPoint], x: f32, y: f32) -> bool {
        points.iter().any(|p| p.x == x && p.y == y)
    }

    #[test]
    fn dda_point_count_and_endpoints() {
        let cases: [(i32, i32, i32, i32); 6] = [
            (0, 0, 5, 0),
            (0, 0, 0, -7),
            (3, 4, -6, 9),
            (-10, -10, 10, 10),
            (2, 1, 13, 5),
            (7, 7, 1, -12),
        ];
        for (x1, y1, x2, y2) in cases {
            let points = line_dda(x1 as f32, y1 as f32, x2 as f32, y2 as f32);
            let expected = (x2 - x1).abs().max((y2 - y1).abs()) as usize + 1;
            assert_eq!(points.len(), expected, "case {:?}", (x1, y1, x2, y2));
            assert_eq!(points[0], PixelPoint::new(x1 as f32, y1 as f32));
            assert_eq!(
                *points.last().unwrap(),
                PixelPoint::new(x2 as f32, y2 as f32)
            );
        }
    }

    #[test]
    fn dda_degenerate_line_is_single_point() {
        let points = line_dda(3.4, 8.6, 3.4, 8.6);
        assert_eq!(points, vec![PixelPoint::new(3.0, 9.0)]);
    }

    #[test]
    fn dda_short_fractional_span_keeps_both_endpoints() {
        let points = line_dda(0.3, 0.3, 0.7, 0.7);
        assert_eq!(points, vec![PixelPoint::new(0.0, 0.0), PixelPoint::new(1.0, 1.0)]);

        // 2.5 pixels long takes three steps.
        let points = line_dda(0.0, 0.0, 2.5, 0.0);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], PixelPoint::new(0.0, 0.0));
        assert_eq!(*points.last().unwrap(), PixelPoint::new(3.0, 0.0));
    }

    #[test]
    fn dda_is_idempotent() {
        assert_eq!(line_dda(1.0, 2.0, 17.0, 9.0), line_dda(1.0, 2.0, 17.0, 9.0));
    }

    #[test]
    fn bresenham_horizontal_line_is_exact() {
        let points = line_bresenham(0.0, 0.0, 5.0, 0.0);
        let expected: Vec<_> = (0..=5).map(|x| PixelPoint::new(x as f32, 0.0)).collect();
        assert_eq!(points, expected);
    }

    #[test]
    fn bresenham_matches_dda_on_axis_and_diagonal_lines() {
        for (x1, y1, x2, y2) in [(0.0, 0.0, 0.0, 6.0), (0.0, 0.0, 6.0, 6.0), (4.0, 0.0, -2.0, 6.0)] {
            assert_eq!(line_bresenham(x1, y1, x2, y2), line_dda(x1, y1, x2, y2));
        }
    }

    #[test]
    fn bresenham_path_is_eight_connected_and_step_optimal() {
        let points = line_bresenham(2.0, 1.0, 13.0, 5.0);
        assert_eq!(points.len(), 12);
        for pair in points.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= 1.0);
            assert!((pair[1].y - pair[0].y).abs() <= 1.0);
        }
        assert_eq!(*points.last().unwrap(), PixelPoint::new(13.0, 5.0));
    }

    #[test]
    fn bresenham_truncates_inputs() {
        let points = line_bresenham(0.9, 0.9, 2.7, -0.2);
        assert_eq!(points[0], PixelPoint::new(0.0, 0.0));
        assert_eq!(*points.last().unwrap(), PixelPoint::new(2.0, 0.0));
    }

    #[test]
    fn circle_is_symmetric_and_close_to_radius() {
        let points = circle_midpoint(0.0, 0.0, 10.0);
        assert!(!points.is_empty());
        for p in &points {
            assert!(contains(&points, -p.x, -p.y), "missing mirror of {p:?}");
            assert!(contains(&points, p.y, p.x), "missing transpose of {p:?}");
            let r = (p.x * p.x + p.y * p.y).sqrt().round() as i32;
            assert!((9..=11).contains(&r), "radius {r} for {p:?}");
        }
    }

    #[test]
    fn circle_of_zero_radius_is_center() {
        let points = circle_midpoint(4.0, -2.0, 0.0);
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| *p == PixelPoint::new(4.0, -2.0)));
    }

    #[test]
    fn polygon_outline_visits_every_vertex() {
        let square = [
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(4.0, 0.0),
            PixelPoint::new(4.0, 4.0),
            PixelPoint::new(0.0, 4.0),
        ];
        let outline = polygon_outline(&square);
        for v in &square {
            assert!(contains(&outline, v.x, v.y));
        }
        assert!(contains(&outline, 0.0, 2.0));
    }
}
