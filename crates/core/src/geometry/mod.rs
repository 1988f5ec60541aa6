use std::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::{raster::PixelPoint, transform::AffineMatrix};

/// Ordered vertex ring; closed when the first vertex equals the last.
pub type Polygon = Vec<PixelPoint>;

/// Hexagon angle offset that puts a vertex on the x axis.
pub const HEXAGON_FLAT: f32 = 0.0;
/// Hexagon angle offset rotated by a quarter turn; used by eye and cross.
pub const HEXAGON_POINTY: f32 = FRAC_PI_2;

pub const DIAMOND_LAYERS: [f32; 3] = [1.0, 0.66, 0.33];
pub const TRAPEZOID_LAYERS: [f32; 4] = [1.0, 0.8, 0.6, 0.3];
/// Half-width of a stepped diamond, in squares.
pub const STEPPED_DIAMOND_EXTENT: f32 = 4.0;

pub const EYE_OUTER_RATIO: f32 = 0.7;
pub const EYE_OUTER_FILLED_RATIO: f32 = 0.6;
pub const INNER_CIRCLE_RATIO: f32 = 0.15;
pub const CROSS_WIDTH_RATIO: f32 = 0.5;
pub const CROSS_HEIGHT_RATIO: f32 = 1.0;

/// Repeats the first vertex at the end if the ring is not already closed.
pub fn close(mut points: Polygon) -> Polygon {
    if let (Some(first), Some(last)) = (points.first().copied(), points.last()) {
        if first != *last {
            points.push(first);
        }
    }
    points
}

/// Drops the closing vertex, if any.
pub fn open(points: &[PixelPoint]) -> &[PixelPoint] {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && first == last => {
            &points[..points.len() - 1]
        }
        _ => points,
    }
}

pub fn regular_polygon(center: PixelPoint, radius: f32, sides: usize, offset: f32) -> Polygon {
    let ring = (0..sides)
        .map(|k| {
            let angle = k as f32 * 2.0 * PI / sides as f32 + offset;
            let (sin, cos) = angle.sin_cos();
            PixelPoint::new(center.x + radius * cos, center.y + radius * sin)
        })
        .collect();
    close(ring)
}

/// Six vertices at `k·π/3 + offset`.
pub fn hexagon(center: PixelPoint, size: f32, offset: f32) -> Polygon {
    regular_polygon(center, size, 6, offset)
}

pub fn circle_polygon(center: PixelPoint, radius: f32, segments: usize) -> Polygon {
    regular_polygon(center, radius, segments.max(3), 0.0)
}

/// Axis-aligned rectangle with its top-left corner at `(x, y)`.
pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Polygon {
    vec![
        PixelPoint::new(x, y),
        PixelPoint::new(x + width, y),
        PixelPoint::new(x + width, y + height),
        PixelPoint::new(x, y + height),
        PixelPoint::new(x, y),
    ]
}

/// Plus sign made of a horizontal `height × width` bar and a vertical
/// `width × height` bar sharing `center`.
pub fn cross(center: PixelPoint, width: f32, height: f32) -> [Polygon; 2] {
    let (hw, hh) = (width / 2.0, height / 2.0);
    [
        rect(center.x - hh, center.y - hw, height, width),
        rect(center.x - hw, center.y - hh, width, height),
    ]
}

/// Square rotated by 45°: top, right, bottom, left.
pub fn diamond(center: PixelPoint, size: f32) -> Polygon {
    vec![
        PixelPoint::new(center.x, center.y - size),
        PixelPoint::new(center.x + size, center.y),
        PixelPoint::new(center.x, center.y + size),
        PixelPoint::new(center.x - size, center.y),
        PixelPoint::new(center.x, center.y - size),
    ]
}

/// Outer, middle and inner diamonds at [`DIAMOND_LAYERS`].
pub fn diamond_layers(center: PixelPoint, size: f32) -> Vec<Polygon> {
    DIAMOND_LAYERS
        .iter()
        .map(|scale| diamond(center, size * scale))
        .collect()
}

/// One square of a stepped diamond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteppedSquare {
    pub polygon: Polygon,
    /// Alternates along the ring; selects the fill color.
    pub even: bool,
}

/// Sixteen squares tracing a diamond silhouette, four per diagonal arm,
/// starting at the top and walking clockwise on screen. Each square's
/// top-left corner sits on the ring.
pub fn stepped_diamond(center: PixelPoint, square: f32) -> Vec<SteppedSquare> {
    const ARMS: [(i32, i32); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];
    let mut out = Vec::with_capacity(16);
    let (mut gx, mut gy) = (0i32, -4i32);
    for (dx, dy) in ARMS {
        for _ in 0..4 {
            out.push(SteppedSquare {
                polygon: rect(
                    center.x + gx as f32 * square,
                    center.y + gy as f32 * square,
                    square,
                    square,
                ),
                even: out.len() % 2 == 0,
            });
            gx += dx;
            gy += dy;
        }
    }
    out
}

/// Four consecutive vertices of a rotated flat hexagon: indices 2..=5, or
/// 5,0,1,2 when mirrored.
pub fn trapezoid(center: PixelPoint, size: f32, rotation: f32, mirrored: bool) -> Polygon {
    let hex = hexagon(center, size, HEXAGON_FLAT + rotation);
    let picks: [usize; 4] = if mirrored { [5, 0, 1, 2] } else { [2, 3, 4, 5] };
    close(picks.iter().map(|&i| hex[i]).collect())
}

/// The trapezoid plus its nested layers at [`TRAPEZOID_LAYERS`], each
/// interpolated towards the trapezoid's own center.
pub fn trapezoid_layers(
    center: PixelPoint,
    size: f32,
    rotation: f32,
    mirrored: bool,
) -> Vec<Polygon> {
    let outer = trapezoid(center, size, rotation, mirrored);
    TRAPEZOID_LAYERS
        .iter()
        .map(|&scale| {
            outer
                .iter()
                .map(|v| center.lerp(*v, scale))
                .collect::<Polygon>()
        })
        .collect()
}

/// Base of the kolintang: a horizontal trapezoid `length` wide whose left
/// and right edges are `left_width` and `right_width` tall.
pub fn horizontal_trapezoid(
    center: PixelPoint,
    length: f32,
    left_width: f32,
    right_width: f32,
) -> Polygon {
    let (left_x, right_x) = (center.x - length / 2.0, center.x + length / 2.0);
    close(vec![
        PixelPoint::new(left_x, center.y - left_width / 2.0),
        PixelPoint::new(right_x, center.y - right_width / 2.0),
        PixelPoint::new(right_x, center.y + right_width / 2.0),
        PixelPoint::new(left_x, center.y + left_width / 2.0),
    ])
}

/// Uniform scale factor an affine matrix applies to lengths.
pub fn linear_scale(matrix: &AffineMatrix) -> f32 {
    let m = &matrix.m;
    (m[0][0] * m[1][1] - m[0][1] * m[1][0]).abs().sqrt()
}

/// Hexagon with two concentric circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyePattern {
    pub hexagon: Polygon,
    pub center: PixelPoint,
    pub outer_radius: f32,
    pub inner_radius: f32,
}

impl EyePattern {
    pub fn new(center: PixelPoint, size: f32, outer_ratio: f32) -> Self {
        Self {
            hexagon: hexagon(center, size, HEXAGON_POINTY),
            center,
            outer_radius: size * outer_ratio,
            inner_radius: size * INNER_CIRCLE_RATIO,
        }
    }

    /// Applies `matrix` to the vertices and to the circle center together so
    /// the circles stay concentric with the hexagon.
    pub fn transformed(&self, matrix: &AffineMatrix) -> Self {
        let scale = linear_scale(matrix);
        Self {
            hexagon: matrix.transform_points(&self.hexagon),
            center: matrix.transform_point(self.center),
            outer_radius: self.outer_radius * scale,
            inner_radius: self.inner_radius * scale,
        }
    }
}

/// Hexagon with a plus sign and an inner circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossPattern {
    pub hexagon: Polygon,
    pub arms: [Polygon; 2],
    pub center: PixelPoint,
    pub inner_radius: f32,
}

impl CrossPattern {
    pub fn new(center: PixelPoint, size: f32) -> Self {
        Self {
            hexagon: hexagon(center, size, HEXAGON_POINTY),
            arms: cross(center, size * CROSS_WIDTH_RATIO, size * CROSS_HEIGHT_RATIO),
            center,
            inner_radius: size * INNER_CIRCLE_RATIO,
        }
    }

    pub fn transformed(&self, matrix: &AffineMatrix) -> Self {
        Self {
            hexagon: matrix.transform_points(&self.hexagon),
            arms: [
                matrix.transform_points(&self.arms[0]),
                matrix.transform_points(&self.arms[1]),
            ],
            center: matrix.transform_point(self.center),
            inner_radius: self.inner_radius * linear_scale(matrix),
        }
    }
}
