use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::raster::PixelPoint;

/// Row-major homogeneous matrix. Points are treated as column vectors
/// `[x, y, 1]`, i.e. `x' = m[0][0]*x + m[0][1]*y + m[0][2]`.
///
/// Operations return `elementary * self`, so chained calls apply in call
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    pub m: [[f32; 3]; 3],
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineMatrix {
    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub const fn from_rows(m: [[f32; 3]; 3]) -> Self {
        Self { m }
    }

    pub fn translation(dx: f32, dy: f32) -> Self {
        let mut out = Self::identity();
        out.m[0][2] = dx;
        out.m[1][2] = dy;
        out
    }

    pub fn scaling(sx: f32, sy: f32) -> Self {
        let mut out = Self::identity();
        out.m[0][0] = sx;
        out.m[1][1] = sy;
        out
    }

    pub fn rotation_cw(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::from_rows([[cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn rotation_ccw(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::from_rows([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn shearing(shx: f32, shy: f32) -> Self {
        let mut out = Self::identity();
        out.m[0][1] = shx;
        out.m[1][0] = shy;
        out
    }

    /// Matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &AffineMatrix) -> AffineMatrix {
        let mut out = [[0.0f32; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        AffineMatrix { m: out }
    }

    /// Left-multiplies `elementary` into this accumulator.
    pub fn then(&self, elementary: &AffineMatrix) -> AffineMatrix {
        elementary.multiply(self)
    }

    /// Applies `linear` about `pivot`: translate to origin, apply, translate
    /// back. Always three multiplications, even for a pivot at the origin.
    fn about_pivot(&self, linear: &AffineMatrix, pivot: PixelPoint) -> AffineMatrix {
        self.then(&AffineMatrix::translation(-pivot.x, -pivot.y))
            .then(linear)
            .then(&AffineMatrix::translation(pivot.x, pivot.y))
    }

    pub fn translate(&self, dx: f32, dy: f32) -> AffineMatrix {
        self.then(&AffineMatrix::translation(dx, dy))
    }

    pub fn scale(&self, sx: f32, sy: f32, pivot: PixelPoint) -> AffineMatrix {
        self.about_pivot(&AffineMatrix::scaling(sx, sy), pivot)
    }

    pub fn rotate_cw(&self, degrees: f32, pivot: PixelPoint) -> AffineMatrix {
        self.about_pivot(&AffineMatrix::rotation_cw(degrees), pivot)
    }

    pub fn rotate_ccw(&self, degrees: f32, pivot: PixelPoint) -> AffineMatrix {
        self.about_pivot(&AffineMatrix::rotation_ccw(degrees), pivot)
    }

    pub fn shear(&self, shx: f32, shy: f32, pivot: PixelPoint) -> AffineMatrix {
        self.about_pivot(&AffineMatrix::shearing(shx, shy), pivot)
    }

    /// Mirrors across the x axis (negates y).
    pub fn reflect_x(&self) -> AffineMatrix {
        self.then(&AffineMatrix::scaling(1.0, -1.0))
    }

    /// Mirrors across the y axis (negates x).
    pub fn reflect_y(&self) -> AffineMatrix {
        self.then(&AffineMatrix::scaling(-1.0, 1.0))
    }

    pub fn reflect_origin(&self) -> AffineMatrix {
        self.then(&AffineMatrix::scaling(-1.0, -1.0))
    }

    /// Applies the matrix to a single point without any rounding.
    ///
    /// The homogeneous divide only runs when `w` is neither 0 nor 1; affine
    /// matrices always produce `w == 1`.
    pub fn apply(&self, point: PixelPoint) -> PixelPoint {
        let m = &self.m;
        let mut x = point.x * m[0][0] + point.y * m[0][1] + m[0][2];
        let mut y = point.x * m[1][0] + point.y * m[1][1] + m[1][2];
        let w = point.x * m[2][0] + point.y * m[2][1] + m[2][2];
        if w != 0.0 && w != 1.0 {
            x /= w;
            y /= w;
        }
        PixelPoint::new(x, y)
    }

    /// Applies the matrix to one point and floors the result to whole pixels.
    pub fn transform_point(&self, point: PixelPoint) -> PixelPoint {
        let p = self.apply(point);
        PixelPoint::new(p.x.floor(), p.y.floor())
    }

    /// Transforms a batch of points, returning a new sequence of the same
    /// length and order with coordinates floored to whole pixels.
    pub fn transform_points(&self, points: &[PixelPoint]) -> Vec<PixelPoint> {
        points.iter().map(|p| self.transform_point(*p)).collect()
    }

    pub fn approx_eq(&self, other: &AffineMatrix, eps: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    pub fn is_identity_within(&self, eps: f32) -> bool {
        self.approx_eq(&AffineMatrix::identity(), eps)
    }
}

impl Mul for AffineMatrix {
    type Output = AffineMatrix;

    fn mul(self, rhs: AffineMatrix) -> AffineMatrix {
        self.multiply(&rhs)
    }
}
