use serde::{Deserialize, Serialize};

use crate::{
    config::CoordinateConfig,
    palette::Color,
    raster::{self, PixelPoint},
    render::DrawSink,
};

/// Logical plane coordinate. Y grows upwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CartesianPoint {
    pub x: f32,
    pub y: f32,
}

impl CartesianPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pixel-space centers of the four quadrants, numbered the Cartesian way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantCenters {
    /// Top-right.
    pub q1: PixelPoint,
    /// Top-left.
    pub q2: PixelPoint,
    /// Bottom-left.
    pub q3: PixelPoint,
    /// Bottom-right.
    pub q4: PixelPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(50.0)
    }
}

#[derive(Debug, Clone)]
pub struct CoordinateSystem {
    width: f32,
    height: f32,
    margins: Margins,
    show_grid: bool,
    grid_spacing: f32,
}

impl CoordinateSystem {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(width, height, &CoordinateConfig::default())
    }

    pub fn with_config(width: f32, height: f32, config: &CoordinateConfig) -> Self {
        Self {
            width,
            height,
            margins: config.margins,
            show_grid: config.show_grid,
            grid_spacing: config.grid_spacing,
        }
    }

    /// Picks up new viewport dimensions queried from the host.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    pub fn set_grid(&mut self, show: bool, spacing: f32) {
        self.show_grid = show;
        self.grid_spacing = spacing;
    }

    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn to_pixel(&self, cart_x: f32, cart_y: f32) -> PixelPoint {
        let c = self.center();
        PixelPoint::new(c.x + cart_x, c.y - cart_y)
    }

    pub fn to_cartesian(&self, pixel_x: f32, pixel_y: f32) -> CartesianPoint {
        let c = self.center();
        CartesianPoint::new(pixel_x - c.x, c.y - pixel_y)
    }

    pub fn point_to_pixel(&self, point: CartesianPoint) -> PixelPoint {
        self.to_pixel(point.x, point.y)
    }

    pub fn quadrant_centers(&self) -> QuadrantCenters {
        let quadrant_w = (self.width - self.margins.left - self.margins.right) / 2.0;
        let quadrant_h = (self.height - self.margins.top - self.margins.bottom) / 2.0;
        let c = self.center();
        let (dx, dy) = (quadrant_w / 2.0, quadrant_h / 2.0);

        QuadrantCenters {
            q1: PixelPoint::new(c.x + dx, c.y - dy),
            q2: PixelPoint::new(c.x - dx, c.y - dy),
            q3: PixelPoint::new(c.x - dx, c.y + dy),
            q4: PixelPoint::new(c.x + dx, c.y + dy),
        }
    }

    /// Rasterized X and Y axes, inset by the margins.
    pub fn axis_points(&self) -> Vec<PixelPoint> {
        let c = self.center();
        let m = self.margins;
        let mut points = raster::line_dda(m.left, c.y, self.width - m.right, c.y);
        points.extend(raster::line_dda(c.x, m.top, c.x, self.height - m.bottom));
        points
    }

    /// Rasterized grid lines walking outwards from the axes at
    /// `grid_spacing`. Empty when the grid is hidden or the spacing is not
    /// positive.
    pub fn grid_points(&self) -> Vec<PixelPoint> {
        if !self.show_grid || self.grid_spacing <= 0.0 {
            return Vec::new();
        }

        let c = self.center();
        let m = self.margins;
        let (left, right) = (m.left, self.width - m.right);
        let (top, bottom) = (m.top, self.height - m.bottom);
        let step = self.grid_spacing;
        let mut points = Vec::new();

        let mut x = c.x + step;
        while x < right {
            points.extend(raster::line_dda(x, top, x, bottom));
            x += step;
        }
        let mut x = c.x - step;
        while x > left {
            points.extend(raster::line_dda(x, top, x, bottom));
            x -= step;
        }
        let mut y = c.y + step;
        while y < bottom {
            points.extend(raster::line_dda(left, y, right, y));
            y += step;
        }
        let mut y = c.y - step;
        while y > top {
            points.extend(raster::line_dda(left, y, right, y));
            y -= step;
        }
        points
    }

    pub fn draw_axes(&self, sink: &mut dyn DrawSink, color: Color) {
        sink.draw_pixels(&self.axis_points(), color);
    }

    pub fn draw_grid(&self, sink: &mut dyn DrawSink, color: Color) {
        let points = self.grid_points();
        if !points.is_empty() {
            sink.draw_pixels(&points, color);
        }
    }

    /// Two-pixel-wide vertical guide at Cartesian `cart_x`.
    pub fn vertical_line(&self, cart_x: f32, y_top: f32, y_bottom: f32) -> Vec<PixelPoint> {
        let top = self.to_pixel(cart_x, y_top);
        let bottom = self.to_pixel(cart_x, y_bottom);
        let mut points = raster::line_dda(top.x, top.y, bottom.x, bottom.y);
        points.extend(raster::line_dda(top.x + 1.0, top.y, bottom.x + 1.0, bottom.y));
        points
    }

    /// Two-pixel-wide horizontal guide at Cartesian `cart_y`. With a
    /// `length`, the line is re-centered on the midpoint of `x_left..x_right`.
    pub fn horizontal_line(
        &self,
        cart_y: f32,
        x_left: f32,
        x_right: f32,
        length: Option<f32>,
    ) -> Vec<PixelPoint> {
        let (x_left, x_right) = match length {
            Some(length) => {
                let mid = (x_left + x_right) / 2.0;
                (mid - length / 2.0, mid + length / 2.0)
            }
            None => (x_left, x_right),
        };
        let left = self.to_pixel(x_left, cart_y);
        let right = self.to_pixel(x_right, cart_y);
        let mut points = raster::line_dda(left.x, left.y, right.x, right.y);
        points.extend(raster::line_dda(left.x, left.y + 1.0, right.x, right.y + 1.0));
        points
    }

    /// A pair of vertical guides `spacing` apart, the first at `cart_x`.
    pub fn boundary_lines(
        &self,
        cart_x: f32,
        y_top: f32,
        y_bottom: f32,
        spacing: f32,
    ) -> Vec<PixelPoint> {
        let mut points = self.vertical_line(cart_x, y_top, y_bottom);
        points.extend(self.vertical_line(cart_x + spacing, y_top, y_bottom));
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawList;

    #[test]
    fn pixel_cartesian_round_trip() {
        let coords = CoordinateSystem::new(800.0, 600.0);
        for x in (-400..=400).step_by(25) {
            for y in (-300..=300).step_by(25) {
                let (x, y) = (x as f32, y as f32);
                let p = coords.to_pixel(x, y);
                assert_eq!(coords.to_cartesian(p.x, p.y), CartesianPoint::new(x, y));
            }
        }
        for px in (0..=800).step_by(40) {
            for py in (0..=600).step_by(30) {
                let (px, py) = (px as f32, py as f32);
                let c = coords.to_cartesian(px, py);
                assert_eq!(coords.to_pixel(c.x, c.y), PixelPoint::new(px, py));
            }
        }
    }

    #[test]
    fn y_axis_points_up() {
        let coords = CoordinateSystem::new(800.0, 600.0);
        assert_eq!(coords.to_pixel(0.0, 0.0), PixelPoint::new(400.0, 300.0));
        assert_eq!(coords.to_pixel(10.0, 20.0), PixelPoint::new(410.0, 280.0));
    }

    #[test]
    fn quadrant_centers_follow_cartesian_numbering() {
        let coords = CoordinateSystem::new(800.0, 600.0);
        let q = coords.quadrant_centers();
        // Usable area 700 x 500 -> quadrants 350 x 250.
        assert_eq!(q.q1, PixelPoint::new(575.0, 175.0));
        assert_eq!(q.q2, PixelPoint::new(225.0, 175.0));
        assert_eq!(q.q3, PixelPoint::new(225.0, 425.0));
        assert_eq!(q.q4, PixelPoint::new(575.0, 425.0));
    }

    #[test]
    fn axes_span_the_margins() {
        let coords = CoordinateSystem::new(800.0, 600.0);
        let points = coords.axis_points();
        // 701 samples for X (50..=750) and 501 for Y (50..=550).
        assert_eq!(points.len(), 701 + 501);
        assert!(points.contains(&PixelPoint::new(50.0, 300.0)));
        assert!(points.contains(&PixelPoint::new(400.0, 550.0)));
    }

    #[test]
    fn grid_is_empty_until_enabled() {
        let mut coords = CoordinateSystem::new(800.0, 600.0);
        assert!(coords.grid_points().is_empty());

        coords.set_grid(true, 100.0);
        let points = coords.grid_points();
        assert!(points.contains(&PixelPoint::new(500.0, 60.0)));
        assert!(points.contains(&PixelPoint::new(60.0, 200.0)));
        assert!(!points.iter().any(|p| p.x == 400.0 && p.y == 60.0));

        coords.set_grid(true, 0.0);
        assert!(coords.grid_points().is_empty());
    }

    #[test]
    fn guide_lines_are_doubled() {
        let coords = CoordinateSystem::new(800.0, 600.0);
        let v = coords.vertical_line(-100.0, 50.0, -50.0);
        assert_eq!(v.len(), 2 * 101);
        assert!(v.contains(&PixelPoint::new(300.0, 250.0)));
        assert!(v.contains(&PixelPoint::new(301.0, 350.0)));

        let h = coords.horizontal_line(20.0, -100.0, 100.0, Some(50.0));
        assert_eq!(h.len(), 2 * 51);
        assert!(h.contains(&PixelPoint::new(375.0, 280.0)));
        assert!(h.contains(&PixelPoint::new(425.0, 281.0)));
    }

    #[test]
    fn draw_axes_emits_one_pixel_batch() {
        let coords = CoordinateSystem::new(200.0, 200.0);
        let mut list = DrawList::new();
        coords.draw_axes(&mut list, Color::WHITE);
        coords.draw_grid(&mut list, Color::WHITE);
        assert_eq!(list.len(), 1);
    }
}
