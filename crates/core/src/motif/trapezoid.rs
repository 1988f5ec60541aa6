use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::{draw_filled, draw_outline, Motif, MotifStyle};
use crate::{
    anim::ScrollState,
    config::AnimationConfig,
    controls::ControlState,
    coords::CoordinateSystem,
    geometry::{self, Polygon},
    palette::Palette,
    raster::PixelPoint,
    render::DrawSink,
};

/// Placement of the two scrolling trapezoid columns, in Cartesian units
/// relative to the plane origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrapezoidLayout {
    pub size: f32,
    pub spacing: f32,
    pub count: usize,
    pub rotation: f32,
    /// Column x offsets, alternating by row parity.
    pub near_x: f32,
    pub far_x: f32,
    /// Guide lines run from `-half_height` to `half_height`.
    pub half_height: f32,
    /// Guide line x offsets, mirrored on both sides.
    pub guides: [f32; 4],
}

impl Default for TrapezoidLayout {
    fn default() -> Self {
        Self {
            size: 60.0,
            spacing: 100.0,
            count: 24,
            rotation: -PI / 6.0,
            near_x: 800.0,
            far_x: 900.0,
            half_height: 700.0,
            guides: [760.0, 800.0, 900.0, 942.0],
        }
    }
}

impl TrapezoidLayout {
    pub fn total_height(&self) -> f32 {
        self.count as f32 * self.spacing
    }
}

/// One trapezoid ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidPlacement {
    pub center: PixelPoint,
    pub mirrored: bool,
}

/// Two columns of nested trapezoids scrolling in opposite directions
/// between fixed guide lines.
#[derive(Debug, Clone)]
pub struct TrapezoidColumns {
    coords: CoordinateSystem,
    layout: TrapezoidLayout,
    style: MotifStyle,
    scroll: ScrollState,
    palette: Palette,
}

impl TrapezoidColumns {
    pub fn new(
        coords: CoordinateSystem,
        layout: TrapezoidLayout,
        style: MotifStyle,
        animation: &AnimationConfig,
    ) -> Self {
        Self {
            coords,
            scroll: ScrollState::new(animation.scroll_speed, layout.total_height()),
            layout,
            style,
            palette: Palette::default(),
        }
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Left column first, then right. While the scroll offset grows the left
    /// column travels up the screen and the right one down.
    pub fn placements(&self) -> Vec<TrapezoidPlacement> {
        let total = self.layout.total_height();
        let half = total / 2.0;
        let offset = self.scroll.offset;
        let wrap = |rel: f32| {
            if rel < -half {
                rel + total
            } else if rel > half {
                rel - total
            } else {
                rel
            }
        };

        let mut out = Vec::with_capacity(self.layout.count * 2);
        for (side, sign) in [(-1.0f32, -1.0f32), (1.0, 1.0)] {
            for i in 0..self.layout.count {
                let x = if i % 2 == 0 {
                    self.layout.near_x
                } else {
                    self.layout.far_x
                };
                // Offsets are in screen rows; Cartesian y runs the other way.
                let rel = wrap(-half + i as f32 * self.layout.spacing + sign * offset);
                let even = i % 2 == 0;
                out.push(TrapezoidPlacement {
                    center: self.coords.to_pixel(side * x, -rel),
                    mirrored: if side < 0.0 { !even } else { even },
                });
            }
        }
        out
    }

    pub fn layers(&self, placement: &TrapezoidPlacement) -> Vec<Polygon> {
        geometry::trapezoid_layers(
            placement.center,
            self.layout.size,
            self.layout.rotation,
            placement.mirrored,
        )
    }

    fn draw_guides(&self, sink: &mut dyn DrawSink) {
        let h = self.layout.half_height;
        match self.style {
            MotifStyle::Outline => {
                let mut points = Vec::new();
                for x in self.layout.guides {
                    points.extend(self.coords.vertical_line(-x, h, -h));
                    points.extend(self.coords.vertical_line(x, h, -h));
                }
                sink.draw_pixels(&points, self.palette.line);
            }
            MotifStyle::Filled => {
                let p = &self.palette;
                let [inner, near, far, outer] = self.layout.guides;
                let band = |x0: f32, x1: f32, y0: f32, y1: f32| {
                    let a = self.coords.to_pixel(x0.min(x1), y0.max(y1));
                    let b = self.coords.to_pixel(x0.max(x1), y0.min(y1));
                    geometry::rect(a.x, a.y, b.x - a.x, b.y - a.y)
                };
                for sign in [-1.0f32, 1.0] {
                    let back = band(sign * far, sign * inner, h, -h);
                    sink.draw_polygon_filled(geometry::open(&back), p.medium_green);
                    for (x0, x1) in [(near, inner), (outer, far)] {
                        draw_filled(sink, &band(sign * x0, sign * x1, h, -h), p.dark_green, p.line);
                    }
                }
                draw_filled(sink, &band(-inner, -150.0, 30.0, -30.0), p.medium_green, p.line);
                draw_filled(sink, &band(150.0, inner, 30.0, -30.0), p.light_orange, p.line);
            }
        }
    }
}

impl Motif for TrapezoidColumns {
    fn name(&self) -> &str {
        "trapezoid-columns"
    }

    fn update(&mut self, delta: f32) {
        self.scroll.update(delta);
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        self.draw_guides(sink);
        let p = &self.palette;
        let fills = [p.dark_green, p.cream, p.dark_green, p.cream];
        for placement in self.placements() {
            for (layer, fill) in self.layers(&placement).iter().zip(fills) {
                match self.style {
                    MotifStyle::Outline => draw_outline(sink, layer, p.line),
                    MotifStyle::Filled => draw_filled(sink, layer, fill, p.line),
                }
            }
        }
    }

    fn set_colors(&mut self, palette: &Palette) {
        self.palette = palette.clone();
    }

    fn apply_controls(&mut self, controls: &ControlState) {
        self.scroll.reversed = controls.reverse_scroll;
        self.scroll.multiplier = controls.scroll_multiplier;
    }
}
