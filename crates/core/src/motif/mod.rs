mod breathing;
mod cluster;
mod orbit;
mod trapezoid;

use std::{f32::consts::TAU, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    controls::{ControlEvent, ControlState},
    geometry::{self, Polygon},
    palette::{Color, Palette},
    raster::{self, PixelPoint},
    render::DrawSink,
};

pub use breathing::{DiamondMotif, SteppedDiamondMotif, DIAMOND_BOUNDARY_WIDTH};
pub use cluster::{ClusterPattern, ClusterPlacement, PatternCluster, OUTER_RING_THRESHOLD};
pub use orbit::{CrossMotif, EyeMotif, OrbitLayout};
pub use trapezoid::{TrapezoidColumns, TrapezoidLayout};

/// Segments used when a disc outline is handed to the sink as an arc.
pub(crate) const DISC_SEGMENTS: usize = 32;

pub trait Motif: fmt::Debug {
    fn name(&self) -> &str;

    fn update(&mut self, delta: f32);

    fn draw(&self, sink: &mut dyn DrawSink);

    fn set_colors(&mut self, palette: &Palette);

    /// Base speeds and scale range; motifs without a clock ignore it.
    fn set_animation_params(
        &mut self,
        _orbit_speed: f32,
        _breathing_speed: f32,
        _min_scale: f32,
        _max_scale: f32,
    ) {
    }

    fn apply_controls(&mut self, _controls: &ControlState) {}

    fn handle_event(&mut self, _event: ControlEvent) {}

    /// Returns `true` when the click was consumed.
    fn handle_click(&mut self, _point: PixelPoint) -> bool {
        false
    }
}

/// Rasterized outlines only, or filled shapes from the palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotifStyle {
    #[default]
    Outline,
    Filled,
}

pub(crate) fn draw_outline(sink: &mut dyn DrawSink, polygon: &Polygon, color: Color) {
    sink.draw_pixels(&raster::polygon_outline(geometry::open(polygon)), color);
}

pub(crate) fn draw_circle_outline(
    sink: &mut dyn DrawSink,
    center: PixelPoint,
    radius: f32,
    color: Color,
) {
    sink.draw_pixels(&raster::circle_midpoint(center.x, center.y, radius), color);
}

pub(crate) fn draw_filled(sink: &mut dyn DrawSink, polygon: &Polygon, fill: Color, outline: Color) {
    sink.draw_polygon_filled(geometry::open(polygon), fill);
    draw_outline(sink, polygon, outline);
}

pub(crate) fn draw_disc(sink: &mut dyn DrawSink, center: PixelPoint, radius: f32, color: Color) {
    let disc = geometry::circle_polygon(center, radius, DISC_SEGMENTS);
    sink.draw_polygon_filled(geometry::open(&disc), color);
    sink.draw_arc(center, radius, 0.0, TAU, DISC_SEGMENTS, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, DrawList};

    #[test]
    fn outline_helpers_emit_pixel_batches() {
        let mut list = DrawList::new();
        let square = geometry::rect(0.0, 0.0, 4.0, 4.0);
        draw_outline(&mut list, &square, Color::WHITE);
        draw_circle_outline(&mut list, PixelPoint::new(5.0, 5.0), 3.0, Color::WHITE);
        assert_eq!(list.stats().pixel_batches, 2);
        assert_eq!(list.stats().polygons, 0);
    }

    #[test]
    fn filled_helpers_drop_the_closing_vertex() {
        let mut list = DrawList::new();
        draw_filled(&mut list, &geometry::rect(0.0, 0.0, 4.0, 4.0), Color::BLACK, Color::WHITE);
        draw_disc(&mut list, PixelPoint::new(0.0, 0.0), 5.0, Color::WHITE);
        match &list.commands()[0] {
            DrawCommand::PolygonFilled { points, .. } => assert_eq!(points.len(), 4),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(list.stats().arcs, 1);
    }
}
