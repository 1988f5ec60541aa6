use serde::{Deserialize, Serialize};

use crate::{
    controls::{ControlEvent, ControlState},
    motif::Motif,
    palette::{Color, Palette},
    raster::PixelPoint,
};

/// Host surface that paints primitives. The engine only writes to it.
pub trait DrawSink {
    fn draw_pixels(&mut self, points: &[PixelPoint], color: Color);

    fn draw_polygon_filled(&mut self, points: &[PixelPoint], color: Color);

    /// Arc of `radius` around `center` from `start_angle` to `end_angle`
    /// (radians), approximated with `segments` chords.
    fn draw_arc(
        &mut self,
        center: PixelPoint,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        segments: usize,
        color: Color,
    );
}

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Pixels {
        points: Vec<PixelPoint>,
        color: Color,
    },
    PolygonFilled {
        points: Vec<PixelPoint>,
        color: Color,
    },
    Arc {
        center: PixelPoint,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        segments: usize,
        color: Color,
    },
}

/// Totals of a recorded frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStats {
    pub pixel_batches: usize,
    pub pixels: usize,
    pub polygons: usize,
    pub arcs: usize,
}

/// Recording sink: keeps every primitive in call order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn stats(&self) -> DrawStats {
        self.commands
            .iter()
            .fold(DrawStats::default(), |mut stats, command| {
                match command {
                    DrawCommand::Pixels { points, .. } => {
                        stats.pixel_batches += 1;
                        stats.pixels += points.len();
                    }
                    DrawCommand::PolygonFilled { .. } => stats.polygons += 1,
                    DrawCommand::Arc { .. } => stats.arcs += 1,
                }
                stats
            })
    }
}

impl DrawSink for DrawList {
    fn draw_pixels(&mut self, points: &[PixelPoint], color: Color) {
        self.commands.push(DrawCommand::Pixels {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_polygon_filled(&mut self, points: &[PixelPoint], color: Color) {
        self.commands.push(DrawCommand::PolygonFilled {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_arc(
        &mut self,
        center: PixelPoint,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        segments: usize,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            segments,
            color,
        });
    }
}

/// Owns the motif instances of one scene and sequences their frame work:
/// every update of a frame runs before any draw of it.
#[derive(Debug, Default)]
pub struct RenderGraph {
    motifs: Vec<Box<dyn Motif>>,
}

impl RenderGraph {
    pub fn new() -> Self {
        Self { motifs: Vec::new() }
    }

    pub fn register(&mut self, motif: Box<dyn Motif>) {
        tracing::debug!(motif = motif.name(), "registered motif");
        self.motifs.push(motif);
    }

    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    pub fn motifs(&self) -> impl Iterator<Item = &dyn Motif> {
        self.motifs.iter().map(|m| m.as_ref())
    }

    pub fn update(&mut self, delta: f32) {
        for motif in &mut self.motifs {
            motif.update(delta);
        }
    }

    pub fn draw(&self, sink: &mut dyn DrawSink) {
        for motif in &self.motifs {
            motif.draw(sink);
        }
    }

    /// Runs one frame: all updates, then all draws.
    pub fn frame(&mut self, delta: f32, sink: &mut dyn DrawSink) {
        self.update(delta);
        self.draw(sink);
    }

    pub fn apply_controls(&mut self, controls: &ControlState) {
        for motif in &mut self.motifs {
            motif.apply_controls(controls);
        }
    }

    pub fn set_colors(&mut self, palette: &Palette) {
        for motif in &mut self.motifs {
            motif.set_colors(palette);
        }
    }

    pub fn handle_event(&mut self, event: ControlEvent) {
        for motif in &mut self.motifs {
            motif.handle_event(event);
        }
    }

    /// Offers the click to each motif in registration order; stops at the
    /// first one that consumes it.
    pub fn handle_click(&mut self, point: PixelPoint) -> bool {
        self.motifs.iter_mut().any(|m| m.handle_click(point))
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[derive(Debug)]
    struct Probe {
        log: Rc<RefCell<Vec<String>>>,
        name: &'static str,
    }

    impl Motif for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn update(&mut self, _delta: f32) {
            self.log.borrow_mut().push(format!("update {}", self.name));
        }

        fn draw(&self, sink: &mut dyn DrawSink) {
            self.log.borrow_mut().push(format!("draw {}", self.name));
            sink.draw_pixels(&[PixelPoint::new(0.0, 0.0)], Color::WHITE);
        }

        fn set_colors(&mut self, _palette: &Palette) {}

        fn handle_click(&mut self, _point: PixelPoint) -> bool {
            self.name == "b"
        }
    }

    #[test]
    fn frame_updates_everything_before_drawing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut graph = RenderGraph::new();
        for name in ["a", "b"] {
            graph.register(Box::new(Probe {
                log: log.clone(),
                name,
            }));
        }

        let mut list = DrawList::new();
        graph.frame(0.016, &mut list);
        assert_eq!(
            *log.borrow(),
            vec!["update a", "update b", "draw a", "draw b"]
        );
        assert_eq!(list.len(), 2);
        assert!(graph.handle_click(PixelPoint::new(1.0, 1.0)));
    }

    #[test]
    fn stats_count_each_primitive() {
        let mut list = DrawList::new();
        let points = [PixelPoint::new(0.0, 0.0), PixelPoint::new(1.0, 0.0)];
        list.draw_pixels(&points, Color::WHITE);
        list.draw_polygon_filled(&points, Color::BLACK);
        list.draw_arc(PixelPoint::new(0.0, 0.0), 4.0, 0.0, 1.0, 8, Color::WHITE);
        assert_eq!(
            list.stats(),
            DrawStats {
                pixel_batches: 1,
                pixels: 2,
                polygons: 1,
                arcs: 1,
            }
        );
    }

    #[test]
    fn draw_list_serializes_tagged_commands() {
        let mut list = DrawList::new();
        list.draw_pixels(&[PixelPoint::new(2.0, 3.0)], Color::WHITE);
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.contains(r#""kind":"pixels""#), "{json}");
    }
}
