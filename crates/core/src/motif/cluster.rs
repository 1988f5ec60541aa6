use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::{draw_circle_outline, draw_outline, Motif};
use crate::{
    geometry::{CrossPattern, EyePattern, EYE_OUTER_RATIO},
    palette::{Color, Palette},
    raster::PixelPoint,
    render::DrawSink,
    transform::AffineMatrix,
};

const HEX_RATIO: f32 = 0.9;
const SPACING_RATIO: f32 = 1.8;
/// Clusters larger than this gain an outer ring.
pub const OUTER_RING_THRESHOLD: f32 = 80.0;
const OUTER_RING_TWIST_DEG: f32 = 15.0;
const OUTER_RING_SCALE: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterPattern {
    Eye,
    Cross,
}

/// One pattern of a cluster: where it is built, at what hexagon size, and the
/// matrix its vertices pass through before drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterPlacement {
    pub center: PixelPoint,
    pub size: f32,
    pub matrix: AffineMatrix,
}

/// A fixed hexagonal cluster: one pattern, six neighbours, and for large
/// clusters a second ring where the `i`-th pattern is turned `15 * i` degrees
/// counter-clockwise and shrunk to 0.8 about its own center.
#[derive(Debug, Clone)]
pub struct PatternCluster {
    pattern: ClusterPattern,
    center: PixelPoint,
    size: f32,
    line: Color,
}

impl PatternCluster {
    pub fn new(pattern: ClusterPattern, center: PixelPoint, size: f32) -> Self {
        Self {
            pattern,
            center,
            size,
            line: Palette::default().line,
        }
    }

    pub fn pattern(&self) -> ClusterPattern {
        self.pattern
    }

    pub fn has_outer_ring(&self) -> bool {
        self.size > OUTER_RING_THRESHOLD
    }

    pub fn placements(&self) -> Vec<ClusterPlacement> {
        let size = self.size * HEX_RATIO;
        let spacing = size * SPACING_RATIO;
        let at = |distance: f32, angle: f32| {
            PixelPoint::new(
                self.center.x + distance * angle.cos(),
                self.center.y + distance * angle.sin(),
            )
        };

        let mut out = vec![ClusterPlacement {
            center: self.center,
            size,
            matrix: AffineMatrix::identity(),
        }];
        for i in 0..6 {
            let angle = i as f32 * PI / 3.0;
            out.push(ClusterPlacement {
                center: at(spacing, angle),
                size,
                matrix: AffineMatrix::identity(),
            });
        }
        if self.has_outer_ring() {
            for i in 0..6 {
                let center = at(spacing * 2.0, i as f32 * PI / 3.0);
                let matrix = AffineMatrix::identity()
                    .rotate_ccw(OUTER_RING_TWIST_DEG * i as f32, center)
                    .scale(OUTER_RING_SCALE, OUTER_RING_SCALE, center);
                out.push(ClusterPlacement { center, size, matrix });
            }
        }
        out
    }

    pub fn eyes(&self) -> Vec<EyePattern> {
        self.placements()
            .iter()
            .map(|p| EyePattern::new(p.center, p.size, EYE_OUTER_RATIO).transformed(&p.matrix))
            .collect()
    }

    pub fn crosses(&self) -> Vec<CrossPattern> {
        self.placements()
            .iter()
            .map(|p| CrossPattern::new(p.center, p.size).transformed(&p.matrix))
            .collect()
    }
}

impl Motif for PatternCluster {
    fn name(&self) -> &str {
        match self.pattern {
            ClusterPattern::Eye => "eye-cluster",
            ClusterPattern::Cross => "cross-cluster",
        }
    }

    fn update(&mut self, _delta: f32) {}

    fn draw(&self, sink: &mut dyn DrawSink) {
        match self.pattern {
            ClusterPattern::Eye => {
                for eye in self.eyes() {
                    draw_outline(sink, &eye.hexagon, self.line);
                    draw_circle_outline(sink, eye.center, eye.outer_radius, self.line);
                    draw_circle_outline(sink, eye.center, eye.inner_radius, self.line);
                }
            }
            ClusterPattern::Cross => {
                for cross in self.crosses() {
                    draw_outline(sink, &cross.hexagon, self.line);
                    for arm in &cross.arms {
                        draw_outline(sink, arm, self.line);
                    }
                    draw_circle_outline(sink, cross.center, cross.inner_radius, self.line);
                }
            }
        }
    }

    fn set_colors(&mut self, palette: &Palette) {
        self.line = palette.line;
    }
}
