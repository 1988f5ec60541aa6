use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    config::AppConfig,
    controls::{ControlEvent, ControlState},
    coords::CoordinateSystem,
    geometry,
    kolintang::KolintangSequencer,
    motif::{
        ClusterPattern, CrossMotif, DiamondMotif, EyeMotif, MotifStyle, OrbitLayout,
        PatternCluster, SteppedDiamondMotif, TrapezoidColumns, TrapezoidLayout,
    },
    palette::Palette,
    raster::PixelPoint,
    render::{DrawSink, RenderGraph},
    timeline::FrameClock,
    MotifError, Result,
};

const PATTERN_SIZE: f32 = 70.0;
const ORBIT_RADIUS: f32 = 130.0;
const SATELLITES: usize = 6;
const CLUSTER_SIZE: f32 = 90.0;
const DIAMOND_SIZE: f32 = 50.0;
const DIAMOND_GAP: f32 = 400.0;
const STEPPED_SQUARE: f32 = 20.0;
const BAND_HALF_WIDTH: f32 = 150.0;
const BAND_HALF_HEIGHT: f32 = 500.0;
const BAND_BORDER: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    /// Rasterized outlines over the Cartesian axes.
    Outline,
    /// The same composition with palette fills.
    Colored,
    Kolintang,
    /// Fixed hexagonal clusters; the outer rings are twisted by affine transforms.
    Static,
}

impl SceneKind {
    pub const ALL: [SceneKind; 4] = [
        SceneKind::Outline,
        SceneKind::Colored,
        SceneKind::Kolintang,
        SceneKind::Static,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SceneKind::Outline => "outline",
            SceneKind::Colored => "colored",
            SceneKind::Kolintang => "kolintang",
            SceneKind::Static => "static",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneKind {
    type Err = MotifError;

    fn from_str(s: &str) -> Result<Self> {
        SceneKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MotifError::msg(format!("unknown scene `{s}`")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub name: String,
    pub kind: SceneKind,
}

impl SceneDescriptor {
    pub fn new(kind: SceneKind) -> Self {
        let name = match kind {
            SceneKind::Outline => "Motif Outlines",
            SceneKind::Colored => "Colored Motifs",
            SceneKind::Kolintang => "Kolintang",
            SceneKind::Static => "Static Patterns",
        };
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// A built scene: its motifs plus the shared controls and palette that are
/// pushed into them.
#[derive(Debug)]
pub struct SceneInstance {
    descriptor: SceneDescriptor,
    coords: CoordinateSystem,
    show_axes: bool,
    graph: RenderGraph,
    controls: ControlState,
    palette: Palette,
    clock: FrameClock,
}

impl SceneInstance {
    pub fn build(kind: SceneKind, config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let coords = CoordinateSystem::with_config(
            config.viewport.width,
            config.viewport.height,
            &config.coords,
        );

        let mut graph = RenderGraph::new();
        match kind {
            SceneKind::Outline => populate_motifs(&mut graph, &coords, MotifStyle::Outline, config),
            SceneKind::Colored => populate_motifs(&mut graph, &coords, MotifStyle::Filled, config),
            SceneKind::Kolintang => {
                let sequencer = KolintangSequencer::new(&config.kolintang, coords.center())?;
                graph.register(Box::new(sequencer));
            }
            SceneKind::Static => populate_clusters(&mut graph, &coords),
        }

        let mut scene = Self {
            descriptor: SceneDescriptor::new(kind),
            coords,
            show_axes: config.coords.show_axes,
            graph,
            controls: ControlState::default(),
            palette: Palette::default(),
            clock: FrameClock::default(),
        };
        scene.push_state();
        tracing::debug!(scene = %kind, motifs = scene.graph.len(), "scene built");
        Ok(scene)
    }

    pub fn descriptor(&self) -> &SceneDescriptor {
        &self.descriptor
    }

    pub fn coords(&self) -> &CoordinateSystem {
        &self.coords
    }

    pub fn graph(&self) -> &RenderGraph {
        &self.graph
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    fn push_state(&mut self) {
        self.palette.set_swapped(self.controls.swap_colors);
        self.graph.set_colors(&self.palette);
        self.graph.apply_controls(&self.controls);
    }

    pub fn handle_event(&mut self, event: ControlEvent) {
        if self.controls.apply(event) {
            self.push_state();
        }
        self.graph.handle_event(event);
        tracing::debug!(?event, "scene event");
    }

    /// Returns `false` for keys without a binding.
    pub fn handle_key(&mut self, key: char) -> bool {
        match ControlEvent::from_key(key) {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    pub fn handle_click(&mut self, point: PixelPoint) -> bool {
        self.graph.handle_click(point)
    }

    pub fn update(&mut self, delta: f32) {
        let delta = self.clock.advance(delta);
        self.graph.update(delta);
    }

    pub fn draw(&self, sink: &mut dyn DrawSink) {
        match self.descriptor.kind {
            SceneKind::Outline | SceneKind::Static => {
                if self.show_axes {
                    self.coords.draw_axes(sink, self.palette.line);
                }
                self.coords.draw_grid(sink, self.palette.medium_green);
            }
            SceneKind::Colored => self.draw_backdrop(sink),
            SceneKind::Kolintang => {}
        }
        self.graph.draw(sink);
    }

    /// One tick: every motif updates before anything is drawn.
    pub fn frame(&mut self, delta: f32, sink: &mut dyn DrawSink) {
        self.update(delta);
        self.draw(sink);
    }

    fn draw_backdrop(&self, sink: &mut dyn DrawSink) {
        let c = self.coords.center();
        let (top, height) = (c.y - BAND_HALF_HEIGHT, BAND_HALF_HEIGHT * 2.0);
        let band = geometry::rect(c.x - BAND_HALF_WIDTH, top, BAND_HALF_WIDTH * 2.0, height);
        sink.draw_polygon_filled(geometry::open(&band), self.palette.light_orange);
        for x in [c.x - BAND_HALF_WIDTH, c.x + BAND_HALF_WIDTH - BAND_BORDER] {
            let border = geometry::rect(x, top, BAND_BORDER, height);
            sink.draw_polygon_filled(geometry::open(&border), self.palette.dark_orange);
        }
    }
}

fn populate_motifs(
    graph: &mut RenderGraph,
    coords: &CoordinateSystem,
    style: MotifStyle,
    config: &AppConfig,
) {
    let animation = &config.animation;
    let orbit = |center| OrbitLayout {
        center,
        pattern_size: PATTERN_SIZE,
        orbit_radius: ORBIT_RADIUS,
        satellites: SATELLITES,
    };
    let q = coords.quadrant_centers();
    graph.register(Box::new(CrossMotif::new(orbit(q.q1), style, animation)));
    graph.register(Box::new(EyeMotif::new(orbit(q.q2), style, animation)));
    graph.register(Box::new(CrossMotif::new(orbit(q.q3), style, animation)));
    graph.register(Box::new(EyeMotif::new(orbit(q.q4), style, animation)));

    graph.register(Box::new(TrapezoidColumns::new(
        coords.clone(),
        TrapezoidLayout::default(),
        style,
        animation,
    )));

    let c = coords.center();
    for dy in [-DIAMOND_GAP, 0.0, DIAMOND_GAP] {
        let center = PixelPoint::new(c.x, c.y + dy);
        graph.register(Box::new(DiamondMotif::new(center, DIAMOND_SIZE, style, animation)));
    }
    for (dy, inverse) in [(-200.0, true), (180.0, false)] {
        let center = PixelPoint::new(c.x - 10.0, c.y + dy);
        graph.register(Box::new(SteppedDiamondMotif::new(
            center,
            STEPPED_SQUARE,
            inverse,
            style,
            animation,
        )));
    }
}

fn populate_clusters(graph: &mut RenderGraph, coords: &CoordinateSystem) {
    let q = coords.quadrant_centers();
    for (pattern, center) in [
        (ClusterPattern::Cross, q.q1),
        (ClusterPattern::Eye, q.q2),
        (ClusterPattern::Cross, q.q3),
        (ClusterPattern::Eye, q.q4),
    ] {
        graph.register(Box::new(PatternCluster::new(pattern, center, CLUSTER_SIZE)));
    }
}
