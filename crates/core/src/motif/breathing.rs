use super::{draw_filled, draw_outline, Motif, MotifStyle};
use crate::{
    anim::{AnimationClock, BoundaryConstraint},
    config::AnimationConfig,
    controls::ControlState,
    geometry::{self, Polygon, SteppedSquare, STEPPED_DIAMOND_EXTENT},
    palette::{Color, Palette},
    raster::PixelPoint,
    render::DrawSink,
};

/// Room between the central guide lines, minus a small buffer.
pub const DIAMOND_BOUNDARY_WIDTH: f32 = 100.0;

fn apply_breathing_controls(clock: &mut AnimationClock, controls: &ControlState) {
    clock.set_multipliers(controls.orbit_multiplier, controls.breathing_multiplier);
}

/// Three nested diamonds pulsing between the guide lines.
#[derive(Debug, Clone)]
pub struct DiamondMotif {
    center: PixelPoint,
    size: f32,
    style: MotifStyle,
    clock: AnimationClock,
    line: Color,
    fills: [Color; 3],
}

impl DiamondMotif {
    pub fn new(center: PixelPoint, size: f32, style: MotifStyle, animation: &AnimationConfig) -> Self {
        let clock = AnimationClock::new(animation)
            .with_boundary(BoundaryConstraint::new(DIAMOND_BOUNDARY_WIDTH, size));
        let mut motif = Self {
            center,
            size,
            style,
            clock,
            line: Color::WHITE,
            fills: [Color::WHITE; 3],
        };
        motif.set_colors(&Palette::default());
        motif
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn layers(&self) -> Vec<Polygon> {
        geometry::diamond_layers(self.center, self.size * self.clock.scale_factor())
    }
}

impl Motif for DiamondMotif {
    fn name(&self) -> &str {
        "diamond"
    }

    fn update(&mut self, delta: f32) {
        self.clock.update(delta);
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        for (layer, fill) in self.layers().iter().zip(self.fills) {
            match self.style {
                MotifStyle::Outline => draw_outline(sink, layer, self.line),
                MotifStyle::Filled => draw_filled(sink, layer, fill, self.line),
            }
        }
    }

    fn set_colors(&mut self, palette: &Palette) {
        self.line = palette.line;
        self.fills = [palette.dark_green, palette.cream, palette.dark_orange];
    }

    fn set_animation_params(&mut self, orbit: f32, breathing: f32, min: f32, max: f32) {
        self.clock.set_animation_params(orbit, breathing, min, max);
    }

    fn apply_controls(&mut self, controls: &ControlState) {
        apply_breathing_controls(&mut self.clock, controls);
    }
}

/// Sixteen squares in a diamond ring, optionally breathing in antiphase.
#[derive(Debug, Clone)]
pub struct SteppedDiamondMotif {
    center: PixelPoint,
    square: f32,
    style: MotifStyle,
    clock: AnimationClock,
    line: Color,
    even_fill: Color,
    odd_fill: Color,
}

impl SteppedDiamondMotif {
    pub fn new(
        center: PixelPoint,
        square: f32,
        inverse: bool,
        style: MotifStyle,
        animation: &AnimationConfig,
    ) -> Self {
        let clock = AnimationClock::new(animation)
            .with_boundary(BoundaryConstraint::new(
                DIAMOND_BOUNDARY_WIDTH,
                STEPPED_DIAMOND_EXTENT * square,
            ))
            .with_inverse_breathing(inverse);
        let mut motif = Self {
            center,
            square,
            style,
            clock,
            line: Color::WHITE,
            even_fill: Color::WHITE,
            odd_fill: Color::WHITE,
        };
        motif.set_colors(&Palette::default());
        motif
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn squares(&self) -> Vec<SteppedSquare> {
        geometry::stepped_diamond(self.center, self.square * self.clock.scale_factor())
    }
}

impl Motif for SteppedDiamondMotif {
    fn name(&self) -> &str {
        "stepped-diamond"
    }

    fn update(&mut self, delta: f32) {
        self.clock.update(delta);
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        for square in self.squares() {
            match self.style {
                MotifStyle::Outline => draw_outline(sink, &square.polygon, self.line),
                MotifStyle::Filled => {
                    let fill = if square.even {
                        self.even_fill
                    } else {
                        self.odd_fill
                    };
                    draw_filled(sink, &square.polygon, fill, self.line);
                }
            }
        }
    }

    fn set_colors(&mut self, palette: &Palette) {
        self.line = palette.line;
        self.even_fill = palette.dark_green;
        self.odd_fill = palette.dark_orange;
    }

    fn set_animation_params(&mut self, orbit: f32, breathing: f32, min: f32, max: f32) {
        self.clock.set_animation_params(orbit, breathing, min, max);
    }

    fn apply_controls(&mut self, controls: &ControlState) {
        apply_breathing_controls(&mut self.clock, controls);
    }
}
