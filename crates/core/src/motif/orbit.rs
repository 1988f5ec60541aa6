use serde::{Deserialize, Serialize};

use super::{draw_circle_outline, draw_disc, draw_filled, draw_outline, Motif, MotifStyle};
use crate::{
    anim::{AnimationClock, OrbitDirection},
    config::AnimationConfig,
    controls::ControlState,
    geometry::{CrossPattern, EyePattern, EYE_OUTER_FILLED_RATIO, EYE_OUTER_RATIO},
    palette::{Color, Palette, PatternColors},
    raster::PixelPoint,
    render::DrawSink,
};

const CENTER_SCALE: f32 = 1.1;
const SATELLITE_SCALE: f32 = 0.8;

/// A center pattern ringed by `satellites` smaller copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitLayout {
    pub center: PixelPoint,
    pub pattern_size: f32,
    pub orbit_radius: f32,
    pub satellites: usize,
}

impl OrbitLayout {
    /// Pattern centers and sizes for the given orbit angle; the center
    /// pattern comes first.
    pub fn placements(&self, clock: &AnimationClock) -> Vec<(PixelPoint, f32)> {
        let mut out = Vec::with_capacity(self.satellites + 1);
        out.push((self.center, self.pattern_size * CENTER_SCALE));
        out.extend(
            clock
                .orbit_positions(self.center, self.orbit_radius, self.satellites)
                .into_iter()
                .map(|p| (p, self.pattern_size * SATELLITE_SCALE)),
        );
        out
    }
}

fn apply_orbit_controls(clock: &mut AnimationClock, controls: &ControlState) {
    clock.set_direction(OrbitDirection::from_reversed(controls.reverse_orbit));
    clock.set_multipliers(controls.orbit_multiplier, controls.breathing_multiplier);
}

/// Hexagons with concentric circles orbiting a larger copy.
#[derive(Debug, Clone)]
pub struct EyeMotif {
    layout: OrbitLayout,
    style: MotifStyle,
    clock: AnimationClock,
    colors: PatternColors,
    line: Color,
}

impl EyeMotif {
    pub fn new(layout: OrbitLayout, style: MotifStyle, animation: &AnimationConfig) -> Self {
        let palette = Palette::default();
        Self {
            layout,
            style,
            clock: AnimationClock::new(animation),
            colors: palette.eye,
            line: palette.line,
        }
    }

    pub fn layout(&self) -> &OrbitLayout {
        &self.layout
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn patterns(&self) -> Vec<EyePattern> {
        let ratio = match self.style {
            MotifStyle::Outline => EYE_OUTER_RATIO,
            MotifStyle::Filled => EYE_OUTER_FILLED_RATIO,
        };
        self.layout
            .placements(&self.clock)
            .into_iter()
            .map(|(center, size)| EyePattern::new(center, size, ratio))
            .collect()
    }
}

impl Motif for EyeMotif {
    fn name(&self) -> &str {
        "eye"
    }

    fn update(&mut self, delta: f32) {
        self.clock.update(delta);
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        for eye in self.patterns() {
            match self.style {
                MotifStyle::Outline => {
                    draw_outline(sink, &eye.hexagon, self.line);
                    draw_circle_outline(sink, eye.center, eye.outer_radius, self.line);
                    draw_circle_outline(sink, eye.center, eye.inner_radius, self.line);
                }
                MotifStyle::Filled => {
                    let c = &self.colors;
                    draw_filled(sink, &eye.hexagon, c.hex_fill, c.hex_outline);
                    draw_disc(sink, eye.center, eye.outer_radius, c.accent);
                    draw_disc(sink, eye.center, eye.inner_radius, c.inner_circle);
                }
            }
        }
    }

    fn set_colors(&mut self, palette: &Palette) {
        self.colors = palette.eye;
        self.line = palette.line;
    }

    fn set_animation_params(&mut self, orbit: f32, breathing: f32, min: f32, max: f32) {
        self.clock.set_animation_params(orbit, breathing, min, max);
    }

    fn apply_controls(&mut self, controls: &ControlState) {
        apply_orbit_controls(&mut self.clock, controls);
    }
}

/// Hexagons with a plus sign orbiting a larger copy.
#[derive(Debug, Clone)]
pub struct CrossMotif {
    layout: OrbitLayout,
    style: MotifStyle,
    clock: AnimationClock,
    colors: PatternColors,
    line: Color,
}

impl CrossMotif {
    pub fn new(layout: OrbitLayout, style: MotifStyle, animation: &AnimationConfig) -> Self {
        let palette = Palette::default();
        Self {
            layout,
            style,
            clock: AnimationClock::new(animation),
            colors: palette.cross,
            line: palette.line,
        }
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn patterns(&self) -> Vec<CrossPattern> {
        self.layout
            .placements(&self.clock)
            .into_iter()
            .map(|(center, size)| CrossPattern::new(center, size))
            .collect()
    }
}

impl Motif for CrossMotif {
    fn name(&self) -> &str {
        "cross"
    }

    fn update(&mut self, delta: f32) {
        self.clock.update(delta);
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        for cross in self.patterns() {
            match self.style {
                MotifStyle::Outline => {
                    draw_outline(sink, &cross.hexagon, self.line);
                    for arm in &cross.arms {
                        draw_outline(sink, arm, self.line);
                    }
                    draw_circle_outline(sink, cross.center, cross.inner_radius, self.line);
                }
                MotifStyle::Filled => {
                    let c = &self.colors;
                    draw_filled(sink, &cross.hexagon, c.hex_fill, c.hex_outline);
                    for arm in &cross.arms {
                        draw_filled(sink, arm, c.accent, self.line);
                    }
                    draw_disc(sink, cross.center, cross.inner_radius, c.inner_circle);
                }
            }
        }
    }

    fn set_colors(&mut self, palette: &Palette) {
        self.colors = palette.cross;
        self.line = palette.line;
    }

    fn set_animation_params(&mut self, orbit: f32, breathing: f32, min: f32, max: f32) {
        self.clock.set_animation_params(orbit, breathing, min, max);
    }

    fn apply_controls(&mut self, controls: &ControlState) {
        apply_orbit_controls(&mut self.clock, controls);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawList;

    fn layout() -> OrbitLayout {
        OrbitLayout {
            center: PixelPoint::new(400.0, 300.0),
            pattern_size: 70.0,
            orbit_radius: 130.0,
            satellites: 6,
        }
    }

    #[test]
    fn placements_put_the_larger_pattern_first() {
        let clock = AnimationClock::default();
        let placements = layout().placements(&clock);
        assert_eq!(placements.len(), 7);
        assert_eq!(placements[0].0, PixelPoint::new(400.0, 300.0));
        assert!((placements[0].1 - 77.0).abs() < 1e-4);
        assert!((placements[1].1 - 56.0).abs() < 1e-4);
        assert!((placements[1].0.x - 530.0).abs() < 1e-3);
    }

    #[test]
    fn satellites_follow_the_orbit_angle() {
        let mut eye = EyeMotif::new(layout(), MotifStyle::Outline, &AnimationConfig::default());
        let before = eye.patterns()[1].center;
        eye.update(1.0);
        let after = eye.patterns()[1].center;
        assert_ne!(before, after);
        // The center pattern never moves.
        assert_eq!(eye.patterns()[0].center, layout().center);
    }

    #[test]
    fn reverse_control_flips_the_orbit() {
        let mut cross = CrossMotif::new(layout(), MotifStyle::Filled, &AnimationConfig::default());
        cross.apply_controls(&ControlState {
            reverse_orbit: true,
            ..ControlState::default()
        });
        cross.update(1.0);
        assert!(cross.clock().orbit_angle() > 5.0);
    }

    #[test]
    fn animation_params_reach_the_clock() {
        let mut eye = EyeMotif::new(layout(), MotifStyle::Outline, &AnimationConfig::default());
        eye.set_animation_params(1.0, 0.5, 0.7, 1.3);
        eye.update(0.5);
        assert!((eye.clock().orbit_angle() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn outline_eye_draws_only_pixels() {
        let eye = EyeMotif::new(layout(), MotifStyle::Outline, &AnimationConfig::default());
        let mut list = DrawList::new();
        eye.draw(&mut list);
        let stats = list.stats();
        assert_eq!(stats.pixel_batches, 7 * 3);
        assert_eq!(stats.polygons, 0);
    }

    #[test]
    fn filled_cross_uses_palette_roles() {
        let mut cross = CrossMotif::new(layout(), MotifStyle::Filled, &AnimationConfig::default());
        let mut palette = Palette::default();
        palette.swap_eye_cross();
        cross.set_colors(&palette);
        assert_eq!(cross.colors, palette.cross);

        let mut list = DrawList::new();
        cross.draw(&mut list);
        // Hexagon and two arms filled, plus one disc, per pattern.
        assert_eq!(list.stats().polygons, 7 * 4);
        assert_eq!(list.stats().arcs, 7);
    }
}
