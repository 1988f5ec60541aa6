use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::{config::AnimationConfig, raster::PixelPoint};

/// Wraps an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Maps a breathing phase onto `[min_scale, effective_max]`.
pub fn breathing_scale(phase: f32, min_scale: f32, effective_max: f32) -> f32 {
    min_scale + ((phase.sin() + 1.0) / 2.0) * (effective_max - min_scale)
}

/// Position of a point orbiting `center` at `radius`.
pub fn orbit_position(center: PixelPoint, radius: f32, angle: f32) -> PixelPoint {
    let (sin, cos) = angle.sin_cos();
    PixelPoint::new(center.x + radius * cos, center.y + radius * sin)
}

/// Positions of `count` evenly spaced satellites, rotated by `orbit_angle`.
pub fn orbit_positions(
    center: PixelPoint,
    radius: f32,
    count: usize,
    orbit_angle: f32,
) -> Vec<PixelPoint> {
    (0..count)
        .map(|i| {
            let base = TAU * i as f32 / count as f32;
            orbit_position(center, radius, base + orbit_angle)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitDirection {
    #[default]
    Forward,
    Reverse,
}

impl OrbitDirection {
    pub fn sign(self) -> f32 {
        match self {
            OrbitDirection::Forward => 1.0,
            OrbitDirection::Reverse => -1.0,
        }
    }

    pub fn from_reversed(reversed: bool) -> Self {
        if reversed {
            OrbitDirection::Reverse
        } else {
            OrbitDirection::Forward
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitState {
    pub angle: f32,
    pub speed: f32,
}

impl OrbitState {
    pub fn new(speed: f32) -> Self {
        Self { angle: 0.0, speed }
    }

    pub fn advance(&mut self, delta: f32, direction: OrbitDirection, multiplier: f32) {
        self.angle = wrap_angle(self.angle + direction.sign() * self.speed * multiplier * delta);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreathingState {
    pub phase: f32,
    pub speed: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// `0` for normal breathing, `π` for the antiphase variant.
    pub phase_offset: f32,
}

impl BreathingState {
    pub fn new(speed: f32, min_scale: f32, max_scale: f32) -> Self {
        Self {
            phase: 0.0,
            speed,
            min_scale,
            max_scale,
            phase_offset: 0.0,
        }
    }

    pub fn advance(&mut self, delta: f32, multiplier: f32) {
        self.phase = wrap_angle(self.phase + self.speed * multiplier * delta);
    }

    pub fn set_inverse(&mut self, inverse: bool) {
        self.phase_offset = if inverse { PI } else { 0.0 };
    }

    pub fn is_inverse(&self) -> bool {
        self.phase_offset != 0.0
    }

    pub fn scale_factor(&self, effective_max: f32) -> f32 {
        breathing_scale(self.phase + self.phase_offset, self.min_scale, effective_max)
    }
}

/// Keeps a breathing shape of a given extent inside fixed guide lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConstraint {
    pub boundary_width: f32,
    pub shape_extent: f32,
}

impl BoundaryConstraint {
    pub fn new(boundary_width: f32, shape_extent: f32) -> Self {
        Self {
            boundary_width,
            shape_extent,
        }
    }

    /// Caps `max_scale` so the scaled extent fits the boundary. The result is
    /// never below `min_scale`; a non-positive extent leaves `max_scale`
    /// untouched.
    pub fn effective_max(&self, min_scale: f32, max_scale: f32) -> f32 {
        if self.shape_extent <= 0.0 {
            return max_scale;
        }
        max_scale
            .min(self.boundary_width / self.shape_extent)
            .max(min_scale)
    }
}

/// Orbit and breathing state for one motif instance.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClock {
    orbit: OrbitState,
    breathing: BreathingState,
    direction: OrbitDirection,
    orbit_multiplier: f32,
    breathing_multiplier: f32,
    boundary: Option<BoundaryConstraint>,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

impl AnimationClock {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            orbit: OrbitState::new(config.orbit_speed),
            breathing: BreathingState::new(
                config.breathing_speed,
                config.min_scale,
                config.max_scale,
            ),
            direction: OrbitDirection::Forward,
            orbit_multiplier: 1.0,
            breathing_multiplier: 1.0,
            boundary: None,
        }
    }

    pub fn with_boundary(mut self, boundary: BoundaryConstraint) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn with_inverse_breathing(mut self, inverse: bool) -> Self {
        self.breathing.set_inverse(inverse);
        self
    }

    pub fn set_animation_params(
        &mut self,
        orbit_speed: f32,
        breathing_speed: f32,
        min_scale: f32,
        max_scale: f32,
    ) {
        self.orbit.speed = orbit_speed;
        self.breathing.speed = breathing_speed;
        self.breathing.min_scale = min_scale;
        self.breathing.max_scale = max_scale;
    }

    pub fn set_direction(&mut self, direction: OrbitDirection) {
        self.direction = direction;
    }

    pub fn set_multipliers(&mut self, orbit: f32, breathing: f32) {
        self.orbit_multiplier = orbit;
        self.breathing_multiplier = breathing;
    }

    pub fn set_boundary(&mut self, boundary: Option<BoundaryConstraint>) {
        self.boundary = boundary;
    }

    pub fn update(&mut self, delta: f32) {
        self.orbit.advance(delta, self.direction, self.orbit_multiplier);
        self.breathing.advance(delta, self.breathing_multiplier);
    }

    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    pub fn breathing(&self) -> &BreathingState {
        &self.breathing
    }

    pub fn orbit_angle(&self) -> f32 {
        self.orbit.angle
    }

    pub fn breathing_phase(&self) -> f32 {
        self.breathing.phase
    }

    pub fn min_scale(&self) -> f32 {
        self.breathing.min_scale
    }

    pub fn effective_max_scale(&self) -> f32 {
        let (min, max) = (self.breathing.min_scale, self.breathing.max_scale);
        match self.boundary {
            Some(boundary) => boundary.effective_max(min, max),
            None => max,
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.breathing.scale_factor(self.effective_max_scale())
    }

    pub fn orbit_positions(&self, center: PixelPoint, radius: f32, count: usize) -> Vec<PixelPoint> {
        orbit_positions(center, radius, count, self.orbit.angle)
    }
}

/// Linear offset that wraps into `[0, period)`; drives scrolling columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub offset: f32,
    pub speed: f32,
    pub period: f32,
    pub reversed: bool,
    pub multiplier: f32,
}

impl ScrollState {
    pub fn new(speed: f32, period: f32) -> Self {
        Self {
            offset: 0.0,
            speed,
            period,
            reversed: false,
            multiplier: 1.0,
        }
    }

    pub fn update(&mut self, delta: f32) {
        let sign = if self.reversed { -1.0 } else { 1.0 };
        let next = self.offset + sign * self.speed * self.multiplier * delta;
        self.offset = if self.period > 0.0 {
            let wrapped = next.rem_euclid(self.period);
            if wrapped >= self.period {
                0.0
            } else {
                wrapped
            }
        } else {
            next
        };
    }
}
