use serde::{Deserialize, Serialize};

pub const MULTIPLIER_STEP: f32 = 0.1;
pub const MIN_MULTIPLIER: f32 = 0.1;
pub const MAX_MULTIPLIER: f32 = 3.0;

/// One discrete input event, already decoded from the host's key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlEvent {
    SpeedUp,
    SlowDown,
    ToggleReverseOrbit,
    ToggleReverseScroll,
    ToggleSwapColors,
    ToggleHelp,
    ToggleInteractive,
    ToggleAutoPlay,
    Reset,
}

impl ControlEvent {
    /// Maps the default keyboard layout onto events.
    pub fn from_key(key: char) -> Option<Self> {
        let event = match key.to_ascii_lowercase() {
            '=' | '+' => ControlEvent::SpeedUp,
            '-' => ControlEvent::SlowDown,
            'r' => ControlEvent::ToggleReverseOrbit,
            't' => ControlEvent::ToggleReverseScroll,
            'c' => ControlEvent::ToggleSwapColors,
            'h' => ControlEvent::ToggleHelp,
            'i' => ControlEvent::ToggleInteractive,
            'a' => ControlEvent::ToggleAutoPlay,
            '0' => ControlEvent::Reset,
            _ => return None,
        };
        Some(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub orbit_multiplier: f32,
    pub breathing_multiplier: f32,
    pub scroll_multiplier: f32,
    pub reverse_orbit: bool,
    pub reverse_scroll: bool,
    pub swap_colors: bool,
    pub show_help: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            orbit_multiplier: 1.0,
            breathing_multiplier: 1.0,
            scroll_multiplier: 1.0,
            reverse_orbit: false,
            reverse_scroll: false,
            swap_colors: false,
            show_help: true,
        }
    }
}

fn step_multiplier(value: f32, delta: f32) -> f32 {
    // Snap to tenths so repeated steps land exactly on the limits.
    (((value + delta) * 10.0).round() / 10.0).clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
}

impl ControlState {
    /// Applies one event. Returns whether it changed this state; the
    /// kolintang mode toggles are not part of it and always return `false`.
    pub fn apply(&mut self, event: ControlEvent) -> bool {
        let before = *self;
        match event {
            ControlEvent::SpeedUp | ControlEvent::SlowDown => {
                let delta = if event == ControlEvent::SpeedUp {
                    MULTIPLIER_STEP
                } else {
                    -MULTIPLIER_STEP
                };
                self.orbit_multiplier = step_multiplier(self.orbit_multiplier, delta);
                self.breathing_multiplier = step_multiplier(self.breathing_multiplier, delta);
                self.scroll_multiplier = step_multiplier(self.scroll_multiplier, delta);
            }
            ControlEvent::ToggleReverseOrbit => self.reverse_orbit = !self.reverse_orbit,
            ControlEvent::ToggleReverseScroll => self.reverse_scroll = !self.reverse_scroll,
            ControlEvent::ToggleSwapColors => self.swap_colors = !self.swap_colors,
            ControlEvent::ToggleHelp => self.show_help = !self.show_help,
            ControlEvent::Reset => self.reset(),
            ControlEvent::ToggleInteractive | ControlEvent::ToggleAutoPlay => {}
        }
        *self != before
    }

    /// Restores multipliers and direction/color flags. Help visibility is
    /// left as is.
    pub fn reset(&mut self) {
        *self = Self {
            show_help: self.show_help,
            ..Self::default()
        };
    }
}
