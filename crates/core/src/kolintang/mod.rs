use std::f32::consts::{FRAC_PI_2, PI, TAU};

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    config::KolintangConfig,
    controls::ControlEvent,
    geometry,
    motif::{draw_filled, Motif},
    palette::{Color, KolintangColors, Palette},
    raster::PixelPoint,
    render::DrawSink,
    timeline::IntervalTimer,
    Result,
};

pub const BAR_WIDTH: f32 = 52.0;
pub const LEFT_MARGIN: f32 = 32.0;
pub const RIGHT_MARGIN: f32 = 60.0;
/// How far each bar reaches past the base on either side.
pub const BAR_EXTENSION: f32 = 50.0;
pub const CORNER_RADIUS: f32 = 10.0;
pub const HOLE_RADIUS: f32 = 4.0;
pub const HOLE_OFFSET: f32 = 23.0;
pub const MALLET_REST_GAP: f32 = 50.0;
pub const MALLET_HEAD_RADIUS: f32 = 34.0;
pub const MALLET_HANDLE_WIDTH: f32 = 7.0;
pub const MALLET_HANDLE_LENGTH: f32 = 120.0;
/// Height of the arc a sweeping mallet travels between bars.
pub const SWEEP_ARC_HEIGHT: f32 = 30.0;
pub const STRIKE_LIFT_OUT: f32 = 70.0;
pub const STRIKE_LIFT_BACK: f32 = 40.0;
/// Progress a sweeping mallet restarts from, so it never stalls at zero.
pub const RESTART_PROGRESS: f32 = 0.01;
const HIT_PROGRESS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KolintangBar {
    pub index: usize,
    pub is_vibrating: bool,
    pub vibration_phase: f32,
}

impl KolintangBar {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            is_vibrating: false,
            vibration_phase: 0.0,
        }
    }

    pub fn strike(&mut self) {
        self.is_vibrating = true;
        self.vibration_phase = 0.0;
    }

    pub fn stop(&mut self) {
        self.is_vibrating = false;
        self.vibration_phase = 0.0;
    }

    /// Advances the vibration; it ends once the phase reaches π.
    pub fn advance(&mut self, delta: f32, speed: f32) {
        if !self.is_vibrating {
            return;
        }
        self.vibration_phase += delta * speed;
        if self.vibration_phase >= PI {
            self.stop();
        }
    }

    /// `(horizontal, vertical)` offset of the bar. The outer `sin(phase)`
    /// envelope brings both back to zero at `phase = π`.
    pub fn displacement(&self, config: &KolintangConfig) -> (f32, f32) {
        if !self.is_vibrating {
            return (0.0, 0.0);
        }
        let envelope = self.vibration_phase.sin();
        let wave = self.vibration_phase * config.vibration_frequency;
        (
            wave.cos() * config.horizontal_vibration * envelope,
            wave.sin() * config.max_displacement * envelope,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepDirection {
    LeftMalletMovingRight,
    LeftMalletMovingLeft,
    RightMalletMovingLeft,
    RightMalletMovingRight,
}

impl SweepDirection {
    /// Next bar of a half-instrument sweep. The left mallet covers
    /// `[0, n/2)`, the right one `[n/2, n)`; the boundary bar is struck twice
    /// when the direction flips.
    pub fn advance(self, current: usize, bar_count: usize) -> (usize, SweepDirection) {
        let half = bar_count / 2;
        match self {
            SweepDirection::LeftMalletMovingRight if current + 1 >= half => {
                (half.saturating_sub(1), SweepDirection::LeftMalletMovingLeft)
            }
            SweepDirection::LeftMalletMovingRight => (current + 1, self),
            SweepDirection::LeftMalletMovingLeft if current == 0 => {
                (0, SweepDirection::LeftMalletMovingRight)
            }
            SweepDirection::LeftMalletMovingLeft => (current - 1, self),
            SweepDirection::RightMalletMovingLeft if current <= half => {
                (half, SweepDirection::RightMalletMovingRight)
            }
            SweepDirection::RightMalletMovingLeft => (current - 1, self),
            SweepDirection::RightMalletMovingRight if current + 1 >= bar_count => {
                (bar_count - 1, SweepDirection::RightMalletMovingLeft)
            }
            SweepDirection::RightMalletMovingRight => (current + 1, self),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mallet {
    /// Travel progress in `[0, 1]`; zero means the mallet is idle.
    pub animation_progress: f32,
    pub target_bar_index: usize,
    pub last_hit_position: Option<PixelPoint>,
    pub current_bar: usize,
    pub direction: SweepDirection,
}

impl Mallet {
    fn new(start_bar: usize, direction: SweepDirection) -> Self {
        Self {
            animation_progress: RESTART_PROGRESS,
            target_bar_index: start_bar,
            last_hit_position: None,
            current_bar: start_bar,
            direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayMode {
    Sequential,
    Random,
    Interactive,
    AutoPlay,
}

/// One-shot strike towards a single bar and back to the rest position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    pub bar: usize,
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl HitBox {
    /// Half-open on the far edges.
    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// On-screen geometry of one bar for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    /// Undisplaced left edge.
    pub x: f32,
    pub hit_box: HitBox,
    pub center: PixelPoint,
    /// Height of the base where the bar crosses it.
    pub base_height: f32,
    pub vertical_displacement: f32,
}

fn quadratic_bezier(p0: PixelPoint, control: PixelPoint, p1: PixelPoint, t: f32) -> PixelPoint {
    p0.lerp(control, t).lerp(control.lerp(p1, t), t)
}

#[derive(Debug)]
pub struct KolintangSequencer {
    config: KolintangConfig,
    center: PixelPoint,
    bars: Vec<KolintangBar>,
    mallets: [Mallet; 2],
    interactive: bool,
    auto_play: bool,
    strike: Option<Strike>,
    auto_timer: IntervalTimer,
    auto_index: usize,
    auto_forward: bool,
    rng: StdRng,
    layout: Vec<BarLayout>,
    colors: KolintangColors,
}

impl KolintangSequencer {
    /// Builds an instrument centered on `center`. The bar count must be even
    /// and at least two.
    pub fn new(config: &KolintangConfig, center: PixelPoint) -> Result<Self> {
        config.validate()?;
        let n = config.bar_count;
        let mut sequencer = Self {
            config: *config,
            center,
            bars: (0..n).map(KolintangBar::new).collect(),
            mallets: [
                Mallet::new(0, SweepDirection::LeftMalletMovingRight),
                Mallet::new(n - 1, SweepDirection::RightMalletMovingLeft),
            ],
            interactive: config.interactive,
            auto_play: false,
            strike: None,
            auto_timer: IntervalTimer::new(config.auto_play_interval),
            auto_index: 0,
            auto_forward: true,
            rng: StdRng::seed_from_u64(config.seed),
            layout: Vec::with_capacity(n),
            colors: KolintangColors::default(),
        };
        if !config.sequential {
            for mallet in &mut sequencer.mallets {
                mallet.target_bar_index = sequencer.rng.gen_range(0..n);
            }
        }
        sequencer.refresh_layout();
        tracing::debug!(bars = n, sequential = config.sequential, "kolintang ready");
        Ok(sequencer)
    }

    pub fn bars(&self) -> &[KolintangBar] {
        &self.bars
    }

    pub fn mallets(&self) -> &[Mallet; 2] {
        &self.mallets
    }

    pub fn strike(&self) -> Option<Strike> {
        self.strike
    }

    pub fn layout(&self) -> &[BarLayout] {
        &self.layout
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn is_auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn mode(&self) -> PlayMode {
        if self.auto_play {
            PlayMode::AutoPlay
        } else if self.interactive {
            PlayMode::Interactive
        } else if self.config.sequential {
            PlayMode::Sequential
        } else {
            PlayMode::Random
        }
    }

    /// Entering interactive mode silences every bar and cancels any strike.
    pub fn set_interactive_mode(&mut self, interactive: bool) {
        self.interactive = interactive;
        if interactive {
            self.bars.iter_mut().for_each(KolintangBar::stop);
            self.strike = None;
        }
        tracing::debug!(interactive, "kolintang interactive mode");
    }

    pub fn set_auto_play_mode(&mut self, auto_play: bool) {
        if self.auto_play != auto_play {
            self.toggle_auto_play();
        }
    }

    pub fn toggle_auto_play(&mut self) {
        self.auto_play = !self.auto_play;
        if self.auto_play {
            self.auto_index = 0;
            self.auto_forward = true;
            self.auto_timer.reset();
            self.strike = None;
        }
        tracing::debug!(auto_play = self.auto_play, "kolintang auto-play mode");
    }

    /// Starts a strike on the bar under `point`. Only honoured in interactive
    /// mode while no strike is running.
    pub fn handle_click(&mut self, point: PixelPoint) -> bool {
        if !self.interactive || self.strike.is_some() {
            return false;
        }
        match self.layout.iter().position(|bar| bar.hit_box.contains(point)) {
            Some(bar) => {
                tracing::trace!(bar, "kolintang bar clicked");
                self.strike = Some(Strike { bar, progress: 0.0 });
                true
            }
            None => false,
        }
    }

    pub fn update(&mut self, delta: f32) {
        let speed = self.config.vibration_speed;
        for bar in &mut self.bars {
            bar.advance(delta, speed);
        }

        if self.auto_play {
            self.schedule_auto_play(delta);
            self.advance_strike(delta);
        } else if self.interactive {
            self.advance_strike(delta);
        } else {
            for i in 0..self.mallets.len() {
                self.advance_mallet(i, delta);
            }
        }

        self.refresh_layout();
    }

    fn hit_bar(&mut self, index: usize) {
        // Targets outside the instrument are ignored.
        if let Some(bar) = self.bars.get_mut(index) {
            bar.strike();
            tracing::trace!(bar = index, "kolintang bar hit");
        }
    }

    fn schedule_auto_play(&mut self, delta: f32) {
        self.auto_timer.tick(delta);
        if !self.auto_timer.fire_if(self.strike.is_none()) {
            return;
        }
        self.strike = Some(Strike {
            bar: self.auto_index,
            progress: 0.0,
        });

        let n = self.bars.len();
        if self.auto_forward {
            if self.auto_index + 1 >= n {
                self.auto_forward = false;
                self.auto_index = n.saturating_sub(2);
            } else {
                self.auto_index += 1;
            }
        } else if self.auto_index == 0 {
            self.auto_forward = true;
            self.auto_index = 1.min(n - 1);
        } else {
            self.auto_index -= 1;
        }
    }

    fn advance_strike(&mut self, delta: f32) {
        let Some(mut strike) = self.strike else {
            return;
        };
        let before = strike.progress;
        strike.progress += delta * self.config.strike_speed;
        if before < HIT_PROGRESS && strike.progress >= HIT_PROGRESS {
            self.hit_bar(strike.bar);
        }
        self.strike = (strike.progress < 1.0).then_some(strike);
    }

    fn advance_mallet(&mut self, i: usize, delta: f32) {
        let mallet = self.mallets[i];
        if mallet.animation_progress <= 0.0 {
            return;
        }
        let progress = mallet.animation_progress + delta * self.config.mallet_speed;
        self.mallets[i].animation_progress = progress;

        if mallet.animation_progress < HIT_PROGRESS && progress >= HIT_PROGRESS {
            self.hit_bar(mallet.target_bar_index);
        }
        if progress >= 1.0 {
            let hit = self.sweep_target(mallet.target_bar_index);
            let mallet = &mut self.mallets[i];
            mallet.last_hit_position = hit;
            mallet.animation_progress = RESTART_PROGRESS;
            self.retarget(i);
        }
    }

    fn retarget(&mut self, i: usize) {
        let n = self.bars.len();
        if !self.config.sequential {
            self.mallets[i].target_bar_index = self.rng.gen_range(0..n);
            return;
        }
        let mallet = &mut self.mallets[i];
        let (next, direction) = mallet.direction.advance(mallet.current_bar, n);
        if direction != mallet.direction {
            tracing::debug!(mallet = i, ?direction, "kolintang sweep reversed");
        }
        mallet.current_bar = next;
        mallet.direction = direction;
        mallet.target_bar_index = next;
    }

    fn spacing(&self) -> f32 {
        let n = self.bars.len() as f32;
        let available = self.config.length - LEFT_MARGIN - RIGHT_MARGIN;
        (available - BAR_WIDTH * n) / (n - 1.0)
    }

    fn start_x(&self) -> f32 {
        self.center.x - self.config.length / 2.0 + LEFT_MARGIN
    }

    fn bar_x(&self, index: usize) -> f32 {
        self.start_x() + (BAR_WIDTH + self.spacing()) * index as f32
    }

    /// Where a sweeping mallet lands on `index`: the undisplaced bar middle
    /// on the instrument's center line.
    fn sweep_target(&self, index: usize) -> Option<PixelPoint> {
        (index < self.bars.len())
            .then(|| PixelPoint::new(self.bar_x(index) + BAR_WIDTH / 2.0, self.center.y))
    }

    fn refresh_layout(&mut self) {
        let left_x = self.center.x - self.config.length / 2.0;
        let (lw, rw) = (self.config.left_width, self.config.right_width);
        let layout: Vec<BarLayout> = self
            .bars
            .iter()
            .map(|bar| {
                let x = self.bar_x(bar.index);
                let t = (x - left_x) / self.config.length;
                let base_height = lw + t * (rw - lw);
                let height = base_height + BAR_EXTENSION * 2.0;
                let (dx, dy) = bar.displacement(&self.config);
                let top = self.center.y - height / 2.0 + dy;
                let left = x + dx;
                BarLayout {
                    x,
                    hit_box: HitBox {
                        x: left,
                        y: top,
                        width: BAR_WIDTH,
                        height,
                    },
                    center: PixelPoint::new(left + BAR_WIDTH / 2.0, top + height / 2.0),
                    base_height,
                    vertical_displacement: dy,
                }
            })
            .collect();
        self.layout = layout;
    }

    /// Resting spot of the one-shot mallet, below the lowest bar.
    pub fn rest_position(&self) -> PixelPoint {
        let bottom = self
            .layout
            .iter()
            .map(|b| b.hit_box.y + b.hit_box.height)
            .fold(0.0f32, f32::max);
        let n = self.bars.len() as f32;
        PixelPoint::new(
            self.start_x() + (BAR_WIDTH + self.spacing()) * n / 2.0,
            bottom + MALLET_REST_GAP,
        )
    }

    /// Head position of sweeping mallet `i`, or `None` while it is idle.
    pub fn mallet_position(&self, i: usize) -> Option<PixelPoint> {
        let mallet = self.mallets.get(i)?;
        if mallet.animation_progress <= 0.0 {
            return None;
        }
        let target = self.sweep_target(mallet.target_bar_index)?;
        let start_bar = if i == 0 { 0 } else { self.bars.len() - 1 };
        let last = mallet
            .last_hit_position
            .or_else(|| self.sweep_target(start_bar))
            .unwrap_or(target);
        let p = mallet.animation_progress;
        Some(PixelPoint::new(
            last.x + (target.x - last.x) * p,
            self.center.y - (p * PI).sin() * SWEEP_ARC_HEIGHT,
        ))
    }

    /// Head position of the one-shot mallet: at rest, or on a two-segment
    /// quadratic Bézier arc out to the struck bar and back.
    pub fn strike_position(&self) -> PixelPoint {
        let rest = self.rest_position();
        let Some(strike) = self.strike else {
            return rest;
        };
        let Some(bar) = self.layout.get(strike.bar) else {
            return rest;
        };
        let target = bar.center;
        let mid_x = (rest.x + target.x) / 2.0;
        let low = rest.y.min(target.y);
        if strike.progress < HIT_PROGRESS {
            let control = PixelPoint::new(mid_x, low - STRIKE_LIFT_OUT);
            quadratic_bezier(rest, control, target, strike.progress * 2.0)
        } else {
            let control = PixelPoint::new(mid_x, low - STRIKE_LIFT_BACK);
            quadratic_bezier(target, control, rest, (strike.progress - HIT_PROGRESS) * 2.0)
        }
    }

    fn draw_base(&self, sink: &mut dyn DrawSink) {
        let base = geometry::horizontal_trapezoid(
            self.center,
            self.config.length,
            self.config.left_width,
            self.config.right_width,
        );
        draw_filled(sink, &base, self.colors.base, self.colors.outline);
    }

    fn draw_bar(&self, sink: &mut dyn DrawSink, index: usize, bar: &BarLayout) {
        let c = &self.colors;
        let shade = index as f32 / self.bars.len() as f32 * 0.2;
        let hb = bar.hit_box;
        let body = geometry::rect(hb.x, hb.y, hb.width, hb.height);
        draw_filled(sink, &body, c.bar.lightened(shade), c.outline);

        let r = CORNER_RADIUS;
        let corners = [
            (hb.x + r, hb.y + r, PI),
            (hb.x + hb.width - r, hb.y + r, PI + FRAC_PI_2),
            (hb.x + hb.width - r, hb.y + hb.height - r, 0.0),
            (hb.x + r, hb.y + hb.height - r, FRAC_PI_2),
        ];
        for (x, y, start) in corners {
            sink.draw_arc(PixelPoint::new(x, y), r, start, start + FRAC_PI_2, 8, c.outline);
        }

        let hole_x = hb.x + hb.width / 2.0;
        let top = self.center.y - bar.base_height / 2.0 + HOLE_OFFSET;
        let bottom = self.center.y + bar.base_height / 2.0 - HOLE_OFFSET;
        for y in [top, bottom] {
            let hole = PixelPoint::new(hole_x, y + bar.vertical_displacement);
            self.draw_round(sink, hole, HOLE_RADIUS, c.hole, 12);
        }
    }

    fn draw_round(&self, sink: &mut dyn DrawSink, center: PixelPoint, radius: f32, fill: Color, segments: usize) {
        let disc = geometry::circle_polygon(center, radius, segments);
        sink.draw_polygon_filled(geometry::open(&disc), fill);
        sink.draw_arc(center, radius, 0.0, TAU, segments, self.colors.outline);
    }

    fn draw_mallet(&self, sink: &mut dyn DrawSink, head: PixelPoint) {
        let c = &self.colors;
        self.draw_round(sink, head, MALLET_HEAD_RADIUS, c.head, 32);
        let handle = geometry::rect(
            head.x - MALLET_HANDLE_WIDTH / 2.0,
            head.y + MALLET_HEAD_RADIUS,
            MALLET_HANDLE_WIDTH,
            MALLET_HANDLE_LENGTH,
        );
        draw_filled(sink, &handle, c.handle, c.outline);
    }
}

impl Motif for KolintangSequencer {
    fn name(&self) -> &str {
        "kolintang"
    }

    fn update(&mut self, delta: f32) {
        KolintangSequencer::update(self, delta);
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        self.draw_base(sink);
        for (i, bar) in self.layout.iter().enumerate() {
            self.draw_bar(sink, i, bar);
        }
        if self.interactive || self.auto_play {
            self.draw_mallet(sink, self.strike_position());
        } else {
            for i in 0..self.mallets.len() {
                if let Some(head) = self.mallet_position(i) {
                    self.draw_mallet(sink, head);
                }
            }
        }
    }

    /// The instrument keeps its own wood colors regardless of the theme.
    fn set_colors(&mut self, _palette: &Palette) {}

    fn handle_event(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::ToggleInteractive => self.set_interactive_mode(!self.interactive),
            ControlEvent::ToggleAutoPlay => self.toggle_auto_play(),
            _ => {}
        }
    }

    fn handle_click(&mut self, point: PixelPoint) -> bool {
        KolintangSequencer::handle_click(self, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render::DrawList, MotifError};

    const CENTER: PixelPoint = PixelPoint::new(960.0, 540.0);

    fn continuous() -> KolintangConfig {
        KolintangConfig {
            interactive: false,
            ..KolintangConfig::default()
        }
    }

    fn sequencer() -> KolintangSequencer {
        KolintangSequencer::new(&continuous(), CENTER).unwrap()
    }

    #[test]
    fn rejects_bar_counts_outside_contract() {
        for bar_count in [0, 1, 7, 13] {
            let config = KolintangConfig {
                bar_count,
                ..continuous()
            };
            let err = KolintangSequencer::new(&config, CENTER).unwrap_err();
            assert!(matches!(err, MotifError::InvalidConfig(_)), "{bar_count}");
        }
    }

    #[test]
    fn left_sweep_reverses_at_both_ends() {
        let mut current = 0;
        let mut direction = SweepDirection::LeftMalletMovingRight;
        let mut seen = vec![current];
        for _ in 0..40 {
            (current, direction) = direction.advance(current, 12);
            assert!(current <= 5, "left mallet left its half: {current}");
            seen.push(current);
        }
        assert_eq!(&seen[..14], &[0, 1, 2, 3, 4, 5, 5, 4, 3, 2, 1, 0, 0, 1]);
    }

    #[test]
    fn right_sweep_stays_in_upper_half() {
        let mut current = 11;
        let mut direction = SweepDirection::RightMalletMovingLeft;
        let mut seen = vec![current];
        for _ in 0..14 {
            (current, direction) = direction.advance(current, 12);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![11, 10, 9, 8, 7, 6, 6, 7, 8, 9, 10, 11, 11, 10, 9]
        );
    }

    #[test]
    fn continuous_mallets_keep_to_their_halves() {
        let mut k = sequencer();
        for _ in 0..3000 {
            k.update(1.0 / 60.0);
            let [left, right] = k.mallets();
            assert!(left.target_bar_index <= 5);
            assert!((6..12).contains(&right.target_bar_index));
            assert!(left.animation_progress > 0.0 && left.animation_progress < 1.0);
        }
    }

    #[test]
    fn crossing_half_progress_hits_the_target_once() {
        let mut k = sequencer();
        k.mallets[0].animation_progress = 0.49;
        k.mallets[0].target_bar_index = 3;
        assert!(!k.bars[3].is_vibrating);

        k.update(0.02 / k.config.mallet_speed);
        assert!(k.bars[3].is_vibrating);

        let mut triggers = 0;
        let mut was_vibrating = true;
        let mut last_phase = k.bars[3].vibration_phase;
        for _ in 0..30 {
            k.update(1.0 / 60.0);
            let bar = k.bars[3];
            if bar.is_vibrating && (!was_vibrating || bar.vibration_phase < last_phase) {
                triggers += 1;
            }
            was_vibrating = bar.is_vibrating;
            last_phase = bar.vibration_phase;
        }
        assert_eq!(triggers, 0);
    }

    #[test]
    fn completed_sweep_commits_the_hit_position() {
        let mut k = sequencer();
        k.mallets[0].animation_progress = 0.99;
        k.update(0.1);
        let left = k.mallets()[0];
        assert_eq!(left.animation_progress, RESTART_PROGRESS);
        assert_eq!(left.target_bar_index, 1);
        assert_eq!(left.last_hit_position, k.sweep_target(0));
    }

    #[test]
    fn out_of_range_target_is_ignored() {
        let mut k = sequencer();
        k.mallets[0].animation_progress = 0.49;
        k.mallets[0].target_bar_index = 99;
        k.update(0.1);
        assert!(k.bars().iter().all(|b| !b.is_vibrating));
        assert!(k.mallet_position(0).is_none());
    }

    #[test]
    fn interactive_flag_comes_from_config() {
        let k = KolintangSequencer::new(&KolintangConfig::default(), CENTER).unwrap();
        assert_eq!(k.mode(), PlayMode::Interactive);
        let mut list = DrawList::new();
        Motif::draw(&k, &mut list);
        // A single mallet waits at rest.
        assert_eq!(list.stats().polygons, 1 + 12 * 3 + 2);
    }

    #[test]
    fn vibration_envelope_returns_to_rest() {
        let config = KolintangConfig::default();
        let mut bar = KolintangBar::new(0);
        bar.strike();
        assert_eq!(bar.displacement(&config), (0.0, 0.0));
        bar.advance(0.1, config.vibration_speed);
        let (h, v) = bar.displacement(&config);
        assert!(h.abs() <= config.horizontal_vibration);
        assert!(v.abs() <= config.max_displacement && v != 0.0);
        bar.advance(1.0, config.vibration_speed);
        assert!(!bar.is_vibrating);
        assert_eq!(bar.displacement(&config), (0.0, 0.0));
    }

    #[test]
    fn layout_spans_the_base() {
        let k = sequencer();
        let layout = k.layout();
        assert_eq!(layout.len(), 12);
        let left_x = CENTER.x - 1076.0 / 2.0;
        assert!((layout[0].x - (left_x + LEFT_MARGIN)).abs() < 1e-3);
        let right_edge = layout[11].x + BAR_WIDTH;
        assert!((right_edge - (CENTER.x + 1076.0 / 2.0 - RIGHT_MARGIN)).abs() < 1e-2);
        // Bars grow towards the wide end.
        assert!(layout[11].hit_box.height > layout[0].hit_box.height);
        assert!((layout[0].hit_box.height - layout[0].base_height - 100.0).abs() < 1e-3);

        let rest = k.rest_position();
        let bottom = layout[11].hit_box.y + layout[11].hit_box.height;
        assert!((rest.y - (bottom + MALLET_REST_GAP)).abs() < 1e-3);
    }

    #[test]
    fn click_strikes_a_bar_in_interactive_mode() {
        let mut k = sequencer();
        let target = k.layout()[4].center;
        assert!(!k.handle_click(target), "clicks are ignored outside interactive mode");

        k.set_interactive_mode(true);
        assert_eq!(k.mode(), PlayMode::Interactive);
        assert!(!k.handle_click(PixelPoint::new(0.0, 0.0)));
        assert!(k.handle_click(target));
        assert!(!k.handle_click(target), "busy mallet ignores clicks");
        assert_eq!(k.strike_position(), k.rest_position());

        let mut hits = 0;
        for _ in 0..30 {
            let before = k.bars()[4].is_vibrating;
            k.update(1.0 / 60.0);
            if !before && k.bars()[4].is_vibrating {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
        assert!(k.strike().is_none());
        assert!(k.handle_click(target));
    }

    #[test]
    fn strike_reaches_the_bar_at_half_progress() {
        let mut k = sequencer();
        k.set_interactive_mode(true);
        let target = k.layout()[2].center;
        assert!(k.handle_click(target));
        k.strike = Some(Strike { bar: 2, progress: 0.5 });
        let p = k.strike_position();
        assert!((p.x - target.x).abs() < 1e-3 && (p.y - target.y).abs() < 1e-3);

        k.strike = Some(Strike { bar: 2, progress: 0.25 });
        let rest = k.rest_position();
        assert!(k.strike_position().y < (rest.y + target.y) / 2.0);
    }

    #[test]
    fn auto_play_walks_the_whole_instrument() {
        let mut k = sequencer();
        k.toggle_auto_play();
        assert_eq!(k.mode(), PlayMode::AutoPlay);

        let mut struck = Vec::new();
        let mut previous = None;
        for _ in 0..400 {
            k.update(0.05);
            let now = k.strike().map(|s| s.bar);
            if let (Some(bar), None) = (now, previous) {
                struck.push(bar);
            }
            previous = now;
        }
        assert!(struck.len() >= 14, "{struck:?}");
        assert_eq!(
            &struck[..14],
            &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 10, 9]
        );
    }

    #[test]
    fn random_mode_is_reproducible_with_a_seed() {
        let config = KolintangConfig {
            sequential: false,
            seed: 7,
            ..continuous()
        };
        let run = || {
            let mut k = KolintangSequencer::new(&config, CENTER).unwrap();
            let mut targets = Vec::new();
            for _ in 0..600 {
                k.update(1.0 / 30.0);
                targets.push(k.mallets()[0].target_bar_index);
            }
            targets
        };
        let a = run();
        assert_eq!(a, run());
        assert!(a.iter().all(|t| *t < 12));
        assert_eq!(
            KolintangSequencer::new(&config, CENTER).unwrap().mode(),
            PlayMode::Random
        );
    }

    #[test]
    fn draw_emits_base_bars_and_mallets() {
        let k = sequencer();
        let mut list = DrawList::new();
        Motif::draw(&k, &mut list);
        let stats = list.stats();
        // Base, then per bar: body and two holes; then two mallets with a
        // head and a handle each.
        assert_eq!(stats.polygons, 1 + 12 * 3 + 2 * 2);
        assert_eq!(stats.arcs, 12 * (4 + 2) + 2);
    }
}
