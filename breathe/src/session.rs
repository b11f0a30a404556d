//! Breathing session state machine
//!
//! `Session` owns everything that changes over a session: the countdown, the
//! breath ticker, the pulse and the play flag. The view calls
//! [`Session::advance`] once per frame with the time since the last frame and
//! the user actions ([`Session::toggle_play`], [`Session::select_duration`])
//! whenever they happen. All transitions go through here.

use crate::breath::BreathTicker;
use crate::countdown::{Countdown, Tick};
use crate::pulse::Pulse;
use breathcore::BreathSettings;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
}

/// Something that happened during a call into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    Paused,
    /// The countdown reached zero and the session stopped itself.
    Ended,
    PhaseFlipped { exhale: bool, count: u64 },
    DurationSelected(u64),
    CountdownTick { remaining_ms: u64 },
}

pub struct Session {
    durations_ms: Vec<u64>,
    selected_duration_ms: u64,
    countdown: Countdown,
    breath: BreathTicker,
    pulse: Pulse,
    playing: bool,
    exhale: bool,
    completed: bool,
    /// Ring position when the current countdown step began, if it was not
    /// on a step boundary (set on pause so the arc resumes where it stopped).
    ring_hold: Option<f32>,
}

impl Session {
    pub fn new(settings: &BreathSettings) -> Self {
        let selected = settings.default_duration_ms;
        Self {
            durations_ms: settings.durations_ms.clone(),
            selected_duration_ms: selected,
            countdown: Countdown::new(selected, settings.tick()),
            breath: BreathTicker::new(settings.breath_interval()),
            pulse: Pulse::new(settings.pulse(), settings.pulse_scale_max),
            playing: false,
            exhale: false,
            completed: false,
            ring_hold: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.playing {
            SessionState::Running
        } else {
            SessionState::Idle
        }
    }

    /// Play when idle, pause when running. Returns `None` when there is no
    /// time left to play.
    pub fn toggle_play(&mut self) -> Option<SessionEvent> {
        if self.playing {
            self.stop_session();
            info!(remaining_ms = self.remaining_ms(), "session paused");
            Some(SessionEvent::Paused)
        } else if self.countdown.has_ended() {
            debug!("play ignored, no time left");
            None
        } else {
            self.start_session();
            info!(remaining_ms = self.remaining_ms(), "session started");
            Some(SessionEvent::Started)
        }
    }

    /// Pause if running; otherwise nothing.
    pub fn pause(&mut self) -> Option<SessionEvent> {
        if self.playing {
            self.toggle_play()
        } else {
            None
        }
    }

    /// Change the session length. Allowed at any time; a running session
    /// keeps running from the new length. Returns `None` for lengths that
    /// are zero or not a whole number of countdown steps.
    pub fn select_duration(&mut self, duration_ms: u64) -> Option<SessionEvent> {
        let step_ms = self.countdown.step_ms();
        if duration_ms == 0 || duration_ms % step_ms != 0 {
            debug!(duration_ms, step_ms, "duration ignored, not a whole number of steps");
            return None;
        }
        self.selected_duration_ms = duration_ms;
        self.countdown.set_start(duration_ms);
        self.ring_hold = None;
        self.completed = false;
        info!(duration_ms, running = self.playing, "duration selected");
        Some(SessionEvent::DurationSelected(duration_ms))
    }

    /// Move the session clock forward by `dt`.
    ///
    /// Countdown and breath ticks are applied in the order they fall due;
    /// when both land on the same instant the countdown goes first, so the
    /// tick that ends a session also silences the breath tick beside it.
    pub fn advance(&mut self, dt: Duration) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let mut left = dt;
        loop {
            let next = [self.countdown.until_next(), self.breath.until_next()]
                .into_iter()
                .flatten()
                .min();
            let step = match next {
                Some(step) if step <= left => step,
                _ => {
                    self.step_clocks(left);
                    break;
                }
            };
            let (countdown_due, breath_due) = self.step_clocks(step);
            left -= step;
            if countdown_due {
                self.on_countdown_tick(&mut events);
            }
            if breath_due && self.breath.is_running() {
                self.on_breath_tick(&mut events);
            }
        }
        events
    }

    /// Stop every clock. Call when the screen goes away.
    pub fn teardown(&mut self) {
        self.countdown.stop();
        self.breath.stop();
        self.pulse.cancel();
        self.playing = false;
        debug!("session torn down");
    }

    fn step_clocks(&mut self, dt: Duration) -> (bool, bool) {
        let countdown_due = self.countdown.advance_timer(dt) > 0;
        let breath_due = self.breath.advance_timer(dt) > 0;
        self.pulse.advance(dt);
        (countdown_due, breath_due)
    }

    fn start_session(&mut self) {
        self.playing = true;
        self.completed = false;
        self.exhale = false;
        self.pulse.cancel();
        self.pulse.expand();
        self.countdown.start();
        self.breath.start();
    }

    fn stop_session(&mut self) {
        self.ring_hold = Some(self.ring_fraction());
        self.playing = false;
        self.countdown.stop();
        self.breath.stop();
        // Mid-exhale the logo is already shrinking; let it finish.
        if !self.exhale {
            self.pulse.contract();
        }
        self.exhale = false;
    }

    fn on_countdown_tick(&mut self, events: &mut Vec<SessionEvent>) {
        self.ring_hold = None;
        match self.countdown.on_tick() {
            Tick::Running(remaining_ms) => {
                events.push(SessionEvent::CountdownTick { remaining_ms });
            }
            Tick::Ended => {
                events.push(SessionEvent::CountdownTick { remaining_ms: 0 });
                if self.playing {
                    self.stop_session();
                    self.completed = true;
                    info!(duration_ms = self.selected_duration_ms, "session complete");
                    events.push(SessionEvent::Ended);
                }
            }
        }
    }

    fn on_breath_tick(&mut self, events: &mut Vec<SessionEvent>) {
        let count = self.breath.on_tick();
        self.exhale = !self.exhale;
        if self.playing {
            if self.exhale {
                self.pulse.contract();
            } else {
                self.pulse.expand();
            }
        }
        debug!(count, exhale = self.exhale, "breath phase flipped");
        events.push(SessionEvent::PhaseFlipped {
            exhale: self.exhale,
            count,
        });
    }

    pub fn durations_ms(&self) -> &[u64] {
        &self.durations_ms
    }

    pub fn selected_duration_ms(&self) -> u64 {
        self.selected_duration_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.countdown.remaining_ms()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[cfg(test)]
    pub fn is_exhale(&self) -> bool {
        self.exhale
    }

    /// Whether the last session ran all the way to zero.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn breath_count(&self) -> u64 {
        self.breath.count()
    }

    #[cfg(test)]
    pub fn countdown_running(&self) -> bool {
        self.countdown.is_running()
    }

    #[cfg(test)]
    pub fn breath_running(&self) -> bool {
        self.breath.is_running()
    }

    pub fn pulse(&self) -> &Pulse {
        &self.pulse
    }

    pub fn phase_label(&self) -> &'static str {
        match (self.playing, self.exhale) {
            (false, _) => "",
            (true, true) => "Exhale",
            (true, false) => "Inhale",
        }
    }

    pub fn time_label(&self) -> String {
        format_time(self.remaining_ms())
    }

    /// Share of the selected duration still to go, moving smoothly between
    /// countdown steps while running and holding still while paused.
    pub fn ring_fraction(&self) -> f32 {
        if self.selected_duration_ms == 0 {
            return 0.0;
        }
        let total = self.selected_duration_ms as f32;
        let at_step = self.remaining_ms() as f32 / total;
        let from = self.ring_hold.unwrap_or(at_step);
        if !self.countdown.is_running() {
            return from.clamp(0.0, 1.0);
        }
        let to = self.remaining_ms().saturating_sub(self.countdown.step_ms()) as f32 / total;
        let t = self.countdown.fraction_elapsed_in_tick();
        (from + (to - from) * t).clamp(0.0, 1.0)
    }

    /// Whether the screen still has something moving on it.
    pub fn needs_frames(&self) -> bool {
        self.playing || self.pulse.is_animating()
    }
}

/// `MM:SS` for a millisecond count.
pub fn format_time(ms: u64) -> String {
    let seconds = (ms / 1000) % 60;
    let minutes = (ms / 1000 / 60) % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);
    const FIVE: Duration = Duration::from_secs(5);

    fn session() -> Session {
        Session::new(&BreathSettings::default())
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65_000), "01:05");
        assert_eq!(format_time(125_000), "02:05");
        assert_eq!(format_time(180_000), "03:00");
        assert_eq!(format_time(59_999), "00:59");
    }

    #[test]
    fn test_initial_state() {
        let s = session();
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.selected_duration_ms(), 60_000);
        assert_eq!(s.remaining_ms(), 60_000);
        assert_eq!(s.time_label(), "01:00");
        assert_eq!(s.phase_label(), "");
        assert_eq!(s.ring_fraction(), 1.0);
        assert!(!s.needs_frames());
    }

    #[test]
    fn test_every_duration_runs_to_zero() {
        for duration in [60_000u64, 120_000, 180_000] {
            let mut s = session();
            s.select_duration(duration);
            assert_eq!(s.toggle_play(), Some(SessionEvent::Started));
            let mut ended = false;
            for _ in 0..duration / 1000 {
                ended |= s.advance(SEC).contains(&SessionEvent::Ended);
            }
            assert!(ended);
            assert_eq!(s.remaining_ms(), 0);
            assert!(!s.is_playing());
            assert!(s.is_completed());
            assert_eq!(s.time_label(), "00:00");
        }
    }

    #[test]
    fn test_end_clears_timers() {
        let mut s = session();
        s.toggle_play();
        for _ in 0..60 {
            s.advance(SEC);
        }
        assert!(!s.countdown_running());
        assert!(!s.breath_running());
        let count = s.breath_count();
        assert!(s.advance(SEC * 30).is_empty());
        assert_eq!(s.remaining_ms(), 0);
        assert_eq!(s.breath_count(), count);
    }

    #[test]
    fn test_single_large_step_ends_cleanly() {
        let mut s = session();
        s.toggle_play();
        let events = s.advance(Duration::from_secs(600));
        assert_eq!(events.last(), Some(&SessionEvent::Ended));
        assert_eq!(s.remaining_ms(), 0);
        // flips at 5s..55s; the one due with the final countdown tick is dropped
        assert_eq!(s.breath_count(), 11);
        assert!(!s.is_playing());
    }

    #[test]
    fn test_start_then_stop_keeps_time() {
        let mut s = session();
        s.toggle_play();
        assert_eq!(s.toggle_play(), Some(SessionEvent::Paused));
        assert_eq!(s.remaining_ms(), 60_000);
        assert!(s.advance(SEC * 10).is_empty());
        assert_eq!(s.remaining_ms(), 60_000);
    }

    #[test]
    fn test_phase_flag_follows_parity() {
        let mut s = session();
        s.select_duration(180_000);
        s.toggle_play();
        for n in 1..=20u64 {
            s.advance(FIVE);
            assert_eq!(s.breath_count(), n);
            assert_eq!(s.is_exhale(), n % 2 == 1);
            assert_eq!(s.phase_label(), if n % 2 == 1 { "Exhale" } else { "Inhale" });
        }
    }

    #[test]
    fn test_pause_before_first_breath() {
        let mut s = session();
        s.toggle_play();
        s.advance(Duration::from_millis(4999));
        s.toggle_play();
        assert_eq!(s.breath_count(), 0);
        assert!(!s.is_exhale());
        s.advance(FIVE * 4);
        assert_eq!(s.breath_count(), 0);
    }

    #[test]
    fn test_select_while_idle_resets() {
        let mut s = session();
        s.toggle_play();
        s.advance(SEC * 7);
        s.toggle_play();
        assert_eq!(s.remaining_ms(), 53_000);
        assert_eq!(s.select_duration(120_000), Some(SessionEvent::DurationSelected(120_000)));
        assert_eq!(s.remaining_ms(), 120_000);
        assert_eq!(s.ring_fraction(), 1.0);
    }

    #[test]
    fn test_select_invalid_duration() {
        let mut s = session();
        s.toggle_play();
        s.advance(Duration::from_millis(300));
        assert_eq!(s.select_duration(0), None);
        assert!(s.is_playing());
        assert_eq!(s.remaining_ms(), 60_000);
        assert_eq!(s.phase_label(), "Inhale");

        assert_eq!(s.select_duration(1500), None);
        assert_eq!(s.selected_duration_ms(), 60_000);
        s.advance(Duration::from_millis(700));
        assert_eq!(s.remaining_ms(), 59_000);

        let mut s = session();
        assert_eq!(s.select_duration(1500), None);
        s.toggle_play();
        for _ in 0..10 {
            s.advance(SEC);
            assert_eq!(s.remaining_ms() % 1000, 0);
        }
        assert_eq!(s.remaining_ms(), 50_000);
    }

    #[test]
    fn test_ring_holds_on_pause() {
        let mut s = session();
        s.toggle_play();
        s.advance(Duration::from_millis(1500));
        let shown = s.ring_fraction();
        assert!((shown - 58_500.0 / 60_000.0).abs() < 1e-4);
        s.toggle_play();
        assert!((s.ring_fraction() - shown).abs() < 1e-6);
        s.advance(SEC * 3);
        assert!((s.ring_fraction() - shown).abs() < 1e-6);

        // resuming moves on from the held position, landing on the next step
        s.toggle_play();
        assert!((s.ring_fraction() - shown).abs() < 1e-6);
        s.advance(Duration::from_millis(500));
        assert!(s.ring_fraction() < shown);
        s.advance(Duration::from_millis(500));
        assert_eq!(s.remaining_ms(), 58_000);
        assert!((s.ring_fraction() - 58_000.0 / 60_000.0).abs() < 1e-4);
    }

    #[test]
    fn test_select_clears_ring_hold() {
        let mut s = session();
        s.toggle_play();
        s.advance(Duration::from_millis(2500));
        s.toggle_play();
        s.select_duration(120_000);
        assert_eq!(s.ring_fraction(), 1.0);
    }

    #[test]
    fn test_select_while_running_keeps_running() {
        let mut s = session();
        s.toggle_play();
        s.advance(SEC * 10);
        s.select_duration(180_000);
        assert!(s.is_playing());
        assert_eq!(s.remaining_ms(), 180_000);
        s.advance(SEC);
        assert_eq!(s.remaining_ms(), 179_000);
    }

    #[test]
    fn test_play_at_zero_is_ignored() {
        let mut s = session();
        s.toggle_play();
        s.advance(Duration::from_secs(60));
        assert_eq!(s.toggle_play(), None);
        assert_eq!(s.state(), SessionState::Idle);

        s.select_duration(60_000);
        assert!(!s.is_completed());
        assert_eq!(s.toggle_play(), Some(SessionEvent::Started));
        assert!(s.countdown_running());
    }

    #[test]
    fn test_resume_continues_countdown() {
        let mut s = session();
        s.toggle_play();
        s.advance(SEC * 12);
        s.toggle_play();
        s.toggle_play();
        s.advance(SEC * 3);
        assert_eq!(s.remaining_ms(), 45_000);
        // breath count is never reset by a pause
        assert_eq!(s.breath_count(), 2);
        assert!(!s.is_exhale());
    }

    #[test]
    fn test_pulse_follows_phases() {
        let mut s = session();
        s.toggle_play();
        assert!(s.pulse().is_expanding());
        s.advance(FIVE);
        assert!(s.is_exhale());
        assert!(!s.pulse().is_expanding());
        s.advance(FIVE);
        assert!(!s.is_exhale());
        assert!(s.pulse().is_expanding());
    }

    #[test]
    fn test_pause_on_inhale_runs_exit() {
        let mut s = session();
        s.toggle_play();
        s.advance(Duration::from_secs(3));
        s.toggle_play();
        assert!(!s.pulse().is_expanding());
        assert!(s.needs_frames());
        s.advance(FIVE);
        assert_eq!(s.pulse().opacity(), 0.0);
        assert_eq!(s.pulse().scale(), 1.0);
        assert!(!s.needs_frames());
    }

    #[test]
    fn test_pause_on_exhale_lets_contraction_finish() {
        let mut s = session();
        s.toggle_play();
        s.advance(Duration::from_secs(6));
        assert!(s.is_exhale());
        s.toggle_play();
        assert!(!s.is_exhale());
        assert!(!s.pulse().is_expanding());
        s.advance(FIVE);
        assert_eq!(s.pulse().scale(), 1.0);
    }

    #[test]
    fn test_ring_fraction_moves_within_tick() {
        let mut s = session();
        s.toggle_play();
        s.advance(Duration::from_millis(500));
        let f = s.ring_fraction();
        assert!(f < 1.0 && f > 0.99);
        s.advance(Duration::from_secs(30) - Duration::from_millis(500));
        assert!((s.ring_fraction() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_events_in_time_order() {
        let mut s = session();
        s.toggle_play();
        let events = s.advance(FIVE);
        assert_eq!(events.len(), 6);
        assert_eq!(events[4], SessionEvent::CountdownTick { remaining_ms: 55_000 });
        assert_eq!(events[5], SessionEvent::PhaseFlipped { exhale: true, count: 1 });
    }

    #[test]
    fn test_teardown_stops_everything() {
        let mut s = session();
        s.toggle_play();
        s.advance(SEC * 2);
        s.teardown();
        assert!(!s.countdown_running());
        assert!(!s.breath_running());
        assert!(!s.needs_frames());
        assert!(s.advance(SEC * 20).is_empty());
        assert_eq!(s.remaining_ms(), 58_000);
    }

    #[test]
    fn test_pause_when_idle_is_noop() {
        let mut s = session();
        assert_eq!(s.pause(), None);
        s.toggle_play();
        assert_eq!(s.pause(), Some(SessionEvent::Paused));
    }
}
