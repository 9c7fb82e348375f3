use runtime::{EventBus, Frame, IntervalTimer};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::EstimatorConfig;
use crate::estimator::EstimatorState;
use crate::messages::MessageTable;
use crate::metrics::SessionMetrics;
use crate::readout::ProgressReadout;
use crate::source::{LoaderSource, RawProgress};

pub const EVENT_START: &str = "loading.start";
pub const EVENT_FINISH: &str = "loading.finish";
pub const EVENT_MESSAGE: &str = "loading.message";
pub const EVENT_STALL: &str = "loading.stall";

/// What the display surface renders for one animation frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadingFrame {
    pub active: bool,
    pub display_progress: f64,
    pub message: String,
    pub readout: ProgressReadout,
}

/// Drives the estimator from the loader while assets are loading.
///
/// Animation frames call [`LoadingSession::advance`] with the elapsed time;
/// the estimator itself only runs on whole poll intervals. A session begins
/// when the loader turns active and is discarded when it turns inactive.
#[derive(Debug)]
pub struct LoadingSession {
    config: EstimatorConfig,
    messages: MessageTable,
    state: EstimatorState,
    timer: IntervalTimer,
    frame: Frame,
    active: bool,
    sessions_started: u64,
    message_index: usize,
    metrics: SessionMetrics,
}

impl Default for LoadingSession {
    fn default() -> Self {
        Self::new(EstimatorConfig::default(), MessageTable::default())
    }
}

impl LoadingSession {
    pub fn new(config: EstimatorConfig, messages: MessageTable) -> Self {
        let timer =
            IntervalTimer::new(config.poll_interval()).with_max_catch_up(config.max_catch_up_polls);
        Self {
            config,
            messages,
            state: EstimatorState::default(),
            timer,
            frame: Frame::start(),
            active: false,
            sessions_started: 0,
            message_index: 0,
            metrics: SessionMetrics::default(),
        }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn state(&self) -> &EstimatorState {
        &self.state
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn sessions_started(&self) -> u64 {
        self.sessions_started
    }

    /// Feeds one animation frame.
    pub fn advance(
        &mut self,
        source: &impl LoaderSource,
        elapsed_ms: f64,
        bus: &mut EventBus,
    ) -> LoadingFrame {
        self.frame = self.frame.advance(elapsed_ms);
        let sample = source.sample();

        match (self.active, sample.active) {
            (false, true) => self.begin(bus),
            (true, false) => {
                self.finish(bus);
                return self.current();
            }
            (false, false) => return self.current(),
            (true, true) => {}
        }

        let raw = RawProgress::clamped(sample.progress);
        for _ in 0..self.timer.advance(elapsed_ms) {
            self.poll(raw, bus);
        }
        self.current()
    }

    /// Runs exactly one poll, bypassing the timer.
    ///
    /// Used by replays that already sample the loader once per interval.
    pub fn poll_once(&mut self, sample: &impl LoaderSource, bus: &mut EventBus) -> LoadingFrame {
        self.advance(sample, self.config.poll_interval().as_f64(), bus)
    }

    /// Ends any running session without waiting for the loader.
    pub fn reset(&mut self, bus: &mut EventBus) {
        if self.active {
            self.finish(bus);
        }
    }

    pub fn current(&self) -> LoadingFrame {
        let display = self.state.display_progress;
        LoadingFrame {
            active: self.active,
            display_progress: display,
            message: self.messages.select(display).to_string(),
            readout: ProgressReadout::from_display(display),
        }
    }

    fn begin(&mut self, bus: &mut EventBus) {
        self.active = true;
        self.sessions_started += 1;
        self.state.reset();
        self.metrics = SessionMetrics::default();
        self.message_index = self.messages.index_for(0.0);
        self.timer.start();
        bus.emit(
            self.frame,
            EVENT_START,
            format!("session {}", self.sessions_started),
        );
        info!(session = self.sessions_started, "loading session started");
    }

    fn finish(&mut self, bus: &mut EventBus) {
        self.timer.clear();
        self.active = false;
        let m = self.metrics;
        bus.emit(
            self.frame,
            EVENT_FINISH,
            format!(
                "session {} after {} polls ({} stalled)",
                self.sessions_started, m.ticks, m.stalled_ticks
            ),
        );
        info!(
            session = self.sessions_started,
            ticks = m.ticks,
            stalls = m.stalls,
            stalled_ratio = m.stalled_ratio(),
            peak_fake_bonus = m.peak_fake_bonus,
            final_display = self.state.display_progress,
            "loading session finished"
        );
        self.state.reset();
        self.message_index = 0;
    }

    fn poll(&mut self, raw: RawProgress, bus: &mut EventBus) {
        let was_stalled = self.state.is_stalled();
        let display = self.state.tick(raw, &self.config);
        self.metrics
            .record_tick(&self.state, self.config.poll_interval());

        if self.state.is_stalled() && !was_stalled {
            bus.emit(
                self.frame,
                EVENT_STALL,
                format!("raw progress stuck at {:.1}", raw.value()),
            );
            debug!(
                raw = raw.value(),
                stuck_ms = self.state.stuck_duration.as_u64(),
                "raw progress stalled; fake bonus engaged"
            );
        }

        let index = self.messages.index_for(display);
        if index != self.message_index {
            self.message_index = index;
            bus.emit(self.frame, EVENT_MESSAGE, self.messages.select(display));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EVENT_FINISH, EVENT_MESSAGE, EVENT_STALL, EVENT_START, LoadingSession};
    use crate::config::EstimatorConfig;
    use crate::messages::MessageTable;
    use crate::source::{LoaderSample, ScriptedLoader};
    use foundation::time::Millis;
    use pretty_assertions::assert_eq;
    use runtime::EventBus;

    #[test]
    fn inactive_loader_never_polls() {
        let mut session = LoadingSession::default();
        let mut bus = EventBus::new();
        let frame = session.advance(&LoaderSample::new(30.0, false), 1_000.0, &mut bus);
        assert!(!frame.active);
        assert_eq!(frame.display_progress, 0.0);
        assert_eq!(session.metrics().ticks, 0);
        assert!(bus.is_empty());
    }

    #[test]
    fn polls_once_per_interval_of_frame_time() {
        let mut session = LoadingSession::default();
        let mut bus = EventBus::new();
        let loader = LoaderSample::new(100.0, true);
        for _ in 0..6 {
            session.advance(&loader, 16.0, &mut bus);
        }
        // 96ms of frames: one whole 50ms poll.
        assert_eq!(session.metrics().ticks, 1);
        assert!((session.state().display_progress - 8.0).abs() < 1e-9);
    }

    #[test]
    fn long_frame_runs_bounded_polls() {
        let config = EstimatorConfig {
            max_catch_up_polls: 3,
            ..EstimatorConfig::default()
        };
        let mut session = LoadingSession::new(config, MessageTable::default());
        let mut bus = EventBus::new();
        let loader = LoaderSample::new(60.0, true);
        session.advance(&loader, 0.0, &mut bus);
        session.advance(&loader, 5_000.0, &mut bus);
        assert_eq!(session.metrics().ticks, 3);
        // The dropped backlog does not spill into the next frame.
        session.advance(&loader, 0.0, &mut bus);
        assert_eq!(session.metrics().ticks, 3);
    }

    #[test]
    fn activation_resets_state() {
        let mut session = LoadingSession::default();
        let mut bus = EventBus::new();
        for _ in 0..40 {
            session.poll_once(&LoaderSample::new(70.0, true), &mut bus);
        }
        assert!(session.state().display_progress > 0.0);

        session.advance(&LoaderSample::new(70.0, false), 16.0, &mut bus);
        assert_eq!(session.state().display_progress, 0.0);

        let frame = session.advance(&LoaderSample::new(10.0, true), 0.0, &mut bus);
        assert!(frame.active);
        assert_eq!(frame.display_progress, 0.0);
        assert_eq!(session.state().stuck_duration, Millis::ZERO);
        assert_eq!(session.sessions_started(), 2);
        assert_eq!(bus.count_of(EVENT_START), 2);
        assert_eq!(bus.count_of(EVENT_FINISH), 1);
    }

    #[test]
    fn emits_message_changes_and_stalls() {
        let mut session = LoadingSession::default();
        let mut bus = EventBus::new();
        let script = ScriptedLoader::new()
            .then(LoaderSample::new(0.0, true), 1)
            .then(LoaderSample::new(35.0, true), 100)
            .then(LoaderSample::new(100.0, false), 1);
        for sample in script {
            session.poll_once(&sample, &mut bus);
        }

        let messages: Vec<String> = bus
            .events()
            .filter(|e| e.kind == EVENT_MESSAGE)
            .map(|e| e.message.clone())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Loading ship geometry...".to_string(),
                "Processing materials...".to_string(),
            ]
        );
        assert_eq!(bus.count_of(EVENT_STALL), 1);
        assert!(bus.last_of(EVENT_FINISH).is_some());
        assert!(!session.is_active());
    }

    #[test]
    fn frame_carries_message_and_readout() {
        let mut session = LoadingSession::default();
        let mut bus = EventBus::new();
        let mut frame = session.current();
        for _ in 0..200 {
            frame = session.poll_once(&LoaderSample::new(100.0, true), &mut bus);
        }
        assert_eq!(frame.display_progress, 100.0);
        assert_eq!(frame.message, "Almost ready...");
        assert_eq!(frame.readout.percent, 100);
        assert_eq!(frame.readout.ring_dash_offset, 0.0);
    }

    #[test]
    fn reset_ends_running_session() {
        let mut session = LoadingSession::default();
        let mut bus = EventBus::new();
        session.poll_once(&LoaderSample::new(20.0, true), &mut bus);
        session.reset(&mut bus);
        assert!(!session.is_active());
        assert_eq!(bus.count_of(EVENT_FINISH), 1);
        session.reset(&mut bus);
        assert_eq!(bus.count_of(EVENT_FINISH), 1);
    }
}
