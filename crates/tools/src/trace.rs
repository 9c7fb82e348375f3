//! Replays recorded loader traces through the progress estimator.

use loading::{
    EstimatorConfig, LoaderSample, LoadingSession, MessageTable, ScriptedLoader, SessionMetrics,
};
use runtime::EventBus;
use serde::{Deserialize, Serialize};

/// A recorded loader as runs of identical polls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TraceFile {
    #[serde(default)]
    pub config: EstimatorConfig,
    pub segments: Vec<TraceSegment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TraceSegment {
    pub progress: f64,
    #[serde(default = "default_active")]
    pub active: bool,
    pub polls: u32,
}

fn default_active() -> bool {
    true
}

/// Estimator output after one poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRow {
    pub poll: u64,
    pub time_ms: u64,
    pub raw: f64,
    pub active: bool,
    pub display: f64,
    pub fake_bonus: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceReport {
    pub rows: Vec<TraceRow>,
    /// Metrics of each finished session, in order.
    pub sessions: Vec<SessionMetrics>,
    pub monotonic: bool,
    /// Events evicted from the bounded log before the replay finished.
    pub events_dropped: u64,
}

impl TraceFile {
    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        let trace: TraceFile = serde_json::from_str(raw).map_err(|e| format!("trace json: {e}"))?;
        trace.config.validate().map_err(|e| e.to_string())?;
        if trace.segments.is_empty() {
            return Err("trace has no segments".to_string());
        }
        Ok(trace)
    }

    pub fn script(&self) -> ScriptedLoader {
        self.segments.iter().fold(ScriptedLoader::new(), |script, seg| {
            script.then(LoaderSample::new(seg.progress, seg.active), seg.polls)
        })
    }
}

/// Runs the whole trace, one estimator poll per recorded sample.
///
/// `monotonic` reports whether the display never went down inside a
/// session; it is expected to be false only for traces whose raw progress
/// regresses.
pub fn simulate(trace: &TraceFile) -> TraceReport {
    let mut session = LoadingSession::new(trace.config.clone(), MessageTable::default());
    let mut bus = EventBus::new();
    let interval = trace.config.poll_interval_ms;

    let mut rows = Vec::new();
    let mut sessions = Vec::new();
    let mut monotonic = true;
    let mut prev_display: Option<f64> = None;

    for (poll, sample) in trace.script().enumerate() {
        let was_active = session.is_active();
        let metrics_before = *session.metrics();
        let frame = session.poll_once(&sample, &mut bus);
        if was_active && !frame.active {
            sessions.push(metrics_before);
            prev_display = None;
        }
        if frame.active {
            if let Some(prev) = prev_display {
                monotonic &= frame.display_progress >= prev;
            }
            prev_display = Some(frame.display_progress);
        }
        rows.push(TraceRow {
            poll: poll as u64,
            time_ms: (poll as u64 + 1) * interval,
            raw: sample.progress,
            active: frame.active,
            display: frame.display_progress,
            fake_bonus: session.state().fake_bonus,
            message: frame.message,
        });
    }
    if session.is_active() {
        sessions.push(*session.metrics());
    }
    let events_dropped = bus.dropped();
    bus.drain();

    TraceReport {
        rows,
        sessions,
        monotonic,
        events_dropped,
    }
}
