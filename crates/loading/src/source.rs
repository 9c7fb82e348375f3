use foundation::numeric::clamp_percent;
use serde::{Deserialize, Serialize};

/// Loader-reported completion percentage, clamped to `[0, 100]`.
///
/// The estimator assumes clamped input and never re-validates; construct
/// through [`RawProgress::clamped`] at the edge where loader values enter.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Serialize)]
pub struct RawProgress(f64);

impl RawProgress {
    /// NaN clamps to 0.
    pub fn clamped(v: f64) -> Self {
        RawProgress(clamp_percent(v))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// One poll of the loader.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderSample {
    pub progress: f64,
    pub active: bool,
}

impl LoaderSample {
    pub fn new(progress: f64, active: bool) -> Self {
        Self { progress, active }
    }

    pub fn idle() -> Self {
        Self::new(0.0, false)
    }
}

/// The asset loader collaborator.
///
/// The page's loader updates both values asynchronously while models and
/// textures download and parse.
pub trait LoaderSource {
    fn progress(&self) -> f64;
    fn active(&self) -> bool;

    fn sample(&self) -> LoaderSample {
        LoaderSample::new(self.progress(), self.active())
    }
}

impl LoaderSource for LoaderSample {
    fn progress(&self) -> f64 {
        self.progress
    }

    fn active(&self) -> bool {
        self.active
    }
}

/// Replays a recorded loader as runs of identical samples, one per poll.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLoader {
    runs: Vec<(LoaderSample, u32)>,
    run: usize,
    emitted_in_run: u32,
}

impl ScriptedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `polls` consecutive polls that all report `sample`.
    pub fn then(mut self, sample: LoaderSample, polls: u32) -> Self {
        if polls > 0 {
            self.runs.push((sample, polls));
        }
        self
    }

    pub fn total_polls(&self) -> u64 {
        self.runs.iter().map(|(_, n)| u64::from(*n)).sum()
    }
}

impl Iterator for ScriptedLoader {
    type Item = LoaderSample;

    fn next(&mut self) -> Option<LoaderSample> {
        let (sample, polls) = *self.runs.get(self.run)?;
        self.emitted_in_run += 1;
        if self.emitted_in_run >= polls {
            self.run += 1;
            self.emitted_in_run = 0;
        }
        Some(sample)
    }
}
