use foundation::time::Millis;
use runtime::DEFAULT_MAX_CATCH_UP;
use serde::{Deserialize, Serialize};

/// Estimator tuning.
///
/// Every field is optional in JSON; missing fields take the defaults the
/// overlay ships with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Poll period of the loader (ms).
    pub poll_interval_ms: u64,
    /// Raw progress must be unchanged for longer than this before the fake
    /// bonus starts (ms).
    pub stall_threshold_ms: u64,
    /// Fake bonus growth, in percent per stalled millisecond.
    pub fake_rate_per_ms: f64,
    /// Largest fake bonus ever added on top of raw progress.
    pub fake_cap: f64,
    /// Fake progress never lifts the target above this.
    pub ceiling: f64,
    /// Gaps smaller than this snap straight to the target.
    pub snap_epsilon: f64,
    pub ascend_speed: f64,
    pub descend_speed: f64,
    /// Most polls a single animation frame may run; older backlog is dropped.
    pub max_catch_up_polls: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
            stall_threshold_ms: 500,
            fake_rate_per_ms: 0.002,
            fake_cap: 15.0,
            ceiling: 95.0,
            snap_epsilon: 0.1,
            ascend_speed: 0.08,
            descend_speed: 0.02,
            max_catch_up_polls: DEFAULT_MAX_CATCH_UP,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "estimator config is not valid JSON: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "invalid estimator config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl EstimatorConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: EstimatorConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn poll_interval(&self) -> Millis {
        Millis(self.poll_interval_ms)
    }

    pub fn stall_threshold(&self) -> Millis {
        Millis(self.stall_threshold_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be > 0".into()));
        }
        if self.max_catch_up_polls == 0 {
            return Err(ConfigError::Invalid("max_catch_up_polls must be > 0".into()));
        }
        let finite_non_negative = [
            ("fake_rate_per_ms", self.fake_rate_per_ms),
            ("fake_cap", self.fake_cap),
            ("snap_epsilon", self.snap_epsilon),
        ];
        for (name, v) in finite_non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.ceiling) {
            return Err(ConfigError::Invalid(format!(
                "ceiling must lie in [0, 100] (got {})",
                self.ceiling
            )));
        }
        for (name, v) in [
            ("ascend_speed", self.ascend_speed),
            ("descend_speed", self.descend_speed),
        ] {
            if !(v > 0.0 && v <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must lie in (0, 1] (got {v})"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, EstimatorConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = EstimatorConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, EstimatorConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = EstimatorConfig::from_json_str(r#"{ "fake_cap": 10.0 }"#).unwrap();
        assert_eq!(cfg.fake_cap, 10.0);
        assert_eq!(cfg.poll_interval_ms, 50);
        assert_eq!(cfg.ceiling, 95.0);
        assert_eq!(cfg.max_catch_up_polls, 20);
    }

    #[test]
    fn rejects_zero_catch_up() {
        let err = EstimatorConfig::from_json_str(r#"{ "max_catch_up_polls": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("max_catch_up_polls"));
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let err = EstimatorConfig::from_json_str(r#"{ "poll_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_out_of_range_speed() {
        let err = EstimatorConfig::from_json_str(r#"{ "ascend_speed": 1.5 }"#).unwrap_err();
        assert!(err.to_string().contains("ascend_speed"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = EstimatorConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
