use serde::{Deserialize, Serialize};

/// Status line shown under the progress ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub threshold: f64,
    pub text: String,
}

impl StatusMessage {
    pub fn new(threshold: f64, text: impl Into<String>) -> Self {
        Self {
            threshold,
            text: text.into(),
        }
    }
}

const DEFAULT_MESSAGES: [(f64, &str); 7] = [
    (0.0, "Establishing connection..."),
    (10.0, "Loading ship geometry..."),
    (30.0, "Processing materials..."),
    (50.0, "Applying textures..."),
    (70.0, "Compiling shaders..."),
    (85.0, "Finalizing render..."),
    (95.0, "Almost ready..."),
];

#[derive(Debug, Clone, PartialEq)]
pub enum MessageTableError {
    Empty,
    NonFiniteThreshold(f64),
}

impl std::fmt::Display for MessageTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageTableError::Empty => write!(f, "status message table is empty"),
            MessageTableError::NonFiniteThreshold(t) => {
                write!(f, "status message threshold is not finite: {t}")
            }
        }
    }
}

impl std::error::Error for MessageTableError {}

/// Threshold-ordered status messages.
///
/// Entries are kept sorted by ascending threshold; lookups scan from the
/// highest threshold down and the first entry at or below the display value
/// wins.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageTable {
    entries: Vec<StatusMessage>,
}

impl Default for MessageTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_MESSAGES
                .iter()
                .map(|(t, text)| StatusMessage::new(*t, *text))
                .collect(),
        }
    }
}

impl MessageTable {
    pub fn new(mut entries: Vec<StatusMessage>) -> Result<Self, MessageTableError> {
        if entries.is_empty() {
            return Err(MessageTableError::Empty);
        }
        if let Some(bad) = entries.iter().find(|m| !m.threshold.is_finite()) {
            return Err(MessageTableError::NonFiniteThreshold(bad.threshold));
        }
        // Stable: equal thresholds keep caller order, the later one wins on lookup.
        entries.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[StatusMessage] {
        &self.entries
    }

    /// Index of the entry selected for `display`.
    ///
    /// Falls back to the lowest entry when nothing matches (including NaN).
    pub fn index_for(&self, display: f64) -> usize {
        self.entries
            .iter()
            .rposition(|m| display >= m.threshold)
            .unwrap_or(0)
    }

    pub fn select(&self, display: f64) -> &str {
        &self.entries[self.index_for(display)].text
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageTable, MessageTableError, StatusMessage};

    #[test]
    fn selects_highest_threshold_at_or_below_display() {
        let table = MessageTable::default();
        assert_eq!(table.select(42.0), "Processing materials...");
        assert_eq!(table.select(0.0), "Establishing connection...");
        assert_eq!(table.select(95.0), "Almost ready...");
        assert_eq!(table.select(100.0), "Almost ready...");
        assert_eq!(table.select(84.99), "Compiling shaders...");
    }

    #[test]
    fn falls_back_to_first_entry() {
        let table = MessageTable::new(vec![
            StatusMessage::new(20.0, "warming up"),
            StatusMessage::new(60.0, "nearly"),
        ])
        .unwrap();
        assert_eq!(table.select(5.0), "warming up");
        assert_eq!(table.select(f64::NAN), "warming up");
    }

    #[test]
    fn custom_tables_are_sorted() {
        let table = MessageTable::new(vec![
            StatusMessage::new(50.0, "half"),
            StatusMessage::new(0.0, "start"),
        ])
        .unwrap();
        assert_eq!(table.entries()[0].text, "start");
        assert_eq!(table.index_for(75.0), 1);
    }

    #[test]
    fn rejects_empty_and_non_finite_tables() {
        assert_eq!(MessageTable::new(vec![]), Err(MessageTableError::Empty));
        assert!(matches!(
            MessageTable::new(vec![StatusMessage::new(f64::INFINITY, "x")]),
            Err(MessageTableError::NonFiniteThreshold(_))
        ));
    }
}
