use std::collections::VecDeque;

use foundation::time::Time;

use crate::frame::Frame;

/// Overlay event for traceability.
///
/// Kinds are dotted static names (`loading.start`, `layout.breakpoint`, ...)
/// so consumers can filter without parsing the message.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub frame_index: u64,
    /// Overlay time of the emitting frame.
    pub at: Time,
    pub kind: &'static str,
    pub message: String,
}

/// Bounded event log.
///
/// The page never restarts the wasm module, so the bus keeps at most
/// `capacity` events and drops the oldest first.
#[derive(Debug)]
pub struct EventBus {
    events: VecDeque<Event>,
    capacity: usize,
    dropped: u64,
}

pub const DEFAULT_EVENT_CAPACITY: usize = 256;

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(DEFAULT_EVENT_CAPACITY)),
            capacity,
            dropped: 0,
        }
    }

    pub fn emit(&mut self, frame: Frame, kind: &'static str, message: impl Into<String>) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(Event {
            frame_index: frame.index,
            at: frame.time,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events evicted because the bus was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn last_of(&self, kind: &str) -> Option<&Event> {
        self.events.iter().rev().find(|e| e.kind == kind)
    }

    pub fn count_of(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::frame::Frame;
    use foundation::time::Time;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        let f = Frame::start().advance(16.0).advance(16.0);
        bus.emit(f, "loading.start", "session 1");
        assert_eq!(bus.len(), 1);
        let start = bus.last_of("loading.start").map(|e| (e.frame_index, e.at));
        assert_eq!(start, Some((2, Time(0.032))));
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut bus = EventBus::with_capacity(2);
        let f = Frame::start();
        bus.emit(f, "a", "1");
        bus.emit(f, "b", "2");
        bus.emit(f, "a", "3");
        let msgs: Vec<_> = bus.events().map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, vec!["2", "3"]);
        assert_eq!(bus.dropped(), 1);
        assert_eq!(bus.count_of("a"), 1);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Frame::start(), "k", "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.is_empty());
    }
}
