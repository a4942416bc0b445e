//! Effect sinks
//!
//! Audio, haptics and screen effects subscribe to the simulation through an
//! [`EventSink`]. The driver hands over every event raised during a frame, in
//! order, after the tick has finished.

use crate::sim::GameEvent;

pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

/// Drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Logs events at debug level (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: GameEvent) {
        match event {
            GameEvent::Combo(n) => log::info!("Combo x{}", n),
            GameEvent::LevelUp(level) => log::info!("Level up: {}", level),
            GameEvent::Fatal => log::info!("Shattered"),
            other => log::debug!("{:?}", other),
        }
    }
}

/// Keeps everything it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<GameEvent>,
}

impl RecordingSink {
    pub fn count(&self, event: GameEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let mut sink = RecordingSink::default();
        sink.emit(GameEvent::Pass);
        sink.emit(GameEvent::Combo(3));
        sink.emit(GameEvent::Pass);
        assert_eq!(sink.events, vec![GameEvent::Pass, GameEvent::Combo(3), GameEvent::Pass]);
        assert_eq!(sink.count(GameEvent::Pass), 2);
    }

    #[test]
    fn test_sinks_through_references() {
        fn forward(mut sink: impl EventSink) {
            sink.emit(GameEvent::Bounce);
        }
        let mut inner = RecordingSink::default();
        forward(&mut inner);
        NullSink.emit(GameEvent::Fatal);
        LogSink.emit(GameEvent::LevelUp(1));
        assert_eq!(inner.events, vec![GameEvent::Bounce]);
    }
}
