//! Stage timing through `tracing`

use std::time::Instant;
use tracing::{debug, info};

/// Records elapsed time of a long-running stage and its intermediate events
#[derive(Debug)]
pub struct StageTimer {
    label: String,
    start: Instant,
    last: Instant,
    events: Vec<(String, u64)>,
}

impl StageTimer {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        debug!("{}: started", label);
        let now = Instant::now();
        Self {
            label,
            start: now,
            last: now,
            events: Vec::new(),
        }
    }

    /// Record an intermediate event; returns milliseconds since the previous one
    pub fn mark(&mut self, event: impl Into<String>) -> u64 {
        let event = event.into();
        let now = Instant::now();
        let delta_ms = now.duration_since(self.last).as_millis() as u64;
        self.last = now;
        debug!("{}: {} (+{}ms)", self.label, event, delta_ms);
        self.events.push((event, delta_ms));
        delta_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn events(&self) -> &[(String, u64)] {
        &self.events
    }

    /// Close the stage and return total elapsed milliseconds
    pub fn finish(self) -> u64 {
        let total = self.elapsed_ms();
        info!("{}: finished in {}ms", self.label, total);
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_are_recorded_in_order() {
        let mut timer = StageTimer::start("projection 1980");
        timer.mark("profiles built");
        timer.mark("pairs scored");

        let names: Vec<&str> = timer.events().iter().map(|(e, _)| e.as_str()).collect();
        assert_eq!(names, vec!["profiles built", "pairs scored"]);
        assert!(timer.finish() < 60_000);
    }
}
