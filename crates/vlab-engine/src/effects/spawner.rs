//! Bounded, restartable particle spawn sequences.
//!
//! A sequence emits up to `count` spawns at a fixed rate, then stops on its
//! own when either the count or the duration runs out. Restarting an active
//! sequence abandons the remainder and begins a fresh run, so overlapping
//! reactions never stack emissions.

/// One timed burst of particle spawns.
#[derive(Debug, Clone)]
pub struct SpawnSequence {
    count: u32,
    duration_ms: f64,
    interval_ms: f64,
    started_at_ms: Option<f64>,
    spawned: u32,
    next_at_ms: f64,
}

impl SpawnSequence {
    /// A sequence of `count` spawns at `rate_per_sec`, cut off after
    /// `duration_ms` even if the count has not been reached.
    pub fn new(count: u32, duration_ms: f64, rate_per_sec: f64) -> Self {
        let interval_ms = if rate_per_sec > 0.0 {
            1000.0 / rate_per_sec
        } else {
            f64::INFINITY
        };
        Self {
            count,
            duration_ms,
            interval_ms,
            started_at_ms: None,
            spawned: 0,
            next_at_ms: 0.0,
        }
    }

    /// Begin (or restart) the sequence at `now_ms`. The first spawn fires on
    /// the next tick.
    pub fn start(&mut self, now_ms: f64) {
        self.started_at_ms = Some(now_ms);
        self.spawned = 0;
        self.next_at_ms = now_ms;
    }

    /// Abandon the sequence without emitting the remainder.
    pub fn cancel(&mut self) {
        self.started_at_ms = None;
        self.spawned = 0;
    }

    pub fn is_active(&self, now_ms: f64) -> bool {
        match self.started_at_ms {
            Some(start) => {
                self.spawned < self.count && now_ms < start + self.duration_ms
            }
            None => false,
        }
    }

    /// Number of spawns due by `now_ms`. Catches up after frame gaps, but
    /// never exceeds the remaining count or spawns past the cutoff.
    pub fn tick(&mut self, now_ms: f64) -> u32 {
        let Some(start) = self.started_at_ms else {
            return 0;
        };
        if now_ms >= start + self.duration_ms {
            self.started_at_ms = None;
            return 0;
        }

        let mut due = 0u32;
        while self.spawned < self.count && self.next_at_ms <= now_ms {
            due += 1;
            self.spawned += 1;
            self.next_at_ms += self.interval_ms;
        }
        if self.spawned >= self.count {
            self.started_at_ms = None;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawns_at_the_configured_rate() {
        // 10 spawns at 20/sec: one every 50ms.
        let mut seq = SpawnSequence::new(10, 1000.0, 20.0);
        seq.start(0.0);
        assert_eq!(seq.tick(0.0), 1);
        assert_eq!(seq.tick(49.0), 0);
        assert_eq!(seq.tick(50.0), 1);
        assert_eq!(seq.tick(100.0), 1);
    }

    #[test]
    fn total_never_exceeds_count() {
        let mut seq = SpawnSequence::new(5, 10_000.0, 20.0);
        seq.start(0.0);
        let mut total = 0;
        for i in 0..100 {
            total += seq.tick(i as f64 * 50.0);
        }
        assert_eq!(total, 5);
        assert!(!seq.is_active(5000.0));
    }

    #[test]
    fn duration_cuts_the_sequence_short() {
        // 100 spawns would take 5s at 20/sec, but the window is 200ms.
        let mut seq = SpawnSequence::new(100, 200.0, 20.0);
        seq.start(0.0);
        let mut total = 0;
        for i in 0..20 {
            total += seq.tick(i as f64 * 50.0);
        }
        // Spawns at 0, 50, 100, 150; the 200ms tick hits the cutoff.
        assert_eq!(total, 4);
        assert!(!seq.is_active(300.0));
    }

    #[test]
    fn catches_up_after_a_frame_gap() {
        let mut seq = SpawnSequence::new(10, 1000.0, 20.0);
        seq.start(0.0);
        // One big late tick emits everything due so far.
        assert_eq!(seq.tick(240.0), 5);
    }

    #[test]
    fn restart_abandons_the_previous_run() {
        let mut seq = SpawnSequence::new(4, 1000.0, 20.0);
        seq.start(0.0);
        assert_eq!(seq.tick(0.0), 1);
        seq.start(500.0);
        let mut total = 0;
        for i in 0..10 {
            total += seq.tick(500.0 + i as f64 * 50.0);
        }
        // A fresh run gets the full count.
        assert_eq!(total, 4);
    }

    #[test]
    fn cancel_stops_emission() {
        let mut seq = SpawnSequence::new(10, 1000.0, 20.0);
        seq.start(0.0);
        seq.tick(0.0);
        seq.cancel();
        assert_eq!(seq.tick(100.0), 0);
        assert!(!seq.is_active(100.0));
    }

    #[test]
    fn inactive_sequence_ticks_to_zero() {
        let mut seq = SpawnSequence::new(10, 1000.0, 20.0);
        assert_eq!(seq.tick(0.0), 0);
        assert!(!seq.is_active(0.0));
    }
}
