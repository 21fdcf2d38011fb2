/// Timer service.
///
/// Timers never call back into the session.  Advancing the clock returns the
/// events that came due, oldest first, and the caller dispatches them.

/// What a timer reports when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    SpawnPipes,
    RampDifficulty,
    DroneSpawnAttempt,
    DroneExpired { id: u64 },
}

#[derive(Clone, Debug, PartialEq)]
struct Timer {
    due_ms: u64,
    /// `None` for one-shot timers.
    period_ms: Option<u64>,
    event: TimerEvent,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scheduler {
    now_ms: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed since the scheduler was created.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `event` every `period_ms`, first after one full period.
    pub fn every(&mut self, period_ms: u64, event: TimerEvent) {
        let period_ms = period_ms.max(1);
        self.timers.push(Timer {
            due_ms: self.now_ms + period_ms,
            period_ms: Some(period_ms),
            event,
        });
    }

    /// Fire `event` once, `delay_ms` from now.
    pub fn after(&mut self, delay_ms: u64, event: TimerEvent) {
        self.timers.push(Timer {
            due_ms: self.now_ms + delay_ms,
            period_ms: None,
            event,
        });
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the first pending timer carrying `event`.
    pub fn due_of(&self, event: TimerEvent) -> Option<u64> {
        self.timers
            .iter()
            .filter(|t| t.event == event)
            .map(|t| t.due_ms)
            .min()
    }

    /// Move the clock forward and collect every event that came due.
    ///
    /// A periodic timer fires once per elapsed period, so a long step can
    /// yield the same event several times.  Events due at the same instant
    /// keep their registration order.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<TimerEvent> {
        self.now_ms += dt_ms;
        let now = self.now_ms;

        let mut fired: Vec<(u64, TimerEvent)> = Vec::new();
        self.timers.retain_mut(|timer| {
            while timer.due_ms <= now {
                fired.push((timer.due_ms, timer.event));
                match timer.period_ms {
                    Some(period) => timer.due_ms += period,
                    None => return false,
                }
            }
            true
        });

        fired.sort_by_key(|(due, _)| *due);
        fired.into_iter().map(|(_, event)| event).collect()
    }
}
