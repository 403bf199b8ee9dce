use chrono::{DateTime, Duration, Utc};

/// Restartable one-shot timer (`clearTimeout` + `setTimeout`).
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<DateTime<Utc>>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// (Re)start the countdown from `now`.
    pub fn trigger(&mut self, now: DateTime<Utc>) {
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once when the deadline has passed.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }
}

/// Periodic timer (`setInterval`). Late polls fire once and skip the missed
/// periods, like a throttled background tab.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Option<DateTime<Utc>>,
}

impl Interval {
    pub fn start(period: Duration, now: DateTime<Utc>) -> Self {
        let period = period.max(Duration::milliseconds(1));
        Self {
            period,
            next_due: Some(now + period),
        }
    }

    pub fn stopped(period: Duration) -> Self {
        Self {
            period: period.max(Duration::milliseconds(1)),
            next_due: None,
        }
    }

    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };

        if now < due {
            return false;
        }

        let period_ms = self.period.num_milliseconds().max(1);
        let missed = (now - due).num_milliseconds() / period_ms;
        self.next_due = Some(due + Duration::milliseconds(period_ms * (missed + 1)));
        true
    }

    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next fire, if running.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.next_due
            .map(|due| (due - now).max(Duration::zero()))
    }
}
