use chrono::{DateTime, Duration, Utc};
use keepsake_tracker::{Interval, Recorder, TimingConfig};
use tracing::debug;

use super::Carousel;

/// Timed advance for a [`Carousel`].
///
/// Driven by `tick`; the carousel only moves when autoplay is active, not
/// inside a pause window, and the page is visible.
#[derive(Debug, Clone)]
pub struct Autoplay {
    interval: Interval,
    pause_for: Duration,
    paused_until: Option<DateTime<Utc>>,
    active: bool,
}

impl Autoplay {
    pub fn new(timing: &TimingConfig, now: DateTime<Utc>) -> Self {
        Self {
            interval: Interval::start(timing.autoplay_interval(), now),
            pause_for: timing.autoplay_pause(),
            paused_until: None,
            active: true,
        }
    }

    /// Autoplay that stays idle until `resume`.
    pub fn stopped(timing: &TimingConfig) -> Self {
        Self {
            interval: Interval::stopped(timing.autoplay_interval()),
            pause_for: timing.autoplay_pause(),
            paused_until: None,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_paused(&self, now: DateTime<Utc>) -> bool {
        self.paused_until.is_some_and(|until| now < until)
    }

    /// Hold off for the configured cooldown after user input. The progress
    /// bar starts over.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        self.pause_for_duration(now, self.pause_for);
    }

    pub fn pause_for_duration(&mut self, now: DateTime<Utc>, duration: Duration) {
        self.paused_until = Some(now + duration);
        if self.active {
            self.interval.restart(now);
        }
        debug!(until = %(now + duration), "carousel autoplay paused");
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.paused_until = None;
        self.interval.stop();
    }

    /// Restart a stopped autoplay. No effect while already active.
    pub fn resume(&mut self, now: DateTime<Utc>) {
        if self.active {
            return;
        }
        self.active = true;
        self.interval.restart(now);
    }

    /// Advance the carousel if a period has elapsed. Returns whether it moved.
    pub fn tick(
        &mut self,
        now: DateTime<Utc>,
        page_visible: bool,
        carousel: &mut Carousel,
        recorder: &mut dyn Recorder,
    ) -> bool {
        if self.paused_until.is_some_and(|until| now >= until) {
            self.paused_until = None;
        }

        if !self.interval.poll(now) {
            return false;
        }
        if !page_visible || !self.active || self.paused_until.is_some() {
            return false;
        }

        carousel.next(recorder);
        true
    }

    /// Progress towards the next advance, 0.0..=100.0.
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        if !self.active || self.is_paused(now) {
            return 0.0;
        }
        let Some(remaining) = self.interval.remaining(now) else {
            return 0.0;
        };

        let period = self.interval.period().num_milliseconds() as f64;
        let elapsed = period - remaining.num_milliseconds() as f64;
        (elapsed / period * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use keepsake_types::EventData;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 11, 6, 12, 0, 0).unwrap()
    }

    fn ms(n: i64) -> Duration {
        Duration::milliseconds(n)
    }

    fn setup() -> (Autoplay, Carousel, Vec<EventData>) {
        (
            Autoplay::new(&TimingConfig::default(), t0()),
            Carousel::new(4),
            Vec::new(),
        )
    }

    #[test]
    fn test_advances_every_interval() {
        let (mut autoplay, mut carousel, mut events) = setup();

        assert!(!autoplay.tick(t0() + ms(3999), true, &mut carousel, &mut events));
        assert!(autoplay.tick(t0() + ms(4000), true, &mut carousel, &mut events));
        assert!(autoplay.tick(t0() + ms(8000), true, &mut carousel, &mut events));

        assert_eq!(carousel.current(), 2);
    }

    #[test]
    fn test_hidden_page_does_not_advance() {
        let (mut autoplay, mut carousel, mut events) = setup();

        assert!(!autoplay.tick(t0() + ms(4000), false, &mut carousel, &mut events));
        assert_eq!(carousel.current(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_pause_holds_for_cooldown() {
        let (mut autoplay, mut carousel, mut events) = setup();

        autoplay.pause(t0() + ms(1000));
        assert!(autoplay.is_paused(t0() + ms(5000)));
        assert!(!autoplay.tick(t0() + ms(5000), true, &mut carousel, &mut events));
        assert!(!autoplay.tick(t0() + ms(8999), true, &mut carousel, &mut events));

        // cooldown over at 9000, next period boundary after restart is 9000
        assert!(autoplay.tick(t0() + ms(9000), true, &mut carousel, &mut events));
        assert_eq!(carousel.current(), 1);
    }

    #[test]
    fn test_stop_and_resume() {
        let (mut autoplay, mut carousel, mut events) = setup();

        autoplay.stop();
        assert!(!autoplay.tick(t0() + ms(20_000), true, &mut carousel, &mut events));
        assert_eq!(autoplay.progress(t0() + ms(20_000)), 0.0);

        autoplay.resume(t0() + ms(20_000));
        assert!(autoplay.is_active());
        assert!(autoplay.tick(t0() + ms(24_000), true, &mut carousel, &mut events));
        assert_eq!(carousel.current(), 1);
    }

    #[test]
    fn test_progress_tracks_interval() {
        let (autoplay, _, _) = setup();

        assert_eq!(autoplay.progress(t0()), 0.0);
        assert_eq!(autoplay.progress(t0() + ms(1000)), 25.0);
        assert_eq!(autoplay.progress(t0() + ms(3000)), 75.0);
    }

    #[test]
    fn test_stopped_constructor_is_idle() {
        let mut autoplay = Autoplay::stopped(&TimingConfig::default());
        let mut carousel = Carousel::new(2);
        let mut events = Vec::new();

        assert!(!autoplay.is_active());
        assert!(!autoplay.tick(t0() + ms(60_000), true, &mut carousel, &mut events));
    }
}
