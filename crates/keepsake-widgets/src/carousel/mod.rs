mod autoplay;
mod swipe;

pub use autoplay::Autoplay;
pub use swipe::{Swipe, SwipeDirection, SwipeTracker};

use keepsake_tracker::Recorder;
use keepsake_types::{EventData, EventKind};

use crate::key::Key;

/// Slide carousel with wraparound navigation.
///
/// A carousel with no slides ignores every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    total: usize,
    current: usize,
}

impl Carousel {
    pub fn new(total: usize) -> Self {
        Self { total, current: 0 }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Make slide `index` active. Out-of-range indices are ignored.
    pub fn show(&mut self, index: usize, recorder: &mut dyn Recorder) {
        if index >= self.total {
            return;
        }
        self.current = index;
        recorder.record(EventData::from(EventKind::CarouselSlideViewed).with("slideIndex", index));
    }

    pub fn next(&mut self, recorder: &mut dyn Recorder) {
        if self.total == 0 {
            return;
        }
        let from = self.current;
        self.show((from + 1) % self.total, recorder);
        self.record_move(EventKind::CarouselNextClicked, from, recorder);
    }

    pub fn prev(&mut self, recorder: &mut dyn Recorder) {
        if self.total == 0 {
            return;
        }
        let from = self.current;
        self.show((from + self.total - 1) % self.total, recorder);
        self.record_move(EventKind::CarouselPrevClicked, from, recorder);
    }

    /// Indicator click; `position` is 1-based as shown on the page.
    pub fn jump_to(&mut self, position: usize, recorder: &mut dyn Recorder) {
        if position == 0 || position > self.total {
            return;
        }
        let from = self.current;
        self.show(position - 1, recorder);
        self.record_move(EventKind::CarouselIndicatorClicked, from, recorder);
    }

    /// Arrow keys step through slides. Returns whether the key was handled.
    pub fn handle_key(&mut self, key: Key, recorder: &mut dyn Recorder) -> bool {
        match key {
            Key::ArrowLeft => self.prev(recorder),
            Key::ArrowRight => self.next(recorder),
            _ => return false,
        }
        true
    }

    /// Apply a recognised swipe: right goes back, left goes forward.
    pub fn apply_swipe(&mut self, swipe: Swipe, recorder: &mut dyn Recorder) {
        match swipe.direction {
            SwipeDirection::Right => self.prev(recorder),
            SwipeDirection::Left => self.next(recorder),
        }
        recorder.record(
            EventData::from(EventKind::CarouselSwipe)
                .with("direction", swipe.direction.as_str())
                .with("distance", swipe.distance),
        );
    }

    fn record_move(&self, kind: EventKind, from: usize, recorder: &mut dyn Recorder) {
        recorder.record(
            EventData::from(kind)
                .with("fromSlide", from)
                .with("toSlide", self.current),
        );
    }
}
