const MOVE_THRESHOLD: f64 = 10.0;
const SWIPE_THRESHOLD: f64 = 30.0;
const MAX_VERTICAL: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        }
    }
}

/// A completed horizontal swipe. `distance` is the absolute horizontal travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub direction: SwipeDirection,
    pub distance: f64,
}

/// Touch gesture state between `touchstart` and `touchend`.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(f64, f64)>,
    swiping: bool,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
        self.swiping = false;
    }

    /// Returns true once the gesture is mostly horizontal, meaning the page
    /// should stop scrolling vertically.
    pub fn moved(&mut self, x: f64, y: f64) -> bool {
        let Some((start_x, start_y)) = self.start else {
            return false;
        };
        let dx = (x - start_x).abs();
        let dy = (y - start_y).abs();
        if dx > dy && dx > MOVE_THRESHOLD {
            self.swiping = true;
        }
        self.swiping
    }

    /// Finish the gesture. Yields a swipe only for long, flat horizontal moves.
    pub fn end(&mut self, x: f64, y: f64) -> Option<Swipe> {
        let start = self.start.take();
        let swiping = std::mem::take(&mut self.swiping);
        let (start_x, start_y) = start?;
        if !swiping {
            return None;
        }

        let dx = x - start_x;
        let dy = (y - start_y).abs();
        if dx.abs() <= SWIPE_THRESHOLD || dy >= MAX_VERTICAL {
            return None;
        }

        Some(Swipe {
            direction: if dx > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            },
            distance: dx.abs(),
        })
    }

    pub fn is_swiping(&self) -> bool {
        self.swiping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_swipe() {
        let mut tracker = SwipeTracker::new();
        tracker.start(200.0, 300.0);
        assert!(tracker.moved(180.0, 302.0));

        let swipe = tracker.end(120.0, 310.0).unwrap();
        assert_eq!(swipe.direction, SwipeDirection::Left);
        assert_eq!(swipe.distance, 80.0);
    }

    #[test]
    fn test_small_move_is_not_a_swipe() {
        let mut tracker = SwipeTracker::new();
        tracker.start(100.0, 100.0);
        assert!(!tracker.moved(108.0, 100.0));
        assert_eq!(tracker.end(108.0, 100.0), None);
    }

    #[test]
    fn test_mostly_vertical_move_is_a_scroll() {
        let mut tracker = SwipeTracker::new();
        tracker.start(100.0, 100.0);
        assert!(!tracker.moved(120.0, 160.0));
        assert_eq!(tracker.end(150.0, 400.0), None);
    }

    #[test]
    fn test_swipe_thresholds() {
        let mut tracker = SwipeTracker::new();

        // marked as swiping but only 30px travel
        tracker.start(0.0, 0.0);
        tracker.moved(20.0, 0.0);
        assert_eq!(tracker.end(30.0, 0.0), None);

        // too much vertical drift by the end
        tracker.start(0.0, 0.0);
        tracker.moved(20.0, 0.0);
        assert_eq!(tracker.end(90.0, 100.0), None);

        tracker.start(0.0, 0.0);
        tracker.moved(20.0, 0.0);
        let swipe = tracker.end(31.0, 99.0).unwrap();
        assert_eq!(swipe.direction, SwipeDirection::Right);
    }

    #[test]
    fn test_end_without_start() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.end(500.0, 0.0), None);
        assert!(!tracker.is_swiping());
    }
}
