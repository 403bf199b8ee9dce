//! Page widgets as explicit state machines.
//!
//! Each widget owns its own small piece of state (current question, current
//! slide, open lightbox image, ...) and reports what happened through a
//! [`keepsake_tracker::Recorder`]. Nothing here touches storage or a clock
//! directly; timed behaviour is driven by the caller passing `now`.

pub mod carousel;
pub mod footer;
pub mod key;
pub mod lightbox;
pub mod memories;
pub mod menu;
pub mod quiz;
pub mod video;

pub use carousel::{Autoplay, Carousel, Swipe, SwipeDirection, SwipeTracker};
pub use footer::Footer;
pub use key::Key;
pub use lightbox::{GalleryImage, Lightbox};
pub use memories::{Memory, MemoryBook};
pub use menu::{MOBILE_BREAKPOINT_PX, MobileMenu};
pub use quiz::{Choice, Quiz, QuizDefinition, QuizResult, ScoreTier, Tier};
pub use video::{PlaybackState, VideoPlayer};
