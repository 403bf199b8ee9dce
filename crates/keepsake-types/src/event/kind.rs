use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interaction kinds emitted by the page.
///
/// The log itself stores the kind as a free string so that unknown kinds
/// written by newer pages survive a read-back; this enum only names the ones
/// this workspace produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PageLoad,
    Scroll,
    Click,
    SectionView,
    TimeUpdate,
    Navigation,
    QuizAnswer,
    QuizCompleted,
    QuizRestarted,
    MemoryViewed,
    CarouselSlideViewed,
    CarouselNextClicked,
    CarouselPrevClicked,
    CarouselIndicatorClicked,
    CarouselSwipe,
    LightboxOpened,
    LightboxClosed,
    LightboxNavigation,
    VideoSectionViewed,
    VideoClicked,
    VideoNavClicked,
    VideoPlayed,
    VideoPaused,
    VideoCompleted,
    VideoSeeked,
    MobileMenuToggled,
    MobileMenuClosed,
    FooterButtonClicked,
    RatingRequested,
}

impl EventKind {
    pub const ALL: [EventKind; 29] = [
        EventKind::PageLoad,
        EventKind::Scroll,
        EventKind::Click,
        EventKind::SectionView,
        EventKind::TimeUpdate,
        EventKind::Navigation,
        EventKind::QuizAnswer,
        EventKind::QuizCompleted,
        EventKind::QuizRestarted,
        EventKind::MemoryViewed,
        EventKind::CarouselSlideViewed,
        EventKind::CarouselNextClicked,
        EventKind::CarouselPrevClicked,
        EventKind::CarouselIndicatorClicked,
        EventKind::CarouselSwipe,
        EventKind::LightboxOpened,
        EventKind::LightboxClosed,
        EventKind::LightboxNavigation,
        EventKind::VideoSectionViewed,
        EventKind::VideoClicked,
        EventKind::VideoNavClicked,
        EventKind::VideoPlayed,
        EventKind::VideoPaused,
        EventKind::VideoCompleted,
        EventKind::VideoSeeked,
        EventKind::MobileMenuToggled,
        EventKind::MobileMenuClosed,
        EventKind::FooterButtonClicked,
        EventKind::RatingRequested,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PageLoad => "page_load",
            EventKind::Scroll => "scroll",
            EventKind::Click => "click",
            EventKind::SectionView => "section_view",
            EventKind::TimeUpdate => "time_update",
            EventKind::Navigation => "navigation",
            EventKind::QuizAnswer => "quiz_answer",
            EventKind::QuizCompleted => "quiz_completed",
            EventKind::QuizRestarted => "quiz_restarted",
            EventKind::MemoryViewed => "memory_viewed",
            EventKind::CarouselSlideViewed => "carousel_slide_viewed",
            EventKind::CarouselNextClicked => "carousel_next_clicked",
            EventKind::CarouselPrevClicked => "carousel_prev_clicked",
            EventKind::CarouselIndicatorClicked => "carousel_indicator_clicked",
            EventKind::CarouselSwipe => "carousel_swipe",
            EventKind::LightboxOpened => "lightbox_opened",
            EventKind::LightboxClosed => "lightbox_closed",
            EventKind::LightboxNavigation => "lightbox_navigation",
            EventKind::VideoSectionViewed => "video_section_viewed",
            EventKind::VideoClicked => "video_clicked",
            EventKind::VideoNavClicked => "video_nav_clicked",
            EventKind::VideoPlayed => "video_played",
            EventKind::VideoPaused => "video_paused",
            EventKind::VideoCompleted => "video_completed",
            EventKind::VideoSeeked => "video_seeked",
            EventKind::MobileMenuToggled => "mobile_menu_toggled",
            EventKind::MobileMenuClosed => "mobile_menu_closed",
            EventKind::FooterButtonClicked => "footer_button_clicked",
            EventKind::RatingRequested => "rating_requested",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown event kind: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_matches_serde_name() {
        for kind in EventKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!("scroll".parse::<EventKind>(), Ok(EventKind::Scroll));
        assert!("heart_clicked".parse::<EventKind>().is_err());
    }
}
