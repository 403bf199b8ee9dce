use keepsake_tracker::Recorder;
use keepsake_types::{EventData, EventKind};

pub const LOVE_SENT_MESSAGE: &str = "💌 Love sent! Your message has been delivered to the heart! 💕";

const RATINGS: [&str; 5] = ["⭐", "⭐⭐", "⭐⭐⭐", "⭐⭐⭐⭐", "⭐⭐⭐⭐⭐"];

/// Footer buttons. Each returns the toast text the page should show.
#[derive(Debug, Clone, Copy, Default)]
pub struct Footer;

impl Footer {
    pub fn send_love(&self, recorder: &mut dyn Recorder) -> String {
        recorder.record(EventData::from(EventKind::FooterButtonClicked).with("button", "send_love"));
        LOVE_SENT_MESSAGE.to_string()
    }

    pub fn rate_us(&self, recorder: &mut dyn Recorder) -> String {
        recorder.record(EventData::from(EventKind::FooterButtonClicked).with("button", "rate_us"));
        recorder.record(EventData::from(EventKind::RatingRequested));
        format!("Rate our love story: {}", RATINGS.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_love() {
        let mut events = Vec::new();
        let message = Footer.send_love(&mut events);

        assert_eq!(message, LOVE_SENT_MESSAGE);
        assert_eq!(events[0].get("button"), Some(&json!("send_love")));
    }

    #[test]
    fn test_rate_us_requests_rating() {
        let mut events = Vec::new();
        let message = Footer.rate_us(&mut events);

        assert!(message.starts_with("Rate our love story: ⭐ ⭐⭐"));
        let kinds: Vec<_> = events.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["footer_button_clicked", "rating_requested"]);
    }
}
