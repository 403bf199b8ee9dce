use keepsake_tracker::Recorder;
use keepsake_types::{EventData, EventKind};

pub const DEFAULT_VIDEO_ID: &str = "love-story-video";
pub const DEFAULT_VIDEO_URL: &str = "https://youtube.com/shorts/QvwWWXjPoGM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

/// The embedded story video and its custom play button.
#[derive(Debug, Clone)]
pub struct VideoPlayer {
    video_id: String,
    url: String,
    state: PlaybackState,
}

impl Default for VideoPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_VIDEO_ID, DEFAULT_VIDEO_URL)
    }
}

impl VideoPlayer {
    pub fn new(video_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            url: url.into(),
            state: PlaybackState::Paused,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Play when paused, pause when playing.
    pub fn toggle(&mut self, recorder: &mut dyn Recorder) -> PlaybackState {
        let kind = match self.state {
            PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                EventKind::VideoPlayed
            }
            PlaybackState::Playing => {
                self.state = PlaybackState::Paused;
                EventKind::VideoPaused
            }
        };
        recorder.record(EventData::from(kind).with("video_id", self.video_id.as_str()));
        self.state
    }

    pub fn ended(&mut self, recorder: &mut dyn Recorder) {
        self.state = PlaybackState::Paused;
        recorder.record(
            EventData::from(EventKind::VideoCompleted).with("video_id", self.video_id.as_str()),
        );
    }

    pub fn seeked(&mut self, current_time: f64, recorder: &mut dyn Recorder) {
        recorder.record(
            EventData::from(EventKind::VideoSeeked)
                .with("video_id", self.video_id.as_str())
                .with("currentTime", current_time),
        );
    }

    pub fn section_viewed(&self, recorder: &mut dyn Recorder) {
        recorder.record(EventData::from(EventKind::VideoSectionViewed));
    }

    pub fn clicked(&self, recorder: &mut dyn Recorder) {
        recorder.record(EventData::from(EventKind::VideoClicked).with("videoUrl", self.url.as_str()));
    }

    pub fn nav_clicked(&self, recorder: &mut dyn Recorder) {
        recorder.record(EventData::from(EventKind::VideoNavClicked));
    }
}
