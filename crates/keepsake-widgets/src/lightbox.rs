use keepsake_tracker::Recorder;
use keepsake_types::{EventData, EventKind};

use crate::key::Key;

const DEFAULT_TITLE: &str = "Gallery Image";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryImage {
    pub src: String,
    pub title: String,
    pub description: String,
}

impl GalleryImage {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }
}

/// Full-screen viewer over the memory gallery.
#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    images: Vec<GalleryImage>,
    current: usize,
    open: bool,
    title: String,
    description: String,
}

impl Lightbox {
    pub fn new(images: Vec<GalleryImage>) -> Self {
        Self {
            images,
            ..Self::default()
        }
    }

    pub fn from_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(sources.into_iter().map(GalleryImage::new).collect())
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_image(&self) -> Option<&GalleryImage> {
        self.images.get(self.current)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Title shown under the image. Empty when neither a title nor a
    /// description was supplied.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the caption block should be visible.
    pub fn shows_info(&self) -> bool {
        !self.title.is_empty() || !self.description.is_empty()
    }

    /// Open on the first image whose source contains `src`. If none does,
    /// the current index is kept.
    pub fn open(
        &mut self,
        src: &str,
        title: Option<&str>,
        description: Option<&str>,
        recorder: &mut dyn Recorder,
    ) {
        if let Some(index) = self.images.iter().position(|img| img.src.contains(src)) {
            self.current = index;
        }

        self.title = title.unwrap_or_default().to_string();
        self.description = description.unwrap_or_default().to_string();
        self.open = true;

        let logged_title = if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            self.title.as_str()
        };
        recorder.record(
            EventData::from(EventKind::LightboxOpened)
                .with("image", src)
                .with("title", logged_title),
        );
    }

    pub fn close(&mut self, recorder: &mut dyn Recorder) {
        self.open = false;
        recorder.record(EventData::from(EventKind::LightboxClosed));
    }

    pub fn next(&mut self, recorder: &mut dyn Recorder) {
        if self.images.is_empty() {
            return;
        }
        self.current = (self.current + 1) % self.images.len();
        self.show_current("next", recorder);
    }

    pub fn prev(&mut self, recorder: &mut dyn Recorder) {
        if self.images.is_empty() {
            return;
        }
        let len = self.images.len();
        self.current = (self.current + len - 1) % len;
        self.show_current("prev", recorder);
    }

    /// Keyboard handling while open. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: Key, recorder: &mut dyn Recorder) -> bool {
        if !self.open {
            return false;
        }
        match key {
            Key::Escape => self.close(recorder),
            Key::ArrowLeft => self.prev(recorder),
            Key::ArrowRight => self.next(recorder),
            Key::Other => return false,
        }
        true
    }

    fn show_current(&mut self, direction: &str, recorder: &mut dyn Recorder) {
        if let Some(image) = self.images.get(self.current) {
            self.title = image.title.clone();
            self.description = image.description.clone();
        }
        recorder.record(
            EventData::from(EventKind::LightboxNavigation)
                .with("direction", direction)
                .with("imageIndex", self.current),
        );
    }
}
