use keepsake_tracker::Recorder;
use keepsake_types::{EventData, EventKind};

/// Viewport width above which the desktop navbar is shown.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

#[derive(Debug, Clone, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self, recorder: &mut dyn Recorder) -> bool {
        self.open = !self.open;
        recorder.record(EventData::from(EventKind::MobileMenuToggled).with("isOpen", self.open));
        self.open
    }

    pub fn close(&mut self, recorder: &mut dyn Recorder) {
        self.open = false;
        recorder.record(EventData::from(EventKind::MobileMenuClosed));
    }

    /// Document click. Closes an open menu when the click landed outside the navbar.
    pub fn outside_click(&mut self, inside_navbar: bool, recorder: &mut dyn Recorder) {
        if self.open && !inside_navbar {
            self.close(recorder);
        }
    }

    /// Window resize. Growing past the breakpoint closes the menu.
    pub fn resized(&mut self, width: u32, recorder: &mut dyn Recorder) {
        if width > MOBILE_BREAKPOINT_PX {
            self.close(recorder);
        }
    }
}
