use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

/// Source of "now".
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for scripted visits and tests.
///
/// Clones share the same instant, so a test can keep one handle while the
/// logger owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_millis(&self, millis: i64) {
        self.advance(Duration::milliseconds(millis));
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Device facts reported on page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub user_agent: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub language: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            user_agent: format!(
                "keepsake/{} ({}; {})",
                env!("CARGO_PKG_VERSION"),
                std::env::consts::OS,
                std::env::consts::ARCH
            ),
            screen_width: 1920,
            screen_height: 1080,
            language: "en-US".to_string(),
        }
    }
}

impl ClientInfo {
    /// Defaults, with the language taken from `LANG` when it is set
    /// (`en_GB.UTF-8` becomes `en-GB`).
    pub fn from_environment() -> Self {
        let mut info = Self::default();
        if let Ok(lang) = std::env::var("LANG")
            && let Some(tag) = language_tag(&lang)
        {
            info.language = tag;
        }
        info
    }

    /// `WIDTHxHEIGHT`
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.screen_width, self.screen_height)
    }
}

fn language_tag(posix_locale: &str) -> Option<String> {
    let base = posix_locale.split(['.', '@']).next()?;
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// Answers "does an element with this id exist on the page?".
pub trait ElementLookup {
    fn exists(&self, id: &str) -> bool;
}

impl ElementLookup for BTreeSet<String> {
    fn exists(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl ElementLookup for HashSet<String> {
    fn exists(&self, id: &str) -> bool {
        self.contains(id)
    }
}

impl ElementLookup for [&str] {
    fn exists(&self, id: &str) -> bool {
        self.contains(&id)
    }
}
