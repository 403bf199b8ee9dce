use keepsake_tracker::Recorder;
use keepsake_types::{EventData, EventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Memory {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
}

const MEMORIES: &[Memory] = &[
    Memory {
        id: 1,
        title: "Our First Date",
        description: "The day that started our beautiful journey together. I was so nervous, but you made me feel so comfortable. That's when I knew you were special.",
        image: "https://via.placeholder.com/600x400/ff69b4/ffffff?text=Our+First+Date",
    },
    Memory {
        id: 2,
        title: "Our First Trip",
        description: "Remember our first adventure together? We laughed so much, got a little lost, but found each other even more. Every trip with you is a new chapter in our story.",
        image: "https://via.placeholder.com/600x400/ff1493/ffffff?text=Our+First+Trip",
    },
    Memory {
        id: 3,
        title: "Special Moments",
        description: "All those little moments that mean everything - morning coffee together, late night talks, silly jokes, and quiet embraces. These are the moments I treasure most.",
        image: "https://via.placeholder.com/600x400/ff69b4/ffffff?text=Special+Moments",
    },
    Memory {
        id: 4,
        title: "Celebrations",
        description: "Every celebration is better with you by my side. Birthdays, holidays, achievements - you make every moment feel like a celebration of our love.",
        image: "https://via.placeholder.com/600x400/ff1493/ffffff?text=Celebrations",
    },
];

/// Memory cards and the modal that shows one of them.
#[derive(Debug, Clone)]
pub struct MemoryBook {
    memories: &'static [Memory],
    open: Option<u32>,
}

impl Default for MemoryBook {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBook {
    pub fn new() -> Self {
        Self::with_memories(MEMORIES)
    }

    pub fn with_memories(memories: &'static [Memory]) -> Self {
        Self {
            memories,
            open: None,
        }
    }

    pub fn memories(&self) -> &[Memory] {
        self.memories
    }

    pub fn get(&self, id: u32) -> Option<&Memory> {
        self.memories.iter().find(|m| m.id == id)
    }

    pub fn open_memory(&self) -> Option<&Memory> {
        self.open.and_then(|id| self.get(id))
    }

    /// Show a memory in the modal. Unknown ids do nothing.
    pub fn open(&mut self, id: u32, recorder: &mut dyn Recorder) -> Option<&Memory> {
        let memory = *self.get(id)?;
        self.open = Some(id);
        recorder.record(
            EventData::from(EventKind::MemoryViewed)
                .with("memoryId", id)
                .with("title", memory.title),
        );
        self.get(id)
    }

    pub fn close(&mut self) {
        self.open = None;
    }
}
