use keepsake_types::EventData;

/// Sink for interaction events.
///
/// Implemented by [`crate::InteractionLogger`]; widgets and page trackers only
/// ever see this trait.
pub trait Recorder {
    fn record(&mut self, data: EventData);
}

impl Recorder for Vec<EventData> {
    fn record(&mut self, data: EventData) {
        self.push(data);
    }
}
