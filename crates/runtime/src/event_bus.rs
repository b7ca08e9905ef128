/// Ordered log of engine notifications.
///
/// Producers push events as state changes; the host drains them once per
/// turn to update whatever presents the scene.
#[derive(Debug, Clone)]
pub struct EventBus<E> {
    events: Vec<E>,
    emitted: u64,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            emitted: 0,
        }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: E) {
        self.events.push(event);
        self.emitted += 1;
    }

    pub fn events(&self) -> &[E] {
        &self.events
    }

    /// Total number of events ever emitted, including drained ones.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
