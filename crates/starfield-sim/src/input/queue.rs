use crate::core::params::ControlKey;

/// Host-to-simulation events. The bridge pushes, the simulation drains at
/// the start of the next tick, so parameter writes never interleave with a
/// frame in progress.
#[derive(Debug, Clone, Copy)]
pub enum HostEvent {
    /// A control widget changed a parameter.
    SetControl { key: ControlKey, value: f32 },
    /// Natural size of the loaded background image. Never sent when the
    /// asset fails to load — the simulation simply runs without one.
    SetBackgroundSize { width: f32, height: f32 },
}

/// A queue of pending host events.
pub struct EventQueue {
    events: Vec<HostEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    /// Push a new event (called from the bridge exports).
    pub fn push(&mut self, event: HostEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = EventQueue::new();
        q.push(HostEvent::SetControl { key: ControlKey::ZoomRate, value: 0.001 });
        q.push(HostEvent::SetBackgroundSize { width: 2048.0, height: 1365.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_order() {
        let mut q = EventQueue::new();
        q.push(HostEvent::SetControl { key: ControlKey::BaseStarSize, value: 1.0 });
        q.push(HostEvent::SetControl { key: ControlKey::BaseStarSize, value: 2.0 });
        let events = q.drain();
        match (events[0], events[1]) {
            (
                HostEvent::SetControl { value: first, .. },
                HostEvent::SetControl { value: second, .. },
            ) => {
                // Last write must win once applied in order.
                assert_eq!(first, 1.0);
                assert_eq!(second, 2.0);
            }
            _ => panic!("unexpected event kinds"),
        }
    }
}
