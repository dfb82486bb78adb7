use std::sync::mpsc::{Receiver, Sender, channel};

/// Published by the session timer after each state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Started { session_id: String },
    Paused { at: i64 },
    Resumed { at: i64 },
    Stopped { session_id: String },
    ItemCovered { item_id: String, at: i64 },
    ItemUncovered { item_id: String },
    Restored { session_id: String },
}

/// Fan-out of timer events to any number of subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<TimerEvent>>,
}

impl EventBus {
    pub fn subscribe(&mut self) -> Receiver<TimerEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Send to every live subscriber, dropping those whose receiver is gone.
    pub fn publish(&mut self, event: TimerEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let mut bus = EventBus::default();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.publish(TimerEvent::Paused { at: 10 });

        assert_eq!(first.try_recv(), Ok(TimerEvent::Paused { at: 10 }));
        assert_eq!(second.try_recv(), Ok(TimerEvent::Paused { at: 10 }));
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut bus = EventBus::default();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        bus.publish(TimerEvent::Resumed { at: 1 });

        assert_eq!(bus.subscriber_count(), 1);
        assert!(kept.try_recv().is_ok());
    }
}
