// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use log;

/// A generic, thread-safe fan-out channel for immutable state snapshots.
///
/// Unlike an MPSC bus, a `SnapshotBus` clones each published value to every
/// live subscriber. Subscribers that have dropped their receiver are pruned
/// lazily on the next publish, so teardown needs no explicit unsubscribe call.
#[derive(Debug)]
pub struct SnapshotBus<T: Clone + Send + Sync + 'static> {
    senders: Vec<flume::Sender<T>>,
}

impl<T: Clone + Send + Sync + 'static> SnapshotBus<T> {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        log::trace!("SnapshotBus initialized.");
        Self {
            senders: Vec::new(),
        }
    }

    /// Registers a new subscriber and returns its private receiver.
    ///
    /// Dropping the receiver unsubscribes; the bus notices on the next
    /// publish.
    ///
    /// ## Returns
    /// The receiving end of an unbounded channel carrying published values.
    pub fn subscribe(&mut self) -> flume::Receiver<T> {
        let (sender, receiver) = flume::unbounded();
        self.senders.push(sender);
        log::trace!(
            "SnapshotBus subscriber added ({} total).",
            self.senders.len()
        );
        receiver
    }

    /// Publishes a value to every live subscriber, pruning dead ones.
    ///
    /// ## Arguments
    /// * `value` - The snapshot to broadcast; cloned once per subscriber.
    pub fn publish(&mut self, value: &T) {
        let before = self.senders.len();
        self.senders
            .retain(|sender| sender.send(value.clone()).is_ok());
        let pruned = before - self.senders.len();
        if pruned > 0 {
            log::trace!("SnapshotBus pruned {pruned} disconnected subscriber(s).");
        }
    }

    /// Number of subscribers still known to the bus.
    ///
    /// May over-count until the next publish prunes dropped receivers.
    pub fn subscriber_count(&self) -> usize {
        self.senders.len()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for SnapshotBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::TryRecvError;

    #[derive(Debug, Clone, PartialEq)]
    struct TestSnapshot {
        revision: u64,
    }

    #[test]
    fn bus_creation() {
        let bus = SnapshotBus::<TestSnapshot>::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn every_subscriber_receives_each_publish() {
        let mut bus = SnapshotBus::new();
        let rx_a = bus.subscribe();
        let rx_b = bus.subscribe();

        bus.publish(&TestSnapshot { revision: 1 });
        bus.publish(&TestSnapshot { revision: 2 });

        for rx in [&rx_a, &rx_b] {
            assert_eq!(rx.try_recv().unwrap().revision, 1);
            assert_eq!(rx.try_recv().unwrap().revision, 2);
            assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        }
    }

    #[test]
    fn dropped_receivers_are_pruned_on_publish() {
        let mut bus = SnapshotBus::new();
        let rx_kept = bus.subscribe();
        let rx_dropped = bus.subscribe();
        drop(rx_dropped);

        bus.publish(&TestSnapshot { revision: 7 });

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(rx_kept.try_recv().unwrap().revision, 7);
    }

    #[test]
    fn publish_with_no_subscribers_is_a_no_op() {
        let mut bus = SnapshotBus::new();
        bus.publish(&TestSnapshot { revision: 1 });
        assert_eq!(bus.subscriber_count(), 0);
    }
}
