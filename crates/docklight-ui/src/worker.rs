//! Results from background work, delivered to the dock's event loop.
//!
//! Workers never touch engine state. They post [`WorkerMessage`]s through a
//! [`WorkerSender`]; the dock drains the queue once at the start of every
//! tick and folds the results in.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use docklight_render::IconImage;

use crate::item::ItemId;

#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// A freshly rendered icon for an item.
    IconReady { item: ItemId, icon: Arc<IconImage> },
    /// Ask the dock to fetch a new icon from the item's applet.
    RefreshIcon(ItemId),
    /// Something visible changed; redraw on the next tick.
    Redraw,
}

/// Cloneable handle workers post results through.
#[derive(Debug, Clone)]
pub struct WorkerSender {
    tx: Sender<WorkerMessage>,
}

impl WorkerSender {
    /// Post a message. Returns `false` once the dock is gone.
    pub fn send(&self, message: WorkerMessage) -> bool {
        self.tx.send(message).is_ok()
    }
}

/// The receiving end, owned by the dock.
#[derive(Debug)]
pub struct WorkerQueue {
    tx: Sender<WorkerMessage>,
    rx: Receiver<WorkerMessage>,
}

impl Default for WorkerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkerQueue {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> WorkerSender {
        WorkerSender { tx: self.tx.clone() }
    }

    /// Everything posted so far, without blocking.
    pub fn drain(&self) -> Vec<WorkerMessage> {
        self.rx.try_iter().collect()
    }
}

/// Handle given to an applet when it starts, bound to its item.
#[derive(Debug, Clone)]
pub struct AppletNotifier {
    item: ItemId,
    sender: WorkerSender,
}

impl AppletNotifier {
    pub fn new(item: ItemId, sender: WorkerSender) -> Self {
        Self { item, sender }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn icon_ready(&self, icon: Arc<IconImage>) -> bool {
        self.sender.send(WorkerMessage::IconReady {
            item: self.item,
            icon,
        })
    }

    /// Ask the dock to call [`Applet::icon`](crate::applet::Applet::icon) again.
    pub fn refresh_icon(&self) -> bool {
        self.sender.send(WorkerMessage::RefreshIcon(self.item))
    }

    pub fn redraw(&self) -> bool {
        self.sender.send(WorkerMessage::Redraw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn messages_from_other_threads_are_drained_in_order() {
        let queue = WorkerQueue::new();
        let notifier = AppletNotifier::new(ItemId(4), queue.sender());
        let handle = thread::spawn(move || {
            assert!(notifier.refresh_icon());
            assert!(notifier.redraw());
        });
        handle.join().unwrap();

        let messages = queue.drain();
        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], WorkerMessage::RefreshIcon(ItemId(4))));
        assert!(matches!(messages[1], WorkerMessage::Redraw));
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn send_fails_after_queue_is_dropped() {
        let queue = WorkerQueue::new();
        let sender = queue.sender();
        drop(queue);
        assert!(!sender.send(WorkerMessage::Redraw));
    }
}
