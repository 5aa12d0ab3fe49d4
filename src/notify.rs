//! Broadcast channel for human-readable status and error messages. Any
//! number of subscribers may attach or detach at runtime; `publish` fans a
//! message out to all of them in subscription order, best-effort and
//! in-process. The whole crate runs on a single logical thread, so interior
//! mutability via `RefCell` is enough to let navigators publish while a
//! subscriber list exists elsewhere.

use std::cell::{Cell, RefCell};

/// Handle returned by [`NotificationChannel::subscribe`], used to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(usize);

type Subscriber = Box<dyn FnMut(&str)>;

/// In-process fan-out of notification strings.
#[derive(Default)]
pub struct NotificationChannel {
    subscribers: RefCell<Vec<(SubscriberId, Subscriber)>>,
    next_id: Cell<usize>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a subscriber; it will receive every subsequent publish, after
    /// all earlier subscribers.
    pub fn subscribe(&self, subscriber: impl FnMut(&str) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Box::new(subscriber)));
        id
    }

    /// Detach a subscriber. Detaching an unknown id is harmless.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers
            .borrow_mut()
            .retain(|(existing, _)| *existing != id);
    }

    /// Deliver a message to every subscriber in subscription order.
    pub fn publish(&self, message: &str) {
        log::debug!("notify: {message}");
        for (_, subscriber) in self.subscribers.borrow_mut().iter_mut() {
            subscriber(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn delivers_in_subscription_order() {
        let channel = NotificationChannel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        channel.subscribe(move |m| first.borrow_mut().push(format!("a:{m}")));
        let second = Rc::clone(&seen);
        channel.subscribe(move |m| second.borrow_mut().push(format!("b:{m}")));

        channel.publish("hello");
        assert_eq!(*seen.borrow(), vec!["a:hello", "b:hello"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let channel = NotificationChannel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let id = channel.subscribe(move |m| sink.borrow_mut().push(m.to_string()));
        channel.publish("one");
        channel.unsubscribe(id);
        channel.publish("two");

        assert_eq!(*seen.borrow(), vec!["one"]);
        // Detaching again is a no-op.
        channel.unsubscribe(id);
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let channel = NotificationChannel::new();
        channel.publish("nobody listening");
    }
}
