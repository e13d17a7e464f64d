//! Namespaced observers. A listener registers for a topic under a namespace; registering again
//! under the same namespace replaces the old listener instead of adding a second one. Every
//! registration also gets a `Token` for removing it later.
//!
//! Notifications are queued by `emit` and handed out by `drain`, so whoever owns the listeners
//! can deliver them after finishing whatever caused the notification.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(usize);

struct Listener<L> {
    token: Token,
    topic: String,
    namespace: Option<String>,
    payload: L,
}

/// One emitted notification, with the listeners that were registered at the time, in
/// registration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub topic: String,
    pub namespaces: Vec<String>,
}

impl Notification {
    pub fn includes(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }
}

pub struct Dispatch<L = ()> {
    next_token: usize,
    listeners: Vec<Listener<L>>,
    queue: VecDeque<Notification>,
}

impl<L> Dispatch<L> {
    pub fn new() -> Dispatch<L> {
        Dispatch {
            next_token: 0,
            listeners: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    /// Registers a named listener, replacing any existing one with the same topic and namespace.
    /// The replacement moves to the end of the delivery order.
    pub fn on(&mut self, topic: &str, namespace: &str, payload: L) -> Token {
        self.off(topic, namespace);
        self.push(topic, Some(namespace.to_string()), payload)
    }

    /// Registers an anonymous listener. These are never replaced, only removed by token.
    pub fn subscribe(&mut self, topic: &str, payload: L) -> Token {
        self.push(topic, None, payload)
    }

    /// Removes a named listener. Returns false if there wasn't one.
    pub fn off(&mut self, topic: &str, namespace: &str) -> bool {
        let before = self.listeners.len();
        self.listeners
            .retain(|l| !(l.topic == topic && l.namespace.as_deref() == Some(namespace)));
        before != self.listeners.len()
    }

    pub fn unsubscribe(&mut self, token: Token) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.token != token);
        before != self.listeners.len()
    }

    pub fn is_subscribed(&self, topic: &str, namespace: &str) -> bool {
        self.listeners
            .iter()
            .any(|l| l.topic == topic && l.namespace.as_deref() == Some(namespace))
    }

    pub fn token(&self, topic: &str, namespace: &str) -> Option<Token> {
        self.listeners
            .iter()
            .find(|l| l.topic == topic && l.namespace.as_deref() == Some(namespace))
            .map(|l| l.token)
    }

    pub fn listeners<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a L> + 'a {
        self.listeners
            .iter()
            .filter(move |l| l.topic == topic)
            .map(|l| &l.payload)
    }

    pub fn listeners_mut<'a>(&'a mut self, topic: &'a str) -> impl Iterator<Item = &'a mut L> + 'a {
        self.listeners
            .iter_mut()
            .filter(move |l| l.topic == topic)
            .map(|l| &mut l.payload)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Queues a notification for every named listener currently registered for the topic.
    /// Nothing is queued if there are none.
    pub fn emit(&mut self, topic: &str) {
        let namespaces: Vec<String> = self
            .listeners
            .iter()
            .filter(|l| l.topic == topic)
            .filter_map(|l| l.namespace.clone())
            .collect();
        if namespaces.is_empty() {
            return;
        }
        self.queue.push_back(Notification {
            topic: topic.to_string(),
            namespaces,
        });
    }

    /// Hands out everything emitted so far, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    fn push(&mut self, topic: &str, namespace: Option<String>, payload: L) -> Token {
        let token = Token(self.next_token);
        self.next_token += 1;
        self.listeners.push(Listener {
            token,
            topic: topic.to_string(),
            namespace,
            payload,
        });
        token
    }
}

impl<L> Default for Dispatch<L> {
    fn default() -> Self {
        Dispatch::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Dispatch;

    #[test]
    fn test_namespaces_replace() {
        let mut dispatch: Dispatch<usize> = Dispatch::new();
        dispatch.on("change", "restrictions", 1);
        dispatch.on("change", "sidebar", 2);
        dispatch.on("change", "restrictions", 3);
        assert_eq!(2, dispatch.len());
        // The replacement moved to the back
        assert_eq!(vec![2, 3], dispatch.listeners("change").cloned().collect::<Vec<_>>());

        assert!(dispatch.off("change", "sidebar"));
        assert!(!dispatch.off("change", "sidebar"));
        assert!(!dispatch.is_subscribed("change", "sidebar"));
        assert!(dispatch.is_subscribed("change", "restrictions"));
    }

    #[test]
    fn test_tokens() {
        let mut dispatch: Dispatch<&str> = Dispatch::new();
        let a = dispatch.subscribe("resize", "a");
        let b = dispatch.subscribe("resize", "b");
        assert_ne!(a, b);
        assert!(dispatch.unsubscribe(a));
        assert!(!dispatch.unsubscribe(a));
        assert_eq!(vec!["b"], dispatch.listeners("resize").cloned().collect::<Vec<_>>());

        let named = dispatch.on("resize", "restrictions", "c");
        assert_eq!(Some(named), dispatch.token("resize", "restrictions"));
        assert!(dispatch.unsubscribe(named));
        assert!(!dispatch.is_subscribed("resize", "restrictions"));
    }

    #[test]
    fn test_emit_and_drain() {
        let mut dispatch: Dispatch = Dispatch::new();
        // Nobody's listening yet
        dispatch.emit("change");
        assert!(dispatch.drain().is_empty());

        dispatch.on("change", "first", ());
        dispatch.on("change", "second", ());
        dispatch.on("undone", "first", ());
        dispatch.emit("change");
        dispatch.off("change", "first");
        dispatch.emit("change");

        let notes = dispatch.drain();
        assert_eq!(2, notes.len());
        assert_eq!(vec!["first", "second"], notes[0].namespaces);
        assert!(notes[0].includes("first"));
        assert!(!notes[1].includes("first"));
        assert!(dispatch.drain().is_empty());
    }

    #[test]
    fn test_callbacks() {
        let mut dispatch: Dispatch<Box<dyn FnMut(usize) -> usize>> = Dispatch::new();
        dispatch.on("change", "double", Box::new(|x| x * 2));
        dispatch.on("change", "inc", Box::new(|x| x + 1));
        let results: Vec<usize> = dispatch.listeners_mut("change").map(|cb| cb(10)).collect();
        assert_eq!(vec![20, 11], results);
    }
}
