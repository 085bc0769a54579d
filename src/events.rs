//! Typed, synchronous event emitter.
//!
//! Components hold an [`EventEmitter`] instead of inheriting dispatch
//! behaviour. Listeners subscribe to a single event kind and run in the
//! order they were registered.

use std::fmt;

pub trait Event {
    type Kind: Copy + Eq + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener<E: Event> {
    id: ListenerId,
    kind: E::Kind,
    callback: Box<dyn FnMut(&E)>,
}

pub struct EventEmitter<E: Event> {
    next_id: u64,
    listeners: Vec<Listener<E>>,
}

impl<E: Event> EventEmitter<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn on<F>(&mut self, kind: E::Kind, callback: F) -> ListenerId
    where
        F: FnMut(&E) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// Returns false when `id` was not registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &E) {
        let kind = event.kind();

        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.callback)(event);
        }
    }

    #[must_use]
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }
}

impl<E: Event> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
