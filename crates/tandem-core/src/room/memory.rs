//! Single-process implementations of the room ports.
//!
//! Handles are cheap clones sharing one underlying state, which models the
//! essential property of the real backends: several components hold the
//! same collection and observe each other's writes immediately.

use std::cell::RefCell;
use std::rc::Rc;

use crate::presence::{Presence, RemotePeer};
use crate::room::{History, Identity, ListListener, PresenceChannel, SharedList};

/// Display name used when the user has none.
pub const DEFAULT_DISPLAY_NAME: &str = "Anonymous";

struct ListState<T> {
    items: Vec<T>,
    listeners: Vec<ListListener<T>>,
}

/// In-memory [`SharedList`] over a `Vec`. Cloned handles share storage.
pub struct MemoryList<T> {
    inner: Rc<RefCell<ListState<T>>>,
}

impl<T> Clone for MemoryList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for MemoryList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MemoryList<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListState {
                items: Vec::new(),
                listeners: Vec::new(),
            })),
        }
    }
}

impl<T: Clone> MemoryList<T> {
    /// Invoke listeners with a fresh snapshot.
    ///
    /// Listeners are taken out of the state for the duration of the calls
    /// so a listener may use its own handle to the list.
    fn notify(&self) {
        let snapshot = self.inner.borrow().items.clone();
        let mut listeners = std::mem::take(&mut self.inner.borrow_mut().listeners);
        for listener in &mut listeners {
            listener(&snapshot);
        }
        let mut state = self.inner.borrow_mut();
        listeners.extend(state.listeners.drain(..));
        state.listeners = listeners;
    }
}

impl<T: Clone> SharedList<T> for MemoryList<T> {
    fn get_all(&self) -> Vec<T> {
        self.inner.borrow().items.clone()
    }

    fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    fn insert_at(&mut self, index: usize, item: T) {
        {
            let mut state = self.inner.borrow_mut();
            let index = index.min(state.items.len());
            state.items.insert(index, item);
        }
        self.notify();
    }

    fn push(&mut self, item: T) {
        self.inner.borrow_mut().items.push(item);
        self.notify();
    }

    fn set_at(&mut self, index: usize, item: T) {
        {
            let mut state = self.inner.borrow_mut();
            let Some(slot) = state.items.get_mut(index) else {
                return;
            };
            *slot = item;
        }
        self.notify();
    }

    fn delete_at(&mut self, index: usize) {
        {
            let mut state = self.inner.borrow_mut();
            if index >= state.items.len() {
                return;
            }
            state.items.remove(index);
        }
        self.notify();
    }

    fn subscribe(&mut self, listener: ListListener<T>) {
        self.inner.borrow_mut().listeners.push(listener);
    }
}

#[derive(Debug, Default)]
struct HistoryState {
    pause_depth: usize,
    pauses: usize,
    resumes: usize,
    undos: usize,
    redos: usize,
}

/// In-memory [`History`] that records pause/resume bracketing.
///
/// The real history lives in the replicated backend; this implementation
/// exists for local boards and for asserting bracket discipline in tests.
#[derive(Clone, Default)]
pub struct MemoryHistory {
    inner: Rc<RefCell<HistoryState>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pause bracket is currently open.
    pub fn is_paused(&self) -> bool {
        self.inner.borrow().pause_depth > 0
    }

    /// Total number of `pause` calls seen.
    pub fn pauses(&self) -> usize {
        self.inner.borrow().pauses
    }

    /// Total number of `resume` calls seen.
    pub fn resumes(&self) -> usize {
        self.inner.borrow().resumes
    }

    pub fn undos(&self) -> usize {
        self.inner.borrow().undos
    }

    pub fn redos(&self) -> usize {
        self.inner.borrow().redos
    }
}

impl History for MemoryHistory {
    fn pause(&mut self) {
        let mut state = self.inner.borrow_mut();
        state.pause_depth += 1;
        state.pauses += 1;
    }

    fn resume(&mut self) {
        let mut state = self.inner.borrow_mut();
        state.pause_depth = state.pause_depth.saturating_sub(1);
        state.resumes += 1;
    }

    fn undo(&mut self) {
        self.inner.borrow_mut().undos += 1;
    }

    fn redo(&mut self) {
        self.inner.borrow_mut().redos += 1;
    }
}

#[derive(Default)]
struct PresenceState {
    local: Option<Presence>,
    peers: Vec<RemotePeer>,
}

/// In-memory [`PresenceChannel`] that records the last published payload.
#[derive(Clone, Default)]
pub struct MemoryPresence {
    inner: Rc<RefCell<PresenceState>>,
}

impl MemoryPresence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published local presence, if any.
    pub fn local(&self) -> Option<Presence> {
        self.inner.borrow().local.clone()
    }

    /// Seed the remote-peer list (test hook standing in for the network).
    pub fn set_peers(&mut self, peers: Vec<RemotePeer>) {
        self.inner.borrow_mut().peers = peers;
    }
}

impl PresenceChannel for MemoryPresence {
    fn set_local_presence(&mut self, presence: Presence) {
        self.inner.borrow_mut().local = Some(presence);
    }

    fn others(&self) -> Vec<RemotePeer> {
        self.inner.borrow().peers.clone()
    }
}

/// [`Identity`] backed by an optional configured name.
#[derive(Debug, Clone, Default)]
pub struct LocalIdentity {
    name: Option<String>,
}

impl LocalIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl Identity for LocalIdentity {
    fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_list_read_your_writes() {
        let mut list: MemoryList<u32> = MemoryList::new();
        list.push(1);
        list.push(2);
        assert_eq!(list.get_all(), vec![1, 2]);

        list.set_at(0, 9);
        assert_eq!(list.get_all(), vec![9, 2]);

        list.delete_at(1);
        assert_eq!(list.get_all(), vec![9]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_memory_list_shared_handles() {
        let mut writer: MemoryList<u32> = MemoryList::new();
        let reader = writer.clone();

        writer.push(7);
        assert_eq!(reader.get_all(), vec![7]);
    }

    #[test]
    fn test_memory_list_out_of_range_is_ignored() {
        let mut list: MemoryList<u32> = MemoryList::new();
        list.push(1);
        list.set_at(5, 9);
        list.delete_at(5);
        assert_eq!(list.get_all(), vec![1]);
    }

    #[test]
    fn test_memory_list_notifies_with_snapshot() {
        let mut list: MemoryList<u32> = MemoryList::new();
        let seen: Rc<RefCell<Vec<Vec<u32>>>> = Rc::default();
        let sink = Rc::clone(&seen);
        list.subscribe(Box::new(move |snapshot| {
            sink.borrow_mut().push(snapshot.to_vec());
        }));

        list.push(1);
        list.push(2);
        assert_eq!(*seen.borrow(), vec![vec![1], vec![1, 2]]);
    }

    #[test]
    fn test_history_bracketing() {
        let mut history = MemoryHistory::new();
        assert!(!history.is_paused());

        history.pause();
        assert!(history.is_paused());
        history.resume();
        assert!(!history.is_paused());

        // Unbalanced resume does not underflow.
        history.resume();
        assert!(!history.is_paused());
    }

    #[test]
    fn test_identity_placeholder() {
        assert_eq!(LocalIdentity::anonymous().display_name(), "Anonymous");
        assert_eq!(LocalIdentity::new("ada").display_name(), "ada");
    }
}
