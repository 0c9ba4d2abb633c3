//! Ports onto the externally-owned room infrastructure.
//!
//! The replicated list substrate, undo/redo history, presence channel and
//! identity provider all live outside this crate. They are consumed
//! through the traits below so any replicated backend can be swapped in
//! without touching the core; [`memory`] provides single-process
//! reference implementations for local boards and tests.

mod memory;

pub use memory::{LocalIdentity, MemoryHistory, MemoryList, MemoryPresence};

use crate::presence::{Presence, RemotePeer};

/// Change listener invoked with a fresh snapshot after every mutation.
pub type ListListener<T> = Box<dyn FnMut(&[T])>;

/// An ordered, replicated sequence of values.
///
/// Implementations must provide read-your-writes: a snapshot taken right
/// after a mutation reflects that mutation. No ordering is promised
/// between a local write and a concurrently merged remote one; callers
/// therefore locate entries by identity, never by a remembered index.
pub trait SharedList<T: Clone> {
    /// Snapshot of the current sequence, in paint order.
    fn get_all(&self) -> Vec<T>;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert at `index` (clamped to the current length).
    fn insert_at(&mut self, index: usize, item: T);

    /// Append at the end.
    fn push(&mut self, item: T);

    /// Replace the entry at `index`; out-of-range indices are ignored.
    fn set_at(&mut self, index: usize, item: T);

    /// Delete the entry at `index`; out-of-range indices are ignored.
    fn delete_at(&mut self, index: usize);

    /// Register a change listener. Listeners receive a fresh snapshot
    /// after every local or merged mutation.
    fn subscribe(&mut self, listener: ListListener<T>);
}

/// The external undo/redo history.
///
/// Gestures bracket themselves with `pause`/`resume` so that a continuous
/// pointer interaction collapses into a single undoable step. Brackets
/// must nest: every `pause` is matched by exactly one `resume`, even when
/// a gesture ends by the pointer leaving the canvas.
pub trait History {
    fn pause(&mut self);
    fn resume(&mut self);
    fn undo(&mut self);
    fn redo(&mut self);
}

/// The presence broadcast channel.
pub trait PresenceChannel {
    /// Publish the local participant's ephemeral state.
    fn set_local_presence(&mut self, presence: Presence);

    /// The other participants currently in the room.
    fn others(&self) -> Vec<RemotePeer>;
}

/// The identity provider for the local participant.
pub trait Identity {
    /// Display name used for chat entries; implementations fall back to a
    /// placeholder when the user has no name yet.
    fn display_name(&self) -> String;
}
