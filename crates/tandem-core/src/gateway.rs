//! The mutation gateway: the only component that writes to the shared
//! ordered collections.
//!
//! Every mutation resolves its target by identity at call time. Indices
//! are never cached across calls because other participants insert and
//! delete concurrently; an id that has vanished is an expected outcome,
//! not an error.

use kurbo::Vec2;
use thiserror::Error;

use crate::chat::ChatEntry;
use crate::config::BoardConfig;
use crate::room::SharedList;
use crate::shapes::{self, Shape, ShapeId, ShapePatch};

/// Why a mutation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("the board is full ({0} shapes)")]
    ShapeLimitExceeded(usize),
    #[error("the board storage budget is exhausted ({used} of {budget} bytes)")]
    StorageBudgetExceeded { used: usize, budget: usize },
    #[error("image is too large ({size} of {budget} bytes)")]
    ImageTooLarge { size: usize, budget: usize },
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

impl MutationError {
    /// Quota rejections are user-visible; invalid input is not.
    pub fn is_quota(&self) -> bool {
        !matches!(self, MutationError::InvalidInput(_))
    }
}

/// What became of an update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// The target id was not in the collection (concurrently deleted).
    /// A silent no-op by design; callers keep going.
    NotFound,
}

/// Sole writer-of-record for the board and chat sequences.
pub struct MutationGateway {
    board: Box<dyn SharedList<Shape>>,
    chat: Box<dyn SharedList<ChatEntry>>,
    config: BoardConfig,
}

impl MutationGateway {
    pub fn new(
        board: Box<dyn SharedList<Shape>>,
        chat: Box<dyn SharedList<ChatEntry>>,
        config: BoardConfig,
    ) -> Self {
        Self {
            board,
            chat,
            config,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Snapshot of the board in paint order.
    pub fn shapes(&self) -> Vec<Shape> {
        self.board.get_all()
    }

    /// Snapshot of the chat log.
    pub fn chat_log(&self) -> Vec<ChatEntry> {
        self.chat.get_all()
    }

    /// Current index of a shape, resolved fresh on every call.
    fn locate(&self, id: ShapeId) -> Option<(usize, Shape)> {
        self.board
            .get_all()
            .into_iter()
            .enumerate()
            .find(|(_, shape)| shape.id() == id)
    }

    /// Append a shape, enforcing the board quotas.
    ///
    /// On rejection nothing is mutated and the error describes which
    /// budget was hit.
    pub fn insert(&mut self, shape: Shape) -> Result<(), MutationError> {
        self.validate(&shape)?;

        let count = self.board.len();
        if count + 1 > self.config.max_shapes {
            log::warn!("insert rejected: shape limit {} reached", self.config.max_shapes);
            return Err(MutationError::ShapeLimitExceeded(self.config.max_shapes));
        }

        let used = shapes::estimate_size(&self.board.get_all()) + shapes::shape_size(&shape);
        if used > self.config.storage_budget {
            log::warn!(
                "insert rejected: {used} bytes over the {} byte budget",
                self.config.storage_budget
            );
            return Err(MutationError::StorageBudgetExceeded {
                used,
                budget: self.config.storage_budget,
            });
        }

        self.board.push(shape);
        Ok(())
    }

    /// Merge a partial update into the shape with the given id.
    ///
    /// Returns `NotFound` when the id is absent: the shape was deleted by
    /// another participant mid-gesture, and the caller's gesture must not
    /// abort over it. Patches that carry size-bearing fields re-check the
    /// storage budgets.
    pub fn update(&mut self, id: ShapeId, patch: &ShapePatch) -> Result<UpdateOutcome, MutationError> {
        let Some((index, current)) = self.locate(id) else {
            log::debug!("update target {id} not found (concurrently deleted)");
            return Ok(UpdateOutcome::NotFound);
        };

        let merged = current.merge(patch);
        if patch.carries_payload() {
            self.validate(&merged)?;
            let total = shapes::estimate_size(&self.board.get_all())
                - shapes::shape_size(&current)
                + shapes::shape_size(&merged);
            if total > self.config.storage_budget {
                return Err(MutationError::StorageBudgetExceeded {
                    used: total,
                    budget: self.config.storage_budget,
                });
            }
        }

        self.board.set_at(index, merged);
        Ok(UpdateOutcome::Applied)
    }

    /// Delete the shape with the given id; a no-op when it is absent.
    pub fn delete(&mut self, id: ShapeId) -> UpdateOutcome {
        match self.locate(id) {
            Some((index, _)) => {
                self.board.delete_at(index);
                UpdateOutcome::Applied
            }
            None => {
                log::debug!("delete target {id} not found (concurrently deleted)");
                UpdateOutcome::NotFound
            }
        }
    }

    /// Remove every currently-known entry, one removal at a time. The
    /// backend's merge semantics decide what happens when another
    /// participant clears or inserts concurrently.
    pub fn clear(&mut self) {
        let known = self.board.len();
        for _ in 0..known {
            self.board.delete_at(0);
        }
    }

    /// Append a chat message for the given user, deriving its color.
    pub fn append_chat(&mut self, user: &str, text: &str) -> Result<(), MutationError> {
        if text.trim().is_empty() {
            return Err(MutationError::InvalidInput("empty chat message"));
        }
        self.chat.push(ChatEntry::new(user, text.trim()));
        Ok(())
    }

    /// Structural validation shared by insert and payload-bearing updates.
    fn validate(&self, shape: &Shape) -> Result<(), MutationError> {
        match shape {
            Shape::Image(image) => {
                let size = image.payload_len();
                if size > self.config.image_budget {
                    return Err(MutationError::ImageTooLarge {
                        size,
                        budget: self.config.image_budget,
                    });
                }
            }
            Shape::Pencil(pencil) => {
                if pencil.points.is_empty() {
                    return Err(MutationError::InvalidInput("stroke has no points"));
                }
                if pencil.points[0] != Vec2::ZERO {
                    return Err(MutationError::InvalidInput("stroke must start at its origin"));
                }
                if pencil.points.len() > self.config.max_stroke_points {
                    return Err(MutationError::InvalidInput("stroke has too many points"));
                }
            }
            _ => {}
        }
        Ok(())
    }
}
