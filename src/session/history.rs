//! Undo/redo history for boundary edits.
//!
//! Every change a session makes to a closed boundary is recorded as an [`EditCommand`]
//! holding both the old and the new value, so the session can step backward and forward
//! without recomputing diffs.

use std::collections::VecDeque;

use crate::constants::DEFAULT_HISTORY_LIMIT;
use crate::model::{AreaUnit, Polygon};

/// A reversible change to a closed boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// The polygon was replaced (vertex drag, insert, remove, or external update)
    ReplacePolygon {
        /// What kind of edit produced the new polygon
        description: &'static str,
        /// The polygon before the edit
        old: Polygon,
        /// The polygon after the edit
        new: Polygon,
    },
    /// The selected area unit changed
    ChangeUnit {
        /// The unit before the change
        old: AreaUnit,
        /// The unit after the change
        new: AreaUnit,
    },
}

impl EditCommand {
    /// Get a human-readable description of this command
    pub fn description(&self) -> String {
        match self {
            EditCommand::ReplacePolygon { description, .. } => (*description).to_string(),
            EditCommand::ChangeUnit { old, new } => {
                format!("Change unit from {} to {}", old.name(), new.name())
            }
        }
    }
}

/// Bounded undo and redo stacks.
///
/// Pushing a new command clears the redo stack. When the undo stack exceeds `limit`, the
/// oldest command is dropped.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: VecDeque<EditCommand>,
    redo_stack: Vec<EditCommand>,
    limit: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl EditHistory {
    /// Create a history keeping at most `limit` undoable commands.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Record a command that has just been applied.
    pub fn push(&mut self, command: EditCommand) {
        log::debug!("Recorded edit '{}'", command.description());
        self.undo_stack.push_back(command);
        self.redo_stack.clear();

        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Take the most recent command for undoing and move it to the redo stack.
    pub fn pop_undo(&mut self) -> Option<EditCommand> {
        let cmd = self.undo_stack.pop_back()?;
        log::debug!("Undo '{}'", cmd.description());
        self.redo_stack.push(cmd.clone());
        Some(cmd)
    }

    /// Take the most recently undone command and move it back to the undo stack.
    pub fn pop_redo(&mut self) -> Option<EditCommand> {
        let cmd = self.redo_stack.pop()?;
        log::debug!("Redo '{}'", cmd.description());
        self.undo_stack.push_back(cmd.clone());
        Some(cmd)
    }

    /// Description of the command that would be undone
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(|c| c.description())
    }

    /// Description of the command that would be redone
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(|c| c.description())
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Number of undoable commands.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redoable commands.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
