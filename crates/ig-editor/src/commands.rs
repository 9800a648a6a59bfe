//! Undo/Redo history of style commits.
//!
//! Every committed patch is recorded as the before/after styles of the
//! objects it changed, so undo restores `before` and redo restores `after`
//! without recomputing inverse patches.
//!
//! Continuous gestures (dragging through the color picker, holding the size
//! stepper) are grouped with `begin_batch`/`end_batch`: commits inside a
//! batch apply live, and closing the outermost batch pushes a single entry
//! that keeps each object's first `before` and last `after`.

use crate::selection::{StyleChange, TextLayer};
use ig_core::TextStylePatch;

/// One undoable step.
#[derive(Debug, Clone)]
pub struct Command {
    pub changes: Vec<StyleChange>,
    pub description: String,
}

/// Manages undo/redo stacks with batch grouping.
#[derive(Debug)]
pub struct CommandStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    /// Maximum undo depth.
    max_depth: usize,
    /// Batch nesting depth (0 = not batching).
    batch_depth: usize,
    /// Changes accumulated by the open batch, one entry per object.
    batch_changes: Vec<StyleChange>,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            max_depth,
            batch_depth: 0,
            batch_changes: Vec::new(),
        }
    }

    /// Commit `patch` to the selection and record it. Returns `true` if any
    /// object changed.
    pub fn execute(
        &mut self,
        layer: &mut TextLayer,
        patch: &TextStylePatch,
        description: &str,
    ) -> bool {
        let changes = layer.commit(patch);
        if changes.is_empty() {
            return false;
        }

        if self.batch_depth > 0 {
            self.absorb(changes);
            return true;
        }

        self.push(Command {
            changes,
            description: description.to_string(),
        });
        true
    }

    pub fn begin_batch(&mut self) {
        self.batch_depth += 1;
    }

    /// Close a batch. When the outermost batch closes, push one command if
    /// the gesture left any object different from where it started.
    pub fn end_batch(&mut self, description: &str) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth > 0 {
            return;
        }
        let changes: Vec<StyleChange> = std::mem::take(&mut self.batch_changes)
            .into_iter()
            .filter(|c| c.before != c.after)
            .collect();
        if !changes.is_empty() {
            self.push(Command {
                changes,
                description: description.to_string(),
            });
        }
    }

    /// Undo the last command, returning its description.
    pub fn undo(&mut self, layer: &mut TextLayer) -> Option<String> {
        let cmd = self.undo_stack.pop()?;
        for change in cmd.changes.iter().rev() {
            layer.restore(change.id, &change.before);
        }
        let desc = cmd.description.clone();
        self.redo_stack.push(cmd);
        Some(desc)
    }

    /// Redo the last undone command, returning its description.
    pub fn redo(&mut self, layer: &mut TextLayer) -> Option<String> {
        let cmd = self.redo_stack.pop()?;
        for change in &cmd.changes {
            layer.restore(change.id, &change.after);
        }
        let desc = cmd.description.clone();
        self.undo_stack.push(cmd);
        Some(desc)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn is_batching(&self) -> bool {
        self.batch_depth > 0
    }

    fn push(&mut self, cmd: Command) {
        log::debug!("history: {} ({} object(s))", cmd.description, cmd.changes.len());
        self.undo_stack.push(cmd);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        // Clear redo stack on new action
        self.redo_stack.clear();
    }

    fn absorb(&mut self, changes: Vec<StyleChange>) {
        for change in changes {
            match self.batch_changes.iter_mut().find(|c| c.id == change.id) {
                Some(existing) => existing.after = change.after,
                None => self.batch_changes.push(change),
            }
        }
    }
}
