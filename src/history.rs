// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bounded linear undo over full-state snapshots.
//!
//! Every mutating operation saves the pre-mutation [`Sketch`] before applying
//! itself; a whole drag gesture collapses into a single save. Undo walks back
//! through the saved states. There is no redo: a save after an undo discards
//! the forward states.

use crate::model::Sketch;

/// Maximum number of retained snapshots, including the baseline slot.
pub const MAX_HISTORY_DEPTH: usize = 25;

/// Snapshot stack with a cursor at the conceptual "current" slot.
///
/// Index 0 is the state at construction time; it is never evicted by
/// truncation alone and undo never walks past it, so an empty baseline always
/// remains reachable.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Sketch>,
    cursor: usize,
}

impl History {
    pub fn new(initial: &Sketch) -> Self {
        Self {
            snapshots: vec![initial.clone()],
            cursor: 0,
        }
    }

    /// Number of retained snapshots.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Records `state` — the document as it is immediately *before* the
    /// mutation about to run. Forward snapshots beyond the cursor (left over
    /// from undos) are discarded first; when the stack would exceed
    /// [`MAX_HISTORY_DEPTH`] the oldest entry is evicted and the cursor slides
    /// down so relative position is preserved.
    pub fn save(&mut self, state: &Sketch) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(state.clone());
        self.cursor += 1;

        if self.snapshots.len() > MAX_HISTORY_DEPTH {
            self.snapshots.remove(0);
            self.cursor -= 1;
        }
    }

    /// Steps back one snapshot — an owned copy of the most recently saved
    /// pre-state — or `None` when already at the baseline. Callers surface
    /// the `None` case as a "nothing to undo" notice, not an error.
    pub fn undo(&mut self) -> Option<Sketch> {
        if self.cursor == 0 {
            return None;
        }
        let snapshot = self.snapshots[self.cursor].clone();
        self.cursor -= 1;
        Some(snapshot)
    }
}
