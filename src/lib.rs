// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galatea — a terminal supply-chain diagram editor.
//!
//! Material and activity nodes, alternating-kind connections, freehand
//! annotation, bounded undo, JSON persistence, and a natural-language
//! diagram generator, behind a ratatui shell.

pub mod editor;
pub mod generate;
pub mod history;
pub mod model;
pub mod ops;
pub mod render;
pub mod store;
pub mod tui;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
