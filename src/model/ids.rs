// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A stable identifier used across the model and the persistence surface.
///
/// Counter-derived ids like `node_7` are the common case, but loaded sketch
/// files may carry arbitrary id strings; the only enforced rule is that an id
/// is a non-empty string without `/` so it stays safe inside file paths and
/// status messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id_segment(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsSlash,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::ContainsSlash => f.write_str("id must not contain '/'"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_id_segment(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('/') {
        return Err(IdError::ContainsSlash);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrokeIdTag {}
pub type StrokeId = Id<StrokeIdTag>;

const NODE_ID_PREFIX: &str = "node_";
const STROKE_ID_PREFIX: &str = "stroke_";

impl Id<NodeIdTag> {
    /// Builds the canonical counter-derived id `node_<n>`.
    pub fn from_counter(counter: u64) -> Self {
        Self {
            value: format!("{NODE_ID_PREFIX}{counter}"),
            _marker: PhantomData,
        }
    }

    /// The numeric suffix of a `node_<n>` id, if this id follows the
    /// canonical form. Imported files may carry foreign ids; those return
    /// `None` and never influence the counter.
    pub fn counter_suffix(&self) -> Option<u64> {
        self.value.strip_prefix(NODE_ID_PREFIX)?.parse().ok()
    }
}

impl Id<StrokeIdTag> {
    pub fn from_counter(counter: u64) -> Self {
        Self {
            value: format!("{STROKE_ID_PREFIX}{counter}"),
            _marker: PhantomData,
        }
    }

    pub fn counter_suffix(&self) -> Option<u64> {
        self.value.strip_prefix(STROKE_ID_PREFIX)?.parse().ok()
    }
}
