// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The set of queues a worker polls.

use std::fmt;
use std::str::FromStr;

/// Token meaning "every queue the store currently knows about".
pub const WILDCARD: &str = "*";

/// Queues a worker polls, in priority order.
///
/// `All` is resolved against the store's queue set on every reservation
/// attempt, so queues created after the worker started are picked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueueList {
    All,
    Named(Vec<String>),
}

impl QueueList {
    /// Build a list from names. Any `*` entry turns the whole list into
    /// [`QueueList::All`]; blank names are dropped.
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Vec::new();
        for name in names {
            let name: String = name.into();
            let name = name.trim();
            if name == WILDCARD {
                return Self::All;
            }
            if !name.is_empty() {
                out.push(name.to_string());
            }
        }
        Self::Named(out)
    }

    /// Parse the comma-joined form used inside worker identities.
    pub fn parse(s: &str) -> Self {
        Self::named(s.split(','))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Fixed names, or `None` for the wildcard.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Self::All => None,
            Self::Named(names) => Some(names),
        }
    }
}

impl fmt::Display for QueueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(WILDCARD),
            Self::Named(names) => f.write_str(&names.join(",")),
        }
    }
}

impl FromStr for QueueList {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
