//! Pure operations over ordered, id-keyed collections.
//!
//! Each function takes the current slice and returns the next sequence; the
//! input is never modified. Targeting an id that isn't present returns an
//! unchanged copy.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};

use crate::model::entry::{Entry, Patch, Prioritized};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(anyhow!("Unknown direction: {}", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// New entries go to the head of the list. An entry whose id is already
/// present is not added.
pub fn insert<T: Entry>(items: &[T], entry: T) -> Vec<T> {
    if contains(items, entry.id()) {
        return items.to_vec();
    }
    let mut next = Vec::with_capacity(items.len() + 1);
    next.push(entry);
    next.extend_from_slice(items);
    next
}

/// Appends at the tail; used where entries follow time order. Duplicate ids
/// are skipped as in [`insert`].
pub fn append<T: Entry>(items: &[T], entry: T) -> Vec<T> {
    let mut next = items.to_vec();
    if !contains(items, entry.id()) {
        next.push(entry);
    }
    next
}

pub fn contains<T: Entry>(items: &[T], id: &str) -> bool {
    items.iter().any(|item| item.id() == id)
}

pub fn patch<T, P>(items: &[T], id: &str, patch: &P) -> Vec<T>
where
    T: Entry,
    P: Patch<T>,
{
    items
        .iter()
        .map(|item| {
            if item.id() == id {
                let mut updated = item.clone();
                patch.apply_to(&mut updated);
                updated
            } else {
                item.clone()
            }
        })
        .collect()
}

pub fn remove<T: Entry>(items: &[T], id: &str) -> Vec<T> {
    items.iter().filter(|item| item.id() != id).cloned().collect()
}

/// Swaps the entry with its neighbour. Priorities are left alone.
pub fn move_adjacent<T: Entry>(items: &[T], id: &str, direction: Direction) -> Vec<T> {
    let mut next = items.to_vec();
    let Some(idx) = items.iter().position(|item| item.id() == id) else {
        return next;
    };
    let swap_with = match direction {
        Direction::Up if idx > 0 => idx - 1,
        Direction::Down if idx + 1 < items.len() => idx + 1,
        _ => return next,
    };
    next.swap(idx, swap_with);
    next
}

/// Stable ascending sort; equal priorities keep their relative order.
pub fn sort_by_priority<T: Prioritized>(items: &[T]) -> Vec<T> {
    let mut next = items.to_vec();
    next.sort_by_key(|item| item.priority());
    next
}
