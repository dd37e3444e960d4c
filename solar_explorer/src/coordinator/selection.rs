//! Two-slot body selection used to compare a pair of bodies.

use std::collections::VecDeque;

pub const MAX_SELECTION: usize = 2;

/// Ordered selection; front is the oldest pick. Never holds more than
/// [`MAX_SELECTION`] names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    names: VecDeque<String>,
}

/// What a toggle did to the selection.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionChange {
    Removed(String),
    Added {
        name: String,
        evicted: Option<String>,
    },
}

impl Selection {
    /// Removes `name` if present, otherwise appends it, evicting the oldest
    /// pick when full.
    pub fn toggle(&mut self, name: &str) -> SelectionChange {
        if let Some(index) = self.names.iter().position(|n| n == name) {
            let removed = self.names.remove(index).unwrap_or_else(|| name.to_string());
            return SelectionChange::Removed(removed);
        }

        let evicted = if self.names.len() >= MAX_SELECTION {
            self.names.pop_front()
        } else {
            None
        };
        self.names.push_back(name.to_string());
        SelectionChange::Added {
            name: name.to_string(),
            evicted,
        }
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Names in selection order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.names.front().map(String::as_str)
    }

    /// Both picks, oldest first, once two bodies are selected.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.names.front(), self.names.get(1)) {
            (Some(a), Some(b)) => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }
}
