use std::{collections::HashMap, sync::Arc};

use crate::{ast::{Expression, SelectionItem}, graph::{FetchParent, NavigablePath}};

pub type SelectionMap = HashMap<Expression, Arc<SelectionItem>>;

/// Scope within which equal expressions collapse to one selection item.
///
/// Picked per resolution from the frame's flag and the optional fetch
/// parent: flat deduplication wins whenever it is enabled, otherwise a
/// fetch parent scopes deduplication to its root, otherwise nothing is
/// deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionDeduplication {
    Flat,
    FetchRoot(NavigablePath),
    Off,
}

impl SelectionDeduplication {
    pub fn select(deduplicate_selection_items: bool, fetch_parent: Option<&FetchParent>) -> Self {
        if deduplicate_selection_items {
            SelectionDeduplication::Flat
        } else if let Some(fetch_parent) = fetch_parent {
            SelectionDeduplication::FetchRoot(fetch_parent.root().navigable_path().clone())
        } else {
            SelectionDeduplication::Off
        }
    }
}

#[derive(Debug)]
enum SelectionTable {
    Flat(SelectionMap),
    PerFetchRoot(HashMap<NavigablePath, SelectionMap>),
}

/// Deduplication tables of one query part, created on first use and only
/// ever grown.
#[derive(Debug, Default)]
pub struct SelectionCache {
    table: Option<SelectionTable>,
}

impl SelectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map that `deduplication` reads and writes, creating it on demand.
    /// `None` when nothing is deduplicated.
    ///
    /// A frame's flag never changes, so one cache only ever sees flat or
    /// only fetch-root requests; mixing them is a caller bug.
    pub fn selection_map(&mut self, deduplication: &SelectionDeduplication) -> Option<&mut SelectionMap> {
        match deduplication {
            SelectionDeduplication::Off => None,
            SelectionDeduplication::Flat => {
                match self.table.get_or_insert_with(|| SelectionTable::Flat(HashMap::new())) {
                    SelectionTable::Flat(map) => Some(map),
                    SelectionTable::PerFetchRoot(_) => panic!("flat deduplication requested on a fetch-scoped selection cache"),
                }
            }
            SelectionDeduplication::FetchRoot(root) => {
                match self.table.get_or_insert_with(|| SelectionTable::PerFetchRoot(HashMap::new())) {
                    SelectionTable::PerFetchRoot(roots) => Some(roots.entry(root.clone()).or_default()),
                    SelectionTable::Flat(_) => panic!("fetch-root deduplication requested on a flat selection cache"),
                }
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.table.is_some()
    }

    /// Number of fetch roots with their own table; 0 for flat or unused caches.
    pub fn fetch_root_count(&self) -> usize {
        match &self.table {
            Some(SelectionTable::PerFetchRoot(roots)) => roots.len(),
            _ => 0,
        }
    }
}
