use std::{fmt, hash::{Hash, Hasher}, sync::Arc};

use crate::graph::NavigablePath;

/// Node of a fetched object graph: a query root (entity result) or a
/// joined fetch below one.
///
/// Identity is the navigable path; the parent link is only used to find
/// the top-most root.
#[derive(Clone)]
pub struct FetchParent {
    navigable_path: NavigablePath,
    parent: Option<Arc<FetchParent>>,
}

impl FetchParent {
    pub fn new_root(navigable_path: NavigablePath) -> Arc<Self> {
        Arc::new(Self { navigable_path, parent: None })
    }

    /// Fetch of `attribute` joined below `parent`.
    pub fn fetch(parent: &Arc<FetchParent>, attribute: &str) -> Arc<Self> {
        Arc::new(Self {
            navigable_path: parent.navigable_path.append(attribute),
            parent: Some(Arc::clone(parent)),
        })
    }

    pub fn navigable_path(&self) -> &NavigablePath {
        &self.navigable_path
    }

    pub fn parent(&self) -> Option<&Arc<FetchParent>> {
        self.parent.as_ref()
    }

    /// Top-most fetch parent of this subtree (itself for a root).
    pub fn root(&self) -> &FetchParent {
        let mut current = self;
        while let Some(parent) = &current.parent {
            current = parent;
        }
        current
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(parent) = &current.parent {
            depth += 1;
            current = parent;
        }
        depth
    }
}

impl PartialEq for FetchParent {
    fn eq(&self, other: &Self) -> bool {
        self.navigable_path == other.navigable_path
    }
}

impl Eq for FetchParent {}

impl Hash for FetchParent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.navigable_path.hash(state);
    }
}

impl fmt::Debug for FetchParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FetchParent({})", self.navigable_path)
    }
}
