use std::fmt;

/// Path from a query root through attribute navigations, e.g.
/// `Person(p).orders.items`.
///
/// Paths are unique within one query, so they double as identity for
/// fetch nodes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NavigablePath {
    root: String,
    alias: Option<String>,
    segments: Vec<String>,
}

impl NavigablePath {
    pub fn root(entity_name: impl Into<String>, alias: Option<String>) -> Self {
        Self { root: entity_name.into(), alias, segments: Vec::new() }
    }

    pub fn append(&self, attribute: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(attribute.into());
        Self { root: self.root.clone(), alias: self.alias.clone(), segments }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self { root: self.root.clone(), alias: self.alias.clone(), segments })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn local_name(&self) -> &str {
        self.segments.last().unwrap_or(&self.root)
    }

    pub fn full_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NavigablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        if let Some(alias) = &self.alias {
            write!(f, "({})", alias)?;
        }
        for segment in &self.segments {
            write!(f, ".{}", segment)?;
        }
        Ok(())
    }
}

impl fmt::Debug for NavigablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NavigablePath({})", self)
    }
}
