//! Module dependencies and the path-to-dependency resolver.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A Go module the reported binary was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dependency {
    /// Module path, unique within a report.
    pub path: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum: Option<String>,
    /// Module this one was replaced with by a `replace` directive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<Box<Dependency>>,
    #[serde(default)]
    pub is_main: bool,
}

impl Dependency {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            sum: None,
            replace: None,
            is_main: false,
        }
    }

    /// The module whose sources were actually compiled in.
    pub fn effective(&self) -> &Dependency {
        match &self.replace {
            Some(replacement) => replacement,
            None => self,
        }
    }
}

/// Whether `path` is a suffix of `dir` starting at a segment boundary.
pub(crate) fn is_path_suffix(dir: &str, path: &str) -> bool {
    let dir = dir.trim_end_matches('/');
    let path = path.trim_end_matches('/');
    if path.is_empty() || !dir.ends_with(path) {
        return false;
    }
    let rest = &dir[..dir.len() - path.len()];
    rest.is_empty() || rest.ends_with('/') || path.starts_with('/')
}

/// Lookup from module path to dependency metadata.
///
/// Entries keep insertion order. The main module is inserted last and
/// replaces any dependency with the same path in place.
#[derive(Debug, Clone, Default)]
pub struct DependencyResolver {
    deps: Vec<Arc<Dependency>>,
    index: HashMap<String, usize>,
}

impl DependencyResolver {
    pub fn new(deps: impl IntoIterator<Item = Dependency>, main: Dependency) -> Self {
        let mut resolver = Self::default();
        for dep in deps {
            resolver.insert(dep);
        }
        resolver.insert(Dependency {
            is_main: true,
            ..main
        });
        resolver
    }

    fn insert(&mut self, dep: Dependency) {
        let dep = Arc::new(dep);
        match self.index.get(&dep.path) {
            Some(&slot) => self.deps[slot] = dep,
            None => {
                self.index.insert(dep.path.clone(), self.deps.len());
                self.deps.push(dep);
            }
        }
    }

    /// Exact lookup by module path.
    pub fn get(&self, path: &str) -> Option<&Arc<Dependency>> {
        self.index.get(path).map(|&slot| &self.deps[slot])
    }

    /// The dependency owning `dir`: the last one, in insertion order, whose
    /// path is a segment-aligned suffix of `dir`.
    pub fn find(&self, dir: &str) -> Option<&Arc<Dependency>> {
        self.deps
            .iter()
            .filter(|dep| is_path_suffix(dir, &dep.path))
            .last()
    }

    pub fn main(&self) -> Option<&Arc<Dependency>> {
        self.deps.iter().find(|dep| dep.is_main)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Dependency>> {
        self.deps.iter()
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }
}
