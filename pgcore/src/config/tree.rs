//! Configuration tree and override merging.

use std::collections::BTreeMap;

/// Separator between path segments (`Section.Key`).
const PATH_SEPARATOR: char = '.';

/// A value in a [`ConfigTree`]: either a scalar or a nested subsection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNode {
    /// A leaf string value.
    Value(String),
    /// A nested subsection.
    Section(ConfigTree),
}

/// Hierarchical key/value configuration.
///
/// Keys are case-insensitive and stored folded to lowercase, matching how
/// the engine treats INI section and key names. Paths address nested
/// subsections with `.` (`Archive.sResourceArchiveList`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTree {
    entries: BTreeMap<String, ConfigNode>,
}

impl ConfigTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of direct entries (values and subsections).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a scalar value by dotted path.
    ///
    /// Returns `None` if any segment is missing or the path ends at a
    /// subsection.
    pub fn get(&self, path: &str) -> Option<&str> {
        match self.node(path)? {
            ConfigNode::Value(v) => Some(v.as_str()),
            ConfigNode::Section(_) => None,
        }
    }

    /// Look up a subsection by dotted path.
    pub fn section(&self, path: &str) -> Option<&ConfigTree> {
        match self.node(path)? {
            ConfigNode::Section(tree) => Some(tree),
            ConfigNode::Value(_) => None,
        }
    }

    /// Look up any node by dotted path.
    pub fn node(&self, path: &str) -> Option<&ConfigNode> {
        let mut segments = path.split(PATH_SEPARATOR);
        let first = segments.next()?;
        let mut node = self.entries.get(&fold(first))?;

        for segment in segments {
            match node {
                ConfigNode::Section(tree) => node = tree.entries.get(&fold(segment))?,
                ConfigNode::Value(_) => return None,
            }
        }

        Some(node)
    }

    /// Set a scalar value at a dotted path, creating subsections as needed.
    ///
    /// A scalar standing where a subsection is required is replaced.
    pub fn set(&mut self, path: &str, value: impl Into<String>) {
        let (parents, leaf) = match path.rsplit_once(PATH_SEPARATOR) {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, path),
        };

        let tree = match parents {
            Some(parents) => self.section_mut(parents),
            None => self,
        };
        tree.entries
            .insert(fold(leaf), ConfigNode::Value(value.into()));
    }

    /// Get or create the subsection at a dotted path.
    pub fn section_mut(&mut self, path: &str) -> &mut ConfigTree {
        let mut tree = self;
        for segment in path.split(PATH_SEPARATOR) {
            tree = tree.child_section_mut(segment);
        }
        tree
    }

    /// Iterate over direct entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over every scalar as `(dotted path, value)`, depth first.
    pub fn flatten(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);
        out
    }

    /// Merge `overrides` into this tree, override values winning.
    ///
    /// For every key in `overrides`: a subsection is merged recursively into
    /// the same-named subsection here (created if absent, replacing a scalar
    /// if one stands there); a scalar overwrites whatever is here. `overrides`
    /// is not modified.
    ///
    /// Returns `self` for chaining, so `base.merge(&custom)` yields the
    /// effective configuration.
    pub fn merge(&mut self, overrides: &ConfigTree) -> &mut Self {
        for (key, node) in &overrides.entries {
            match node {
                ConfigNode::Section(sub) => {
                    self.child_section_mut(key).merge(sub);
                }
                ConfigNode::Value(v) => {
                    self.entries.insert(key.clone(), ConfigNode::Value(v.clone()));
                }
            }
        }
        self
    }

    fn child_section_mut(&mut self, key: &str) -> &mut ConfigTree {
        let node = self
            .entries
            .entry(fold(key))
            .or_insert_with(|| ConfigNode::Section(ConfigTree::new()));

        if let ConfigNode::Value(_) = node {
            *node = ConfigNode::Section(ConfigTree::new());
        }

        match node {
            ConfigNode::Section(tree) => tree,
            ConfigNode::Value(_) => unreachable!("scalar replaced by section above"),
        }
    }

    fn flatten_into<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a str)>) {
        for (key, node) in &self.entries {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}{}{}", prefix, PATH_SEPARATOR, key)
            };
            match node {
                ConfigNode::Value(v) => out.push((path, v.as_str())),
                ConfigNode::Section(sub) => sub.flatten_into(&path, out),
            }
        }
    }
}

fn fold(key: &str) -> String {
    key.trim().to_lowercase()
}
