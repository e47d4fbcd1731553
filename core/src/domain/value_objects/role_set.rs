//! Canonical set of role names.
//!
//! Role claims arrive either as a single string or as a list. Both shapes
//! collapse into a [`RoleSet`] during deserialization so nothing downstream
//! branches on the representation.

use std::collections::btree_set::{self, BTreeSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    /// Adds a role; blank names are ignored
    pub fn insert(&mut self, role: impl Into<String>) -> bool {
        let role = role.into();
        let role = role.trim();
        if role.is_empty() {
            return false;
        }
        self.0.insert(role.to_string())
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }

    /// True when both sets share at least one role
    pub fn intersects(&self, other: &RoleSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// True when every role of `other` is present here
    pub fn is_superset_of(&self, other: &RoleSet) -> bool {
        self.0.is_superset(&other.0)
    }
}

impl<S: Into<String>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = RoleSet::new();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl From<&str> for RoleSet {
    fn from(role: &str) -> Self {
        std::iter::once(role).collect()
    }
}

impl From<String> for RoleSet {
    fn from(role: String) -> Self {
        std::iter::once(role).collect()
    }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for role in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(role)?;
            first = false;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::One(role) => RoleSet::from(role),
            Repr::Many(roles) => roles.into_iter().collect(),
        })
    }
}
