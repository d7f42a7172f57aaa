//! Name interning for joint and effector sets.

use hashbrown::HashMap;

use crate::{ImitationError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered set of unique names with O(1) name-to-index lookup.
///
/// Joint and effector sets are fixed per motion; interning their names once
/// lets frames store dense arrays indexed by the registry id instead of
/// re-keying string maps on every evaluation step.
///
/// # Example
///
/// ```
/// use mimic_types::NameRegistry;
///
/// let joints = NameRegistry::from_names(["hip", "knee", "ankle"]).expect("unique names");
/// assert_eq!(joints.len(), 3);
/// assert_eq!(joints.index_of("knee"), Some(1));
/// assert_eq!(joints.name(2), Some("ankle"));
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NameRegistry {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl NameRegistry {
    /// Build a registry from an ordered sequence of names.
    ///
    /// # Errors
    ///
    /// Returns [`ImitationError::DuplicateName`] if a name appears twice.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ImitationError::duplicate_name(name));
            }
        }
        Ok(Self { names, index })
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Index of a name, if registered.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name at an index, if in range.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Check whether a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over the names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl PartialEq for NameRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}
