//! Interned identifiers for items and operators.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Reserved identifier for the per-agent time budget.
pub const TIME: &str = "time";

/// Item or tool identifier from the recipe catalog.
///
/// Cheap to clone; compares and hashes like the underlying string so maps keyed by `ItemId`
/// can be queried with `&str`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ItemId(Arc<str>);

impl ItemId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The reserved time identifier.
    pub fn time() -> Self {
        Self::new(TIME)
    }

    pub fn is_time(&self) -> bool {
        &*self.0 == TIME
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.0.to_string()
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Name of a compiled recipe operator: `op_` followed by the recipe name with spaces joined
/// by `_`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperatorName(Arc<str>);

impl OperatorName {
    pub const PREFIX: &'static str = "op_";

    pub fn for_recipe(recipe: &str) -> Self {
        Self(Arc::from(format!("{}{}", Self::PREFIX, recipe.replace(' ', "_"))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for OperatorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for OperatorName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for OperatorName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
