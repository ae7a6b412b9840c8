use crate::id::{ItemId, OperatorName};

/// A catalog that cannot be compiled into a planning domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("recipe `{recipe}` has no Produces entry")]
    NoProduct { recipe: String },

    #[error("recipe `{recipe}` references undeclared item `{item}`")]
    UnknownItem { recipe: String, item: ItemId },

    #[error("goal item `{item}` is not declared in Items, Tools or Initial")]
    UnknownGoalItem { item: ItemId },

    #[error("`{item}` is reserved for the time budget and cannot be declared as an item")]
    ReservedIdentifier { item: ItemId },

    #[error("recipe `{recipe}` has negative amount {amount} for `{item}`")]
    NegativeAmount {
        recipe: String,
        item: ItemId,
        amount: i64,
    },

    #[error("goal asks for a negative amount {amount} of `{item}`")]
    NegativeGoal { item: ItemId, amount: i64 },

    #[error("recipe `{recipe}` has negative time {time}")]
    NegativeTime { recipe: String, time: i64 },

    #[error("recipes `{first}` and `{second}` both compile to operator `{operator}`")]
    DuplicateOperator {
        operator: OperatorName,
        first: String,
        second: String,
    },
}

/// Invalid access to a [`crate::CraftState`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("`{item}` is not tracked by this state")]
    UnknownItem { item: String },

    #[error("agent {agent} has no inventory in this state")]
    UnknownAgent { agent: String },
}
