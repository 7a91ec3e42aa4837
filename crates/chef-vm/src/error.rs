//! Execution-stage faults (spec §7): reference, state, unsupported and
//! structural errors discovered while a recipe runs, each annotated with
//! the 1-based statement index at which the fault occurred.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChefError {
    #[error("{0}")]
    Parse(chef_parser::ParseError),

    #[error("statement {statement_index}: undefined ingredient {name:?}")]
    UndefinedIngredient { name: String, statement_index: usize },

    #[error("statement {statement_index}: ingredient {name:?} has no value")]
    UndefinedIngredientValue { name: String, statement_index: usize },

    #[error("statement {statement_index}: no mixing bowl named")]
    MissingMixingBowlAnchor { statement_index: usize },

    #[error("statement {statement_index}: no baking dish named")]
    MissingBakingDishAnchor { statement_index: usize },

    #[error("statement {statement_index}: mixing bowl {index} is empty")]
    EmptyMixingBowl { index: usize, statement_index: usize },

    #[error("statement {statement_index}: requested {requested} dishes but only {available} exist")]
    NotEnoughDishes {
        requested: usize,
        available: usize,
        statement_index: usize,
    },

    #[error("statement {statement_index}: unsupported verb {verb:?}")]
    Unsupported { verb: String, statement_index: usize },

    #[error("statement {statement_index}: loop header has no matching \"until\"")]
    NoMatchingUntil { statement_index: usize },

    #[error("statement {statement_index}: no recipe titled {title:?}")]
    UnknownSousChef { title: String, statement_index: usize },

    #[error("statement {statement_index}: sous-chef recursion limit ({limit}) exceeded")]
    RecursionLimit { limit: usize, statement_index: usize },

    #[error("statement {statement_index}: division by zero")]
    DivisionByZero { statement_index: usize },
}

impl From<chef_parser::ParseError> for ChefError {
    fn from(err: chef_parser::ParseError) -> Self {
        ChefError::Parse(err)
    }
}
