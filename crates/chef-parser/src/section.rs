//! The section state machine (spec §4.2 state/transition table).

/// States of the per-recipe section state machine. Transitions are
/// table-driven in `parse_one`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    DiscoveringTitle,
    ReadingIngredients,
    IngredientsComplete,
    ReadingInstructions,
    Serving,
}
