//! # Chef AST
//!
//! Shared data model for the Chef recipe interpreter. Every downstream
//! crate (lexer, parser, vm) builds on the types defined here: the cell
//! shape shared by mixing bowls and baking dishes, the ingredient table
//! entry, loop frames, and the normalized recipe program.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The type tag that governs how a cell renders at serve time.
///
/// Inferred from the unit token on an ingredient's declaration line, and
/// propagated to any cell derived from that ingredient's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellType {
    Dry,
    Liquid,
    Unspecified,
}

/// A single value/type cell, the unit of storage in a mixing bowl or
/// baking dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: i64,
    pub kind: CellType,
}

impl Cell {
    pub fn new(value: i64, kind: CellType) -> Self {
        Self { value, kind }
    }
}

/// A named quantity with an optional value and an inferred type tag.
///
/// Declared without a number, `value` is `None`; such an ingredient is
/// fatal to read until a `Fold` assigns it a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub value: Option<i64>,
    pub kind: CellType,
}

impl Ingredient {
    pub fn new(value: Option<i64>, kind: CellType) -> Self {
        Self { value, kind }
    }
}

/// An ordered stack of cells — the common shape of mixing bowls and
/// baking dishes. Indexed 1-based at the interpreter surface; storage is
/// plain 0-based `Vec` offsets internally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack(pub Vec<Cell>);

impl Stack {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, cell: Cell) {
        self.0.push(cell);
    }

    pub fn pop(&mut self) -> Option<Cell> {
        self.0.pop()
    }

    pub fn top(&self) -> Option<&Cell> {
        self.0.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Cell> {
        self.0.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Roll the top cell down by `n` positions: pop it, then insert it at
    /// `max(0, len - n)`. Used by `Stir ... for N minutes`.
    pub fn roll_top_down(&mut self, n: i64) {
        let Some(cell) = self.0.pop() else { return };
        let len = self.0.len();
        let n = n.max(0) as usize;
        let at = len.saturating_sub(n);
        self.0.insert(at, cell);
    }

    /// Mark every cell as liquid. Idempotent.
    pub fn liquefy(&mut self) {
        for cell in &mut self.0 {
            cell.kind = CellType::Liquid;
        }
    }
}

/// A pending loop, pushed at the loop-header statement and popped when the
/// guard ingredient reaches zero or `force_exit` fires.
#[derive(Debug, Clone)]
pub struct LoopFrame {
    /// Index of the loop-header statement.
    pub start_pc: usize,
    /// Index of the `Verb ... until verbed` back-edge statement.
    pub end_pc: usize,
    /// Ingredient checked at the back-edge; loop exits when its value <= 0.
    pub guard: String,
    /// Ingredient decremented once per iteration, if the `until` clause
    /// named one.
    pub decrement: Option<String>,
    /// Set by `Set aside`; causes the next back-edge check to exit early.
    pub force_exit: bool,
}

/// The normalized statement list plus a lookup from lowercase recipe
/// title to the index of that recipe's first statement, used to resolve
/// `Serve with <title>` sous-chef invocations.
#[derive(Debug, Clone, Default)]
pub struct RecipeProgram {
    pub statements: Vec<String>,
    pub titles: HashMap<String, usize>,
}

impl RecipeProgram {
    pub fn new(statements: Vec<String>, titles: HashMap<String, usize>) -> Self {
        Self { statements, titles }
    }

    pub fn statement(&self, pc: usize) -> Option<&str> {
        self.statements.get(pc).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_top_down_caps_at_zero() {
        let mut s = Stack::new();
        for v in [1, 2, 3] {
            s.push(Cell::new(v, CellType::Dry));
        }
        s.roll_top_down(10);
        assert_eq!(s.0[0].value, 3);
    }

    #[test]
    fn liquefy_is_idempotent() {
        let mut s = Stack::new();
        s.push(Cell::new(1, CellType::Dry));
        s.liquefy();
        s.liquefy();
        assert!(s.0.iter().all(|c| c.kind == CellType::Liquid));
    }
}
