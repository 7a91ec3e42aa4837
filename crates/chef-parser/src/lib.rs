//! # Chef Parser
//!
//! Walks a normalized statement list (as produced by `chef-lexer`),
//! extracting the title, ingredient table, and method statement range for
//! each recipe it finds, and exposes the pure instruction-decoding helpers
//! the dispatcher needs (spec §4.3). A source text may hold a main recipe
//! followed by one or more auxiliary (sous-chef) recipes; `parse_program`
//! walks the whole list and builds the title lookup `chef-vm` needs to
//! resolve `Serve with <title>`.

pub mod dispatch;
mod ingredient;
mod section;

pub use dispatch::{extract_baking_dish_index, extract_ingredient_name, extract_mixing_bowl_index, tokenize, AnchorIndex};

use chef_ast::Ingredient;
use indexmap::IndexMap;
use section::SectionState;
use thiserror::Error;

/// Parse-stage faults: malformed input discovered before any statement is
/// ever dispatched to the execution engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("statement {statement_index}: malformed ingredient line {line:?}")]
    MalformedIngredientLine { line: String, statement_index: usize },

    #[error("statement {statement_index}: expected an \"Ingredients\" section")]
    MissingIngredientsSection { statement_index: usize },

    #[error("statement {statement_index}: recipe has no title")]
    MissingTitle { statement_index: usize },

    #[error("statement {statement_index}: expected a \"Method\" section")]
    MissingMethodSection { statement_index: usize },

    #[error("statement {statement_index}: expected a \"Serves N\" statement")]
    MissingServesSection { statement_index: usize },

    #[error("statement {statement_index}: invalid \"Serves\" argument {text:?}")]
    InvalidServesArgument { statement_index: usize, text: String },

    #[error("recipe source contained no statements")]
    EmptyProgram,
}

/// One parsed recipe: title, ingredient table, and the statement ranges
/// that bound its method body and its closing `Serves N`.
#[derive(Debug, Clone)]
pub struct ParsedRecipe {
    pub title: String,
    /// Insertion-ordered so `dry ingredients` aggregation (chef-vm's
    /// `Add`) can iterate in declaration order, per spec §9.
    pub ingredients: IndexMap<String, Ingredient>,
    /// Index of the first method statement.
    pub method_start: usize,
    /// Exclusive end of the method body (index of the blank sentinel
    /// before `Serves`).
    pub method_end: usize,
    pub serves_pc: usize,
    pub serves_n: usize,
}

/// The full parsed program: the shared statement list plus every recipe
/// found in it, keyed by lowercase title. The first recipe encountered is
/// the main recipe.
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<String>,
    pub recipes: IndexMap<String, ParsedRecipe>,
}

impl Program {
    /// The main recipe: the first one declared in source order.
    pub fn main(&self) -> &ParsedRecipe {
        self.recipes
            .get_index(0)
            .map(|(_, recipe)| recipe)
            .expect("parse_program never returns an empty recipe map")
    }

    pub fn find(&self, title: &str) -> Option<&ParsedRecipe> {
        self.recipes.get(&title.to_lowercase())
    }
}

/// Parse every recipe in `statements`, main recipe first.
pub fn parse_program(statements: &[String]) -> Result<Program, ParseError> {
    let mut recipes = IndexMap::new();
    let mut idx = 0;

    while idx < statements.len() {
        while idx < statements.len() && statements[idx].is_empty() {
            idx += 1;
        }
        if idx >= statements.len() {
            break;
        }
        let (recipe, next_idx) = parse_one(statements, idx)?;
        tracing::debug!(title = %recipe.title, method_start = recipe.method_start, method_end = recipe.method_end, "parsed recipe");
        recipes.insert(recipe.title.to_lowercase(), recipe);
        idx = next_idx;
    }

    if recipes.is_empty() {
        return Err(ParseError::EmptyProgram);
    }

    Ok(Program {
        statements: statements.to_vec(),
        recipes,
    })
}

/// Parse a single recipe starting at `start`, returning it plus the index
/// immediately after its `Serves N` statement.
fn parse_one(statements: &[String], start: usize) -> Result<(ParsedRecipe, usize), ParseError> {
    let mut state = SectionState::DiscoveringTitle;
    let mut title: Option<String> = None;
    let mut ingredients: IndexMap<String, Ingredient> = IndexMap::new();
    let mut method_start = 0;
    let mut method_end = 0;
    let mut idx = start;

    while idx < statements.len() {
        let stmt = statements[idx].as_str();

        match state {
            SectionState::DiscoveringTitle => {
                if stmt.is_empty() {
                    idx += 1;
                } else if stmt == "Ingredients" {
                    state = SectionState::ReadingIngredients;
                    idx += 1;
                } else {
                    title = Some(stmt.trim_end_matches('.').to_string());
                    idx += 1;
                }
            }
            SectionState::ReadingIngredients => {
                if stmt.is_empty() {
                    state = SectionState::IngredientsComplete;
                } else {
                    let (name, ingredient) = ingredient::decode_ingredient_line(stmt, idx)?;
                    ingredients.insert(name, ingredient);
                }
                idx += 1;
            }
            SectionState::IngredientsComplete => {
                if stmt.is_empty() {
                    idx += 1;
                } else if stmt == "Method" {
                    method_start = idx + 1;
                    state = SectionState::ReadingInstructions;
                    idx += 1;
                } else {
                    return Err(ParseError::MissingMethodSection { statement_index: idx });
                }
            }
            SectionState::ReadingInstructions => {
                if stmt.is_empty() {
                    method_end = idx;
                    state = SectionState::Serving;
                }
                idx += 1;
            }
            SectionState::Serving => {
                if stmt.is_empty() {
                    idx += 1;
                    continue;
                }
                if let Some(rest) = stmt.strip_prefix("Serves ") {
                    let n: usize = rest.trim().parse().map_err(|_| ParseError::InvalidServesArgument {
                        statement_index: idx,
                        text: stmt.to_string(),
                    })?;
                    let recipe = ParsedRecipe {
                        title: title.ok_or(ParseError::MissingTitle { statement_index: idx })?,
                        ingredients,
                        method_start,
                        method_end,
                        serves_pc: idx,
                        serves_n: n,
                    };
                    return Ok((recipe, idx + 1));
                }
                return Err(ParseError::MissingServesSection { statement_index: idx });
            }
        }
    }

    Err(match state {
        SectionState::DiscoveringTitle | SectionState::ReadingIngredients => {
            ParseError::MissingIngredientsSection { statement_index: idx }
        }
        SectionState::IngredientsComplete | SectionState::ReadingInstructions => {
            ParseError::MissingMethodSection { statement_index: idx }
        }
        SectionState::Serving => ParseError::MissingServesSection { statement_index: idx },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chef_ast::CellType;

    fn lines(text: &str) -> Vec<String> {
        chef_lexer_normalize(text)
    }

    // Avoids a dev-dependency on chef-lexer just for tests: the normalizer
    // rule is simple enough to inline for these unit tests, and the
    // integration tests in chef-vm exercise the real lexer end to end.
    fn chef_lexer_normalize(source: &str) -> Vec<String> {
        let mut out = Vec::new();
        for raw_line in source.split(['\n', '\r']) {
            let line = raw_line.trim();
            if line.is_empty() {
                out.push(String::new());
                continue;
            }
            for segment in line.split('.').map(str::trim).filter(|s| !s.is_empty()) {
                out.push(segment.to_string());
            }
        }
        out
    }

    #[test]
    fn parses_minimal_recipe() {
        let statements = lines(
            "Hello World Souffle.\n\nIngredients.\n72 g H\n\nMethod.\nPut H into 1st mixing bowl.\n\nServes 1.",
        );
        let program = parse_program(&statements).unwrap();
        let main = program.main();
        assert_eq!(main.title, "Hello World Souffle");
        assert_eq!(main.serves_n, 1);
        assert_eq!(main.ingredients.get("H").unwrap().value, Some(72));
        assert_eq!(main.ingredients.get("H").unwrap().kind, CellType::Dry);
    }

    #[test]
    fn finds_auxiliary_recipe_by_title() {
        let statements = lines(
            "Main.\n\nIngredients.\n1 g a\n\nMethod.\nServe with Sauce.\n\nServes 1.\n\nSauce.\n\nIngredients.\n2 g b\n\nMethod.\nRefrigerate.\n\nServes 1.",
        );
        let program = parse_program(&statements).unwrap();
        assert_eq!(program.main().title, "Main");
        let aux = program.find("sauce").expect("sous-chef recipe found by lowercase title");
        assert_eq!(aux.title, "Sauce");
    }

    #[test]
    fn missing_method_section_is_reported() {
        let statements = lines("Title.\n\nIngredients.\n1 g a\n\nServes 1.");
        let err = parse_program(&statements).unwrap_err();
        assert!(matches!(err, ParseError::MissingMethodSection { .. }));
    }

    #[test]
    fn malformed_ingredient_line_is_reported() {
        let statements = lines("Title.\n\nIngredients.\nnope flour\n\nMethod.\n\nServes 1.");
        let err = parse_program(&statements).unwrap_err();
        assert!(matches!(err, ParseError::MalformedIngredientLine { .. }));
    }
}
