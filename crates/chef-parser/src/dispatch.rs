//! Instruction decoding helpers (spec §4.3): tokenizing a method statement
//! and extracting ingredient names and bowl/dish ordinals from it.
//!
//! These are pure functions over a token slice — no engine state — so the
//! vm crate can decode an instruction without owning a parser.

/// Tokenize a method statement on whitespace.
pub fn tokenize(statement: &str) -> Vec<&str> {
    statement.split_whitespace().collect()
}

/// Whether `tokens[start]` (if present) is "the"; advances past it.
fn skip_leading_the(tokens: &[&str], start: usize) -> usize {
    if tokens.get(start) == Some(&"the") {
        start + 1
    } else {
        start
    }
}

/// Join tokens from `start` up to (but excluding) the first occurrence of
/// `terminator`, or to the end of the list if absent or not found.
///
/// If `tokens[start]` is "the", it is skipped first.
pub fn extract_ingredient_name(tokens: &[&str], start: usize, terminator: Option<&str>) -> String {
    let start = skip_leading_the(tokens, start);
    if start >= tokens.len() {
        return String::new();
    }
    let end = terminator
        .and_then(|t| tokens[start..].iter().position(|&tok| tok == t))
        .map(|rel| start + rel)
        .unwrap_or(tokens.len());
    tokens[start..end].join(" ")
}

/// The outcome of scanning for a bowl/dish ordinal anchor: either the
/// anchor token was missing (or had nothing before it to read an ordinal
/// from), or an index was determined (defaulting to 1 when the preceding
/// token carries no ordinal suffix).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorIndex {
    Unspecified,
    Index(usize),
}

impl AnchorIndex {
    /// Operators that default to index 1 when no target was named.
    pub fn or_default_first(self) -> usize {
        match self {
            AnchorIndex::Unspecified => 1,
            AnchorIndex::Index(n) => n,
        }
    }

    /// Operators that must fail when no target was explicitly named.
    pub fn require(self) -> Option<usize> {
        match self {
            AnchorIndex::Unspecified => None,
            AnchorIndex::Index(n) => Some(n),
        }
    }
}

fn extract_anchor_index(tokens: &[&str], anchor: &str) -> AnchorIndex {
    let Some(anchor_pos) = tokens.iter().position(|&t| t == anchor) else {
        return AnchorIndex::Unspecified;
    };
    if anchor_pos == 0 {
        return AnchorIndex::Unspecified;
    }
    let ordinal_token = tokens[anchor_pos - 1];
    AnchorIndex::Index(parse_ordinal(ordinal_token).unwrap_or(1).max(1))
}

/// Strip a trailing `st`/`nd`/`rd`/`th` ordinal suffix and parse the
/// remaining digits. Returns `None` if the token carries no such suffix
/// (the caller then defaults the index to 1).
fn parse_ordinal(token: &str) -> Option<usize> {
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(digits) = token.strip_suffix(suffix) {
            if let Ok(n) = digits.parse::<usize>() {
                return Some(n);
            }
        }
    }
    None
}

/// Locate the "mixing" anchor and its preceding ordinal.
pub fn extract_mixing_bowl_index(tokens: &[&str]) -> AnchorIndex {
    extract_anchor_index(tokens, "mixing")
}

/// Locate the "baking" anchor and its preceding ordinal.
pub fn extract_baking_dish_index(tokens: &[&str]) -> AnchorIndex {
    extract_anchor_index(tokens, "baking")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_bowl_index() {
        let tokens = tokenize("Put sugar into the 2nd mixing bowl");
        assert_eq!(extract_mixing_bowl_index(&tokens), AnchorIndex::Index(2));
    }

    #[test]
    fn bare_mixing_bowl_defaults_to_one() {
        let tokens = tokenize("Put sugar into mixing bowl");
        assert_eq!(extract_mixing_bowl_index(&tokens), AnchorIndex::Index(1));
    }

    #[test]
    fn missing_anchor_is_unspecified() {
        let tokens = tokenize("Add sugar");
        assert_eq!(extract_mixing_bowl_index(&tokens), AnchorIndex::Unspecified);
    }

    #[test]
    fn anchor_at_token_zero_is_unspecified() {
        let tokens = vec!["mixing"];
        assert_eq!(extract_mixing_bowl_index(&tokens), AnchorIndex::Unspecified);
    }

    #[test]
    fn ingredient_name_skips_leading_the_and_stops_at_terminator() {
        let tokens = tokenize("Fold the egg whites into the mixing bowl");
        let name = extract_ingredient_name(&tokens[1..], 0, Some("into"));
        assert_eq!(name, "egg whites");
    }

    #[test]
    fn ingredient_name_without_terminator_runs_to_end() {
        let tokens = tokenize("Add dry ingredients");
        let name = extract_ingredient_name(&tokens[1..], 0, None);
        assert_eq!(name, "dry ingredients");
    }
}
