//! Ingredient line decoding (spec §4.2 "Ingredient decoding rules").

use chef_ast::{CellType, Ingredient};

use crate::ParseError;

/// Decode one ingredient-list line into its name and parsed ingredient.
pub fn decode_ingredient_line(line: &str, statement_index: usize) -> Result<(String, Ingredient), ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.is_empty() {
        return Err(ParseError::MalformedIngredientLine {
            line: line.to_string(),
            statement_index,
        });
    }

    if tokens.len() == 1 {
        return Ok((
            tokens[0].to_string(),
            Ingredient::new(None, CellType::Unspecified),
        ));
    }

    let value: i64 = tokens[0].parse().map_err(|_| ParseError::MalformedIngredientLine {
        line: line.to_string(),
        statement_index,
    })?;

    let (kind, start) = match tokens[1] {
        "heaped" | "level" => (CellType::Dry, 3),
        "g" | "kg" | "pinch" | "pinches" => (CellType::Dry, 2),
        "ml" | "l" | "dash" | "dashes" => (CellType::Liquid, 2),
        "cup" | "cups" | "teaspoon" | "teaspoons" | "tablespoon" | "tablespoons" => {
            (CellType::Unspecified, 2)
        }
        _ => (CellType::Unspecified, 1),
    };

    if start >= tokens.len() {
        return Err(ParseError::MalformedIngredientLine {
            line: line.to_string(),
            statement_index,
        });
    }

    let name = tokens[start..].join(" ");
    Ok((name, Ingredient::new(Some(value), kind)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_only_ingredient() {
        let (name, igr) = decode_ingredient_line("salt", 0).unwrap();
        assert_eq!(name, "salt");
        assert_eq!(igr.value, None);
        assert_eq!(igr.kind, CellType::Unspecified);
    }

    #[test]
    fn dry_unit_grams() {
        let (name, igr) = decode_ingredient_line("100 g flour", 0).unwrap();
        assert_eq!(name, "flour");
        assert_eq!(igr.value, Some(100));
        assert_eq!(igr.kind, CellType::Dry);
    }

    #[test]
    fn liquid_unit_ml() {
        let (name, igr) = decode_ingredient_line("250 ml milk", 0).unwrap();
        assert_eq!(name, "milk");
        assert_eq!(igr.value, Some(250));
        assert_eq!(igr.kind, CellType::Liquid);
    }

    #[test]
    fn heaped_measure_word_is_skipped() {
        let (name, igr) = decode_ingredient_line("2 heaped cups flour", 0).unwrap();
        assert_eq!(name, "flour");
        assert_eq!(igr.kind, CellType::Dry);
        assert_eq!(igr.value, Some(2));
    }

    #[test]
    fn unspecified_with_no_unit_multiword_name() {
        let (name, igr) = decode_ingredient_line("3 eggs yolks", 0).unwrap();
        assert_eq!(name, "eggs yolks");
        assert_eq!(igr.kind, CellType::Unspecified);
        assert_eq!(igr.value, Some(3));
    }

    #[test]
    fn malformed_value_is_rejected() {
        assert!(decode_ingredient_line("not-a-number flour", 5).is_err());
    }
}
