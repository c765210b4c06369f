//! Card layout validation.

use std::collections::HashSet;

use serde_json::Value as JsonValue;

use crate::domain::lines::CELL_COUNT;
use crate::errors::domain::{DomainError, ValidationKind};

/// Decode a stored card layout into 25 distinct numbers, row-major.
///
/// Cards are produced by an external generator; a malformed layout fails
/// fast here, before any mask is built.
pub fn card_cells(raw: &JsonValue) -> Result<[i32; CELL_COUNT], DomainError> {
    let invalid = |detail: String| DomainError::validation(ValidationKind::InvalidCardShape, detail);

    let values = raw
        .as_array()
        .ok_or_else(|| invalid("card cells must be a JSON array".to_string()))?;
    if values.len() != CELL_COUNT {
        return Err(invalid(format!(
            "card must have {CELL_COUNT} cells, got {}",
            values.len()
        )));
    }

    let mut cells = [0i32; CELL_COUNT];
    let mut seen = HashSet::with_capacity(CELL_COUNT);
    for (i, v) in values.iter().enumerate() {
        let n = v
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| invalid(format!("cell {i} is not an integer")))?;
        if !seen.insert(n) {
            return Err(invalid(format!("duplicate number {n} on card")));
        }
        cells[i] = n;
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_25_distinct_numbers() {
        let raw = json!((1..=25).collect::<Vec<i32>>());
        let cells = card_cells(&raw).unwrap();
        assert_eq!(cells[0], 1);
        assert_eq!(cells[24], 25);
    }

    #[test]
    fn rejects_wrong_length() {
        let raw = json!([1, 2, 3]);
        assert!(matches!(
            card_cells(&raw),
            Err(DomainError::Validation(ValidationKind::InvalidCardShape, _))
        ));
    }

    #[test]
    fn rejects_duplicates() {
        let mut nums: Vec<i32> = (1..=24).collect();
        nums.push(7);
        assert!(card_cells(&json!(nums)).is_err());
    }

    #[test]
    fn rejects_non_integers() {
        let mut vals: Vec<serde_json::Value> = (1..=24).map(|n| json!(n)).collect();
        vals.push(json!("x"));
        assert!(card_cells(&json!(vals)).is_err());
    }
}
