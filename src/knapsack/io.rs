//! Knapsack instance lines and result lines.
//!
//! Instance line: `id item_count max_weight w1 p1 ... wn pn`.
//! Result line: `id item_count best_price b1 ... bn`.

use super::types::{Item, KnapsackInstance, Selection};
use crate::error::{Error, Result};
use std::fmt::Write;

/// Parses every non-blank line of `text` as one instance.
pub fn parse_instances(text: &str) -> Result<Vec<KnapsackInstance>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_line(line, index + 1))
        .collect()
}

/// Parses one instance line. `line_no` is 1-based and only used in errors.
pub fn parse_line(line: &str, line_no: usize) -> Result<KnapsackInstance> {
    let numbers = line
        .split_whitespace()
        .map(|token| {
            token.parse::<u64>().map_err(|_| {
                Error::parse(
                    line_no,
                    format!("expected a non-negative integer, got '{token}'"),
                )
            })
        })
        .collect::<Result<Vec<u64>>>()?;

    if numbers.len() < 3 {
        return Err(Error::parse(
            line_no,
            "expected at least 'id item_count max_weight'",
        ));
    }
    let (id, count, capacity) = (numbers[0], numbers[1], numbers[2]);
    let pairs = &numbers[3..];
    if pairs.len() % 2 != 0 || (pairs.len() / 2) as u64 != count {
        return Err(Error::parse(
            line_no,
            format!(
                "declared {count} items but found {} numbers after the header",
                pairs.len()
            ),
        ));
    }

    let items = pairs
        .chunks_exact(2)
        .map(|pair| Item::new(pair[0], pair[1]))
        .collect();
    let instance = KnapsackInstance::new(id, capacity, items);
    if instance.checked_totals().is_none() {
        return Err(Error::parse(
            line_no,
            "total item weight or price does not fit in 64 bits",
        ));
    }
    Ok(instance)
}

/// Renders the result line for `selection`.
pub fn format_solution(instance: &KnapsackInstance, selection: &Selection) -> String {
    let mut line = format!(
        "{} {} {}",
        instance.id,
        instance.items.len(),
        selection.price()
    );
    for &bit in selection.bits() {
        let _ = write!(line, " {}", u8::from(bit));
    }
    line
}
