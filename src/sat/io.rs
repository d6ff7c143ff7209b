//! DIMACS-like weighted SAT blocks and result lines.
//!
//! A `p cnf <terms> <clauses>` line opens a block. Inside a block, an
//! optional `v w1 ... wn` line assigns term weights (by default a term
//! weighs its own id) and every other line is a clause of signed term ids
//! terminated by `0`. Blank lines and `c` comments close the block; a `%`
//! line ends the input.

use super::types::{Assignment, Clause, Literal, SatInstance, Term};
use crate::error::{Error, Result};
use log::debug;
use std::fmt::Write;

struct Block {
    id: u64,
    line_no: usize,
    declared_clauses: String,
    terms: Vec<Term>,
    clauses: Vec<Clause>,
}

impl Block {
    fn finish(self) -> Result<SatInstance> {
        if self.declared_clauses != self.clauses.len().to_string() {
            debug!(
                "instance {} declares {} clauses, found {}",
                self.id,
                self.declared_clauses,
                self.clauses.len()
            );
        }
        let instance = SatInstance::new(self.id, self.terms, self.clauses);
        if instance.checked_weight().is_none() {
            return Err(Error::parse(
                self.line_no,
                "total term weight does not fit in 64 bits",
            ));
        }
        Ok(instance)
    }
}

/// Parses every block in `text`. Instances are numbered from 1.
pub fn parse_instances(text: &str) -> Result<Vec<SatInstance>> {
    let mut instances = Vec::new();
    let mut current: Option<Block> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.starts_with('%') {
            break;
        }
        if line.is_empty() || line.starts_with('c') {
            finish_block(&mut instances, current.take())?;
            continue;
        }
        if line.starts_with('p') {
            finish_block(&mut instances, current.take())?;
            current = Some(parse_header(line, line_no, instances.len() as u64 + 1)?);
            continue;
        }

        let block = current
            .as_mut()
            .ok_or_else(|| Error::parse(line_no, "data line outside of a 'p' block"))?;
        if let Some(weights) = line.strip_prefix('v') {
            parse_weights(weights, line_no, &mut block.terms)?;
        } else {
            let clause = parse_clause(line, line_no, block.terms.len())?;
            block.clauses.push(clause);
        }
    }
    finish_block(&mut instances, current.take())?;

    Ok(instances)
}

fn finish_block(instances: &mut Vec<SatInstance>, block: Option<Block>) -> Result<()> {
    if let Some(block) = block {
        instances.push(block.finish()?);
    }
    Ok(())
}

fn parse_header(line: &str, line_no: usize, id: u64) -> Result<Block> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 || fields[0] != "p" || fields[1] != "cnf" {
        return Err(Error::parse(line_no, "expected 'p cnf <terms> <clauses>'"));
    }
    let count = fields[2]
        .parse::<usize>()
        .map_err(|_| Error::parse(line_no, format!("invalid term count '{}'", fields[2])))?;

    let terms = (1..=count)
        .map(|id| Term::new(id.to_string(), id as u64))
        .collect();
    Ok(Block {
        id,
        line_no,
        declared_clauses: fields[3].to_owned(),
        terms,
        clauses: Vec::new(),
    })
}

fn parse_weights(fields: &str, line_no: usize, terms: &mut [Term]) -> Result<()> {
    let weights = fields
        .split_whitespace()
        .map(|token| {
            token
                .parse::<u64>()
                .map_err(|_| Error::parse(line_no, format!("invalid weight '{token}'")))
        })
        .collect::<Result<Vec<u64>>>()?;
    if weights.len() != terms.len() {
        return Err(Error::parse(
            line_no,
            format!("expected {} weights, got {}", terms.len(), weights.len()),
        ));
    }
    for (term, weight) in terms.iter_mut().zip(weights) {
        term.weight = weight;
    }
    Ok(())
}

fn parse_clause(line: &str, line_no: usize, term_count: usize) -> Result<Clause> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| Error::parse(line_no, format!("invalid literal '{token}'")))
        })
        .collect::<Result<Vec<i64>>>()?;

    let Some((&0, literals)) = values.split_last() else {
        return Err(Error::parse(line_no, "clause must end with 0"));
    };

    literals
        .iter()
        .map(|&value| {
            let id = value.unsigned_abs() as usize;
            if value == 0 || id > term_count {
                return Err(Error::parse(
                    line_no,
                    format!("literal {value} out of range 1..={term_count}"),
                ));
            }
            Ok(Literal::new(id - 1, value < 0))
        })
        .collect::<Result<Vec<Literal>>>()
        .map(Clause::new)
}

/// Renders the result for `assignment`: a `<id> <weight>` header (or
/// `<id> infeasible` when the assignment breaks a clause) followed by one
/// `<term> => <0|1>` line per term.
pub fn format_solution(instance: &SatInstance, assignment: &Assignment, feasible: bool) -> String {
    let mut out = if feasible {
        format!("{} {}", instance.id, assignment.weight())
    } else {
        format!("{} infeasible", instance.id)
    };
    for (term, &value) in instance.terms.iter().zip(assignment.values()) {
        let _ = write!(out, "\n{} => {}", term.name, u8::from(value));
    }
    out
}
