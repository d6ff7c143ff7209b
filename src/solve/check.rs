//! Comparing solver output with expected results.

use std::fmt::Write;

/// One line where expected and actual output disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff {
    /// 1-based index among non-blank lines.
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compares non-blank lines of `expected` with the lines of `solutions`,
/// ignoring differences in whitespace.
pub fn compare_lines(expected: &str, solutions: &[String]) -> Vec<LineDiff> {
    let expected: Vec<String> = expected
        .lines()
        .map(normalize)
        .filter(|line| !line.is_empty())
        .collect();
    let actual: Vec<String> = solutions
        .iter()
        .flat_map(|solution| solution.lines())
        .map(normalize)
        .filter(|line| !line.is_empty())
        .collect();

    (0..expected.len().max(actual.len()))
        .filter_map(|i| {
            let e = expected.get(i);
            let a = actual.get(i);
            (e != a).then(|| LineDiff {
                line: i + 1,
                expected: e.cloned(),
                actual: a.cloned(),
            })
        })
        .collect()
}

/// `<size> OK <file>` or `<size> FAIL <file>` followed by `- expected` and
/// `+ actual` lines for each difference.
pub fn format_verdict(size: f64, file: &str, diffs: &[LineDiff]) -> String {
    if diffs.is_empty() {
        return format!("{size} OK {file}");
    }
    let mut out = format!("{size} FAIL {file}");
    for diff in diffs {
        if let Some(expected) = &diff.expected {
            let _ = write!(out, "\n- {expected}");
        }
        if let Some(actual) = &diff.actual {
            let _ = write!(out, "\n+ {actual}");
        }
    }
    out
}
