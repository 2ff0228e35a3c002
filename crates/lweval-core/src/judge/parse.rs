use lazy_static::lazy_static;
use regex::Regex;

pub const UNPARSEABLE_REASONING: &str = "Could not parse reasoning";

lazy_static! {
    /// First `0`/`1` after a `SCORE:` label; anything else is no score.
    static ref SCORE: Regex = Regex::new(r"SCORE:\s*([01])").unwrap();
    /// Everything after the `REASONING:` label, across lines.
    static ref REASONING: Regex = Regex::new(r"(?s)REASONING:\s*(.+)").unwrap();
}

/// Binary score from judge output; 0.0 when no `SCORE: 0|1` is present.
pub fn parse_score(output: &str) -> f64 {
    match SCORE.captures(output).and_then(|c| c.get(1)) {
        Some(m) if m.as_str() == "1" => 1.0,
        _ => 0.0,
    }
}

pub fn parse_reasoning(output: &str) -> String {
    REASONING
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| UNPARSEABLE_REASONING.to_string())
}
