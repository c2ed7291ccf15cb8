use std::collections::HashMap;

use anyhow::{anyhow, Result};

use crate::model::entry::DEFAULT_PRIORITY;

/// Priority given to a row whose priority box was cleared.
pub const CLEARED_PRIORITY: i64 = 999;

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub text: String,
    pub metadata: HashMap<String, String>,
}

/// Splits free words from `key:value` pairs, e.g. `buy milk pri:3`.
///
/// Clock times such as `07:30` stay part of the text.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut text_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic()) {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        text_parts.push(arg.as_str());
    }

    ParsedInput {
        text: text_parts.join(" "),
        metadata,
    }
}

/// Resolves `key` to the single candidate it equals or prefixes.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Parses the text of a priority box.
///
/// Empty text sinks the entry to the bottom, numbers are truncated to integers
/// and anything else falls back to the default priority.
pub fn parse_priority_input(input: &str) -> i64 {
    let input = input.trim();
    if input.is_empty() {
        return CLEARED_PRIORITY;
    }
    match input.parse::<f64>() {
        Ok(n) if n.is_finite() => n.trunc() as i64,
        _ => DEFAULT_PRIORITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let args = vec![
            "Buy".to_string(),
            "milk".to_string(),
            "pri:3".to_string(),
        ];
        let parsed = parse_args(&args);
        assert_eq!(parsed.text, "Buy milk");
        assert_eq!(parsed.metadata.get("pri"), Some(&"3".to_string()));
    }

    #[test]
    fn test_clock_times_are_not_metadata() {
        let args = vec!["07:30".to_string(), "08:15".to_string()];
        let parsed = parse_args(&args);
        assert_eq!(parsed.text, "07:30 08:15");
        assert!(parsed.metadata.is_empty());
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["sentence", "gratitude", "cleaning", "note"];

        assert_eq!(expand_key("s", &candidates).unwrap(), "sentence");
        assert_eq!(expand_key("grat", &candidates).unwrap(), "gratitude");
        assert_eq!(expand_key("note", &candidates).unwrap(), "note");
        assert!(expand_key("x", &candidates).is_err());

        let ids = vec!["a1b2", "a1c3"];
        assert!(expand_key("a1", &ids).is_err());
        assert_eq!(expand_key("a1c", &ids).unwrap(), "a1c3");
    }

    #[test]
    fn test_parse_priority_input() {
        assert_eq!(parse_priority_input(""), CLEARED_PRIORITY);
        assert_eq!(parse_priority_input(" 3 "), 3);
        assert_eq!(parse_priority_input("2.9"), 2);
        assert_eq!(parse_priority_input("-4"), -4);
        assert_eq!(parse_priority_input("high"), DEFAULT_PRIORITY);
        assert_eq!(parse_priority_input("inf"), DEFAULT_PRIORITY);
    }
}
