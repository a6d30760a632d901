//! Pre-submission checks for OQL text.
//!
//! These are lexical heuristics, not a parser: the service remains the
//! authority on whether a query is well formed.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use crate::models::ValidationVerdict;

/// Queries longer than this get a performance warning
pub const MAX_QUERY_LENGTH: usize = 10_000;

pub const EMPTY_QUERY_ERROR: &str = "Query cannot be empty";
pub const DANGEROUS_PATTERN_ERROR: &str = "Query contains potentially dangerous patterns";
pub const MISSING_CLAUSE_WARNING: &str = "Query should contain a SELECT, MATCH, or FIND clause";
pub const MISSING_CLAUSE_SUGGESTION: &str = "Start the query with SELECT, MATCH, or FIND";
pub const LONG_QUERY_WARNING: &str = "Query is very long and may impact performance";
pub const MISSING_LIMIT_SUGGESTION: &str = "Consider adding a LIMIT or TOP clause to bound the result size";

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("static OQL validator pattern")
}

lazy_static! {
    static ref CLAUSE_KEYWORD: Regex = case_insensitive(r"\b(select|match|find)\b");

    static ref LIMIT_KEYWORD: Regex = case_insensitive(r"\b(limit|top)\b");

    /// Statements that destroy or rewrite data, plus comment markers that
    /// could hide the tail of an injected statement.
    ///
    /// `--` also matches MATCH arrows such as `(a)-->(b)`; those queries
    /// are rejected on purpose and must be written as `(a)-[]->(b)`.
    static ref DANGEROUS_PATTERNS: Vec<Regex> = [
        r"\bdrop\s+(table|schema|database)\b",
        r"\bdelete\s+from\b",
        // (?s): UPDATE and SET may sit on different lines
        r"(?s)\bupdate\s+.+\s+set\b",
        r"\binsert\s+into\b",
        r"--",
        r"/\*",
    ]
    .iter()
    .map(|p| case_insensitive(p))
    .collect();
}

/// Validate a query against the default length ceiling
pub fn validate_query(query: &str) -> ValidationVerdict {
    validate_query_with_limit(query, MAX_QUERY_LENGTH)
}

pub fn validate_query_with_limit(query: &str, max_length: usize) -> ValidationVerdict {
    if query.trim().is_empty() {
        return ValidationVerdict {
            is_valid: false,
            errors: vec![EMPTY_QUERY_ERROR.to_string()],
            warnings: vec![],
            suggestions: vec![],
        };
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut suggestions = Vec::new();

    if !CLAUSE_KEYWORD.is_match(query) {
        warnings.push(MISSING_CLAUSE_WARNING.to_string());
        suggestions.push(MISSING_CLAUSE_SUGGESTION.to_string());
    }

    if contains_dangerous_pattern(query) {
        errors.push(DANGEROUS_PATTERN_ERROR.to_string());
    }

    if query.chars().count() > max_length {
        warnings.push(LONG_QUERY_WARNING.to_string());
    }

    if !LIMIT_KEYWORD.is_match(query) {
        suggestions.push(MISSING_LIMIT_SUGGESTION.to_string());
    }

    ValidationVerdict {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        suggestions,
    }
}

pub fn contains_dangerous_pattern(query: &str) -> bool {
    DANGEROUS_PATTERNS.iter().any(|re| re.is_match(query))
}
