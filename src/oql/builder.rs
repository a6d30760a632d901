//! Deterministic construction of OQL text from structured parameters.

use serde_json::Value;

/// Escape a raw string for use inside a single-quoted OQL literal.
///
/// This is a lexical escape only. Built queries still go through
/// [`validate_query`](super::validate_query) before submission.
pub fn escape_string(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('\'', "''")
}

/// Render a condition value as an OQL literal
fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", escape_string(s)),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "NULL".to_string(),
        // Arrays and objects have no literal form; compare against their JSON text
        other => format!("'{}'", escape_string(&other.to_string())),
    }
}

/// Flat SELECT-style query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    pub target_type: Option<String>,
    pub fields: Vec<String>,
    /// Equality conditions, joined with AND in this order
    pub conditions: Vec<(String, Value)>,
    pub limit: Option<u32>,
}

impl SelectQuery {
    pub fn build(&self) -> String {
        let projection = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(", ")
        };
        let mut query = format!("SELECT {}", projection);

        if let Some(target) = &self.target_type {
            query.push_str(&format!(" FROM {}", target));
        }

        if !self.conditions.is_empty() {
            let clauses: Vec<String> = self
                .conditions
                .iter()
                .map(|(field, value)| format!("{} = {}", field, literal(value)))
                .collect();
            query.push_str(&format!(" WHERE {}", clauses.join(" AND ")));
        }

        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }

        query
    }
}

/// Pattern MATCH-style query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchQuery {
    pub pattern: String,
    pub filter: Option<String>,
    pub return_clause: Option<String>,
    pub limit: Option<u32>,
}

impl MatchQuery {
    pub fn build(&self) -> String {
        let mut query = format!("MATCH {}", self.pattern);
        if let Some(filter) = &self.filter {
            query.push_str(&format!(" WHERE {}", filter));
        }
        if let Some(return_clause) = &self.return_clause {
            query.push_str(&format!(" RETURN {}", return_clause));
        }
        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }
        query
    }
}

pub fn build_select(
    target_type: Option<&str>,
    fields: Option<&[&str]>,
    conditions: Option<&[(&str, Value)]>,
    limit: Option<u32>,
) -> String {
    SelectQuery {
        target_type: target_type.map(str::to_string),
        fields: fields
            .unwrap_or_default()
            .iter()
            .map(|f| f.to_string())
            .collect(),
        conditions: conditions
            .unwrap_or_default()
            .iter()
            .map(|(field, value)| (field.to_string(), value.clone()))
            .collect(),
        limit,
    }
    .build()
}

pub fn build_match(
    pattern: &str,
    filter: Option<&str>,
    return_clause: Option<&str>,
    limit: Option<u32>,
) -> String {
    MatchQuery {
        pattern: pattern.to_string(),
        filter: filter.map(str::to_string),
        return_clause: return_clause.map(str::to_string),
        limit,
    }
    .build()
}
