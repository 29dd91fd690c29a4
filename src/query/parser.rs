//! # Query Parameter Parser
//!
//! Parses list query strings into a [`ListQuery`].

use std::collections::HashMap;

use serde_json::Value;

use super::errors::{QueryError, QueryResult};
use super::filter::{FilterExpr, FilterOperator, FilterSet};

/// Maximum page size
pub const MAX_LIMIT: usize = 100;

/// Page size if not specified
pub const DEFAULT_LIMIT: usize = 25;

/// Sort applied when the query names none: newest first
const DEFAULT_SORT: &str = "-createdAt";

/// Sort clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub ascending: bool,
}

/// Parsed list query
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// Fields to project (None = all)
    pub select: Option<Vec<String>>,
    pub filters: FilterSet,
    pub sort: Vec<SortKey>,
    /// 1-based page number
    pub page: usize,
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            select: None,
            filters: FilterSet::new(),
            sort: parse_sort(DEFAULT_SORT),
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    /// Parse raw query string pairs
    pub fn parse(params: &HashMap<String, String>) -> QueryResult<Self> {
        let mut query = ListQuery::default();

        // HashMap order is arbitrary; sort keys so filter order is stable
        let mut keys: Vec<&String> = params.keys().collect();
        keys.sort();

        for key in keys {
            let value = &params[key];
            match key.as_str() {
                "select" => query.select = Some(parse_select(value)?),
                "sort" => {
                    let sort = parse_sort(value);
                    if !sort.is_empty() {
                        query.sort = sort;
                    }
                }
                "page" => query.page = parse_positive("page", value)?,
                "limit" => query.limit = parse_positive("limit", value)?,
                _ => query.filters.filters.push(parse_filter(key, value)?),
            }
        }

        if query.limit > MAX_LIMIT {
            return Err(QueryError::LimitExceeded(query.limit, MAX_LIMIT));
        }

        Ok(query)
    }
}

/// Parse select parameter (comma-separated field list)
fn parse_select(value: &str) -> QueryResult<Vec<String>> {
    let fields: Vec<String> = value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if fields.is_empty() {
        return Err(QueryError::InvalidParam(
            "select cannot be empty".to_string(),
        ));
    }

    Ok(fields)
}

/// Parse sort parameter (comma-separated, `-` prefix for descending)
fn parse_sort(value: &str) -> Vec<SortKey> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && *part != "-")
        .map(|part| match part.strip_prefix('-') {
            Some(field) => SortKey {
                field: field.to_string(),
                ascending: false,
            },
            None => SortKey {
                field: part.to_string(),
                ascending: true,
            },
        })
        .collect()
}

fn parse_positive(name: &str, value: &str) -> QueryResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(QueryError::InvalidParam(format!(
            "Invalid {}: {}",
            name, value
        ))),
    }
}

/// Parse `field=value` or `field[op]=value`
fn parse_filter(key: &str, value: &str) -> QueryResult<FilterExpr> {
    let (field, operator) = match key.split_once('[') {
        Some((field, rest)) => {
            let op = rest
                .strip_suffix(']')
                .ok_or_else(|| QueryError::InvalidParam(key.to_string()))?;
            let operator = FilterOperator::from_bracket(op)
                .ok_or_else(|| QueryError::UnknownOperator(op.to_string()))?;
            (field, operator)
        }
        None => (key, FilterOperator::Eq),
    };

    if field.is_empty() {
        return Err(QueryError::InvalidParam(key.to_string()));
    }

    let value = if operator == FilterOperator::In {
        Value::Array(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(parse_filter_value)
                .collect(),
        )
    } else {
        parse_filter_value(value)
    };

    Ok(FilterExpr::new(field, operator, value))
}

/// Type a raw filter value
fn parse_filter_value(value: &str) -> Value {
    match value {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Ok(n) = value.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = value.parse::<f64>() {
        if let Some(num) = serde_json::Number::from_f64(n) {
            return Value::Number(num);
        }
    }

    Value::String(value.to_string())
}
