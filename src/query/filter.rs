//! # Filter Expressions
//!
//! Comparison filters evaluated against serialized records. A filter on an
//! array-valued field matches when any element matches.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl FilterOperator {
    /// Parse the bracketed operator of `field[op]`
    pub fn from_bracket(op: &str) -> Option<Self> {
        match op {
            "eq" => Some(FilterOperator::Eq),
            "ne" => Some(FilterOperator::Ne),
            "gt" => Some(FilterOperator::Gt),
            "gte" => Some(FilterOperator::Gte),
            "lt" => Some(FilterOperator::Lt),
            "lte" => Some(FilterOperator::Lte),
            "in" => Some(FilterOperator::In),
            _ => None,
        }
    }
}

/// A filter expression
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    pub field: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl FilterExpr {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    pub fn equals(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }

    pub fn in_list(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(field, FilterOperator::In, Value::Array(values))
    }

    /// Check if a record matches this filter
    pub fn matches(&self, doc: &Value) -> bool {
        let field_value = match doc.get(&self.field) {
            Some(v) => v,
            None => return self.operator == FilterOperator::Ne,
        };

        match (field_value, self.operator) {
            // "not equal" on an array means no element equals
            (Value::Array(items), FilterOperator::Ne) => {
                !items.iter().any(|item| self.matches_scalar(item, FilterOperator::Eq))
            }
            (Value::Array(items), op) => items.iter().any(|item| self.matches_scalar(item, op)),
            (scalar, op) => self.matches_scalar(scalar, op),
        }
    }

    fn matches_scalar(&self, field_value: &Value, operator: FilterOperator) -> bool {
        match operator {
            FilterOperator::Eq => loosely_equal(field_value, &self.value),
            FilterOperator::Ne => !loosely_equal(field_value, &self.value),
            FilterOperator::Gt => compare_json_values(field_value, &self.value) == Some(Ordering::Greater),
            FilterOperator::Gte => matches!(
                compare_json_values(field_value, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOperator::Lt => compare_json_values(field_value, &self.value) == Some(Ordering::Less),
            FilterOperator::Lte => matches!(
                compare_json_values(field_value, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOperator::In => match self.value.as_array() {
                Some(candidates) => candidates.iter().any(|c| loosely_equal(field_value, c)),
                None => false,
            },
        }
    }
}

/// Equality that treats `1` and `1.0` as the same number
fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => {
            compare_json_values(a, b) == Some(Ordering::Equal)
        }
        _ => a == b,
    }
}

/// Order two JSON scalars; RFC 3339 strings compare as instants
pub(crate) fn compare_json_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => {
            match (
                a.parse::<DateTime<Utc>>(),
                b.parse::<DateTime<Utc>>(),
            ) {
                (Ok(a), Ok(b)) => Some(a.cmp(&b)),
                _ => Some(a.cmp(b)),
            }
        }
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

/// A set of filters combined with AND logic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub filters: Vec<FilterExpr>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, filter: FilterExpr) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Check if a record matches all filters
    pub fn matches(&self, doc: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_filter() {
        let filter = FilterExpr::equals("housing", json!(true));

        assert!(filter.matches(&json!({"housing": true})));
        assert!(!filter.matches(&json!({"housing": false})));
        assert!(!filter.matches(&json!({})));
    }

    #[test]
    fn test_numeric_comparisons() {
        let lte = FilterExpr::new("averageCost", FilterOperator::Lte, json!(10000));

        assert!(lte.matches(&json!({"averageCost": 10000.0})));
        assert!(lte.matches(&json!({"averageCost": 9000})));
        assert!(!lte.matches(&json!({"averageCost": 10010})));
        assert!(!lte.matches(&json!({"averageCost": null})));
    }

    #[test]
    fn test_in_filter_on_array_field() {
        let filter = FilterExpr::in_list("careers", vec![json!("Business"), json!("UI/UX")]);

        assert!(filter.matches(&json!({"careers": ["Web Development", "UI/UX"]})));
        assert!(!filter.matches(&json!({"careers": ["Data Science"]})));
    }

    #[test]
    fn test_eq_on_array_field_matches_any_element() {
        let filter = FilterExpr::equals("careers", json!("Business"));
        assert!(filter.matches(&json!({"careers": ["Other", "Business"]})));
    }

    #[test]
    fn test_ne_on_array_field() {
        let filter = FilterExpr::new("careers", FilterOperator::Ne, json!("Business"));
        assert!(!filter.matches(&json!({"careers": ["Other", "Business"]})));
        assert!(filter.matches(&json!({"careers": ["Other"]})));
    }

    #[test]
    fn test_timestamps_compare_as_instants() {
        let a = json!("2024-01-01T12:00:00.1Z");
        let b = json!("2024-01-01T12:00:00.123Z");
        assert_eq!(compare_json_values(&a, &b), Some(Ordering::Less));
    }

    #[test]
    fn test_filter_set() {
        let filters = FilterSet::new()
            .and(FilterExpr::equals("housing", json!(true)))
            .and(FilterExpr::new("averageRating", FilterOperator::Gt, json!(7)));

        assert!(filters.matches(&json!({"housing": true, "averageRating": 8.5})));
        assert!(!filters.matches(&json!({"housing": false, "averageRating": 8.5})));
    }
}
