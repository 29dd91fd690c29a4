//! # Shaped Results
//!
//! Applies a [`ListQuery`] to serialized records.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::{Map, Value};

use super::filter::compare_json_values;
use super::parser::{ListQuery, SortKey};

/// Identity field kept by every projection
const ID_FIELD: &str = "id";

/// Reference to a neighbouring page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub page: usize,
    pub limit: usize,
}

/// Links to the neighbouring pages that exist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

/// One page of shaped records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapedPage {
    /// Records on this page
    pub count: usize,
    pub pagination: Pagination,
    pub data: Vec<Value>,
}

impl ListQuery {
    /// Filter, sort, paginate and project `records`
    pub fn apply(&self, records: Vec<Value>) -> ShapedPage {
        let mut matched: Vec<Value> = records
            .into_iter()
            .filter(|r| self.filters.matches(r))
            .collect();

        sort_records(&mut matched, &self.sort);

        let total = matched.len();
        let start = (self.page - 1).saturating_mul(self.limit);
        let end = start.saturating_add(self.limit);

        let data: Vec<Value> = matched
            .into_iter()
            .skip(start)
            .take(self.limit)
            .map(|r| self.project(r))
            .collect();

        let pagination = Pagination {
            next: (end < total).then_some(PageRef {
                page: self.page + 1,
                limit: self.limit,
            }),
            prev: (start > 0).then_some(PageRef {
                page: self.page - 1,
                limit: self.limit,
            }),
        };

        ShapedPage {
            count: data.len(),
            pagination,
            data,
        }
    }

    fn project(&self, record: Value) -> Value {
        let Some(fields) = &self.select else {
            return record;
        };

        match record {
            Value::Object(obj) => {
                let projected: Map<String, Value> = obj
                    .into_iter()
                    .filter(|(k, _)| k == ID_FIELD || fields.contains(k))
                    .collect();
                Value::Object(projected)
            }
            other => other,
        }
    }
}

/// Stable multi-key sort; missing or incomparable values sort last
fn sort_records(records: &mut [Value], keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }

    records.sort_by(|a, b| {
        for key in keys {
            let ordering = match (a.get(&key.field), b.get(&key.field)) {
                (Some(a_val), Some(b_val)) => match compare_json_values(a_val, b_val) {
                    Some(ord) if key.ascending => ord,
                    Some(ord) => ord.reverse(),
                    None => Ordering::Equal,
                },
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use serde_json::json;

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let params: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ListQuery::parse(&params).unwrap()
    }

    fn records() -> Vec<Value> {
        (1..=5)
            .map(|i| json!({"id": i, "name": format!("camp-{}", i), "averageCost": i * 1000}))
            .collect()
    }

    #[test]
    fn test_pagination_links() {
        let page = query(&[("sort", "name"), ("limit", "2"), ("page", "2")]).apply(records());

        assert_eq!(page.count, 2);
        assert_eq!(page.data[0]["name"], "camp-3");
        assert_eq!(page.pagination.next, Some(PageRef { page: 3, limit: 2 }));
        assert_eq!(page.pagination.prev, Some(PageRef { page: 1, limit: 2 }));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page = query(&[("sort", "name"), ("limit", "2"), ("page", "3")]).apply(records());

        assert_eq!(page.count, 1);
        assert!(page.pagination.next.is_none());
        assert!(page.pagination.prev.is_some());
    }

    #[test]
    fn test_filter_then_sort_descending() {
        let page = query(&[("averageCost[gte]", "3000"), ("sort", "-averageCost")]).apply(records());

        let names: Vec<&str> = page.data.iter().filter_map(|r| r["name"].as_str()).collect();
        assert_eq!(names, vec!["camp-5", "camp-4", "camp-3"]);
    }

    #[test]
    fn test_select_keeps_id() {
        let page = query(&[("select", "name")]).apply(records());

        let first = page.data[0].as_object().unwrap();
        assert_eq!(first.len(), 2);
        assert!(first.contains_key("id"));
        assert!(first.contains_key("name"));
    }

    #[test]
    fn test_empty_pagination_serializes_as_object() {
        let page = ListQuery::default().apply(vec![]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pagination"], json!({}));
        assert_eq!(json["count"], 0);
    }
}
