//! # Response Envelopes

use serde::Serialize;

use crate::query::ShapedPage;

/// `{success, data}`
#[derive(Debug, Clone, Serialize)]
pub struct Single<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> Single<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{success, count, data}`
#[derive(Debug, Clone, Serialize)]
pub struct Collection<T: Serialize> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> Collection<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// `{success, count, pagination, data}` for shaped lists
#[derive(Debug, Clone, Serialize)]
pub struct Shaped {
    pub success: bool,
    #[serde(flatten)]
    pub page: ShapedPage,
}

impl Shaped {
    pub fn new(page: ShapedPage) -> Self {
        Self {
            success: true,
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ListQuery;
    use serde_json::json;

    #[test]
    fn test_collection_counts() {
        let json = serde_json::to_value(Collection::new(vec![json!(1), json!(2)])).unwrap();
        assert_eq!(json, json!({"success": true, "count": 2, "data": [1, 2]}));
    }

    #[test]
    fn test_shaped_is_flat() {
        let page = ListQuery::default().apply(vec![json!({"id": 1})]);
        let json = serde_json::to_value(Shaped::new(page)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 1);
        assert_eq!(json["data"][0]["id"], 1);
        assert!(json.get("page").is_none());
    }
}
