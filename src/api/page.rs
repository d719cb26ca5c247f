use serde::{Deserialize, Serialize};

/// One server-returned slice of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Size of the whole filtered collection.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_list_envelope() {
        let page: Page<serde_json::Value> = serde_json::from_str(
            r#"{"total": 12, "page": 2, "limit": 5, "data": [{"id": 6}, {"id": 7}]}"#,
        )
        .unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(page.page, 2);
        assert_eq!(page.data.len(), 2);
    }
}
