//! Wire shapes for the Quickbase REST API. Records come back keyed by
//! stringified field id, each value wrapped in a `{"value": ...}` object.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ReportDefinition {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortField {
    #[serde(rename = "fieldId")]
    pub field_id: u32,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsQuery {
    pub from: String,
    pub select: Vec<u32>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(rename = "sortBy", skip_serializing_if = "Vec::is_empty", default)]
    pub sort_by: Vec<SortField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldValue {
    pub value: serde_json::Value,
}

impl FieldValue {
    /// Text rendition of a field value. Quickbase returns numeric fields
    /// (like the program year) as JSON numbers; the naming convention
    /// concatenates them as text.
    pub fn as_text(&self) -> Option<String> {
        match &self.value {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

pub type Record = HashMap<String, FieldValue>;

#[derive(Debug, Clone, Deserialize)]
pub struct RecordsQueryResponse {
    pub data: Vec<Record>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_query_serializes_upstream_field_names() {
        let query = RecordsQuery {
            from: "bqx".into(),
            select: vec![3, 6, 11],
            filter: Some("{17.CT.'Active'}".into()),
            sort_by: vec![SortField {
                field_id: 3,
                order: SortOrder::Asc,
            }],
        };
        let json = serde_json::to_value(&query).expect("serialize");
        assert_eq!(json["where"], "{17.CT.'Active'}");
        assert_eq!(json["sortBy"][0]["fieldId"], 3);
        assert_eq!(json["sortBy"][0]["order"], "ASC");
    }

    #[test]
    fn unfiltered_query_omits_where_and_sort() {
        let query = RecordsQuery {
            from: "bqy".into(),
            select: vec![6, 9],
            filter: None,
            sort_by: Vec::new(),
        };
        let json = serde_json::to_value(&query).expect("serialize");
        assert!(json.get("where").is_none());
        assert!(json.get("sortBy").is_none());
    }

    #[test]
    fn field_value_renders_numbers_as_text() {
        let value: FieldValue = serde_json::from_str(r#"{"value": 2023}"#).expect("parse");
        assert_eq!(value.as_text().as_deref(), Some("2023"));
        let null: FieldValue = serde_json::from_str(r#"{"value": null}"#).expect("parse");
        assert_eq!(null.as_text(), None);
    }
}
