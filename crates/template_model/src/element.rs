//! Element nodes - the typed content blocks placed on the canvas

use crate::{NodeProps, TableData};
use serde::{Deserialize, Serialize};

/// The closed set of content block types. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Image,
    Shape,
    List,
    Table,
    #[serde(rename = "pagebreak")]
    PageBreak,
    #[serde(rename = "pagenumber")]
    PageNumber,
    #[serde(rename = "pagetotal")]
    PageTotal,
    #[serde(rename = "datetime")]
    DateTime,
    Url,
    #[serde(rename = "codeblock")]
    CodeBlock,
}

impl ElementType {
    /// The wire name used in element ids and the persisted format.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Shape => "shape",
            Self::List => "list",
            Self::Table => "table",
            Self::PageBreak => "pagebreak",
            Self::PageNumber => "pagenumber",
            Self::PageTotal => "pagetotal",
            Self::DateTime => "datetime",
            Self::Url => "url",
            Self::CodeBlock => "codeblock",
        }
    }

    /// Human-readable label, used for default element titles.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Shape => "Shape",
            Self::List => "List",
            Self::Table => "Table",
            Self::PageBreak => "Page break",
            Self::PageNumber => "Page number",
            Self::PageTotal => "Page total",
            Self::DateTime => "Date/time",
            Self::Url => "URL",
            Self::CodeBlock => "Code block",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// One entry in an element's value sequence. The payload shape depends on
/// the element type: plain strings for text-like elements, string sequences
/// for lists, and a single table sub-tree for table elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementValue {
    Text(String),
    Items(Vec<String>),
    Table(TableData),
}

impl ElementValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableData> {
        match self {
            Self::Table(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut TableData> {
        match self {
            Self::Table(data) => Some(data),
            _ => None,
        }
    }
}

/// A content block within a row.
///
/// The id has the form `{type}-{n}` where `n` counts same-type siblings at
/// creation time. Ids are only unique within their row at the moment of
/// creation; they are not a stable long-term key across structural edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    pub order: usize,
    #[serde(rename = "type")]
    pub kind: ElementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub values: Vec<ElementValue>,
    pub props: NodeProps,
}

impl Element {
    /// Title shown in the structure tree.
    pub fn display_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.id.clone())
    }

    /// The table payload, if this is a table element with one.
    pub fn table_data(&self) -> Option<&TableData> {
        self.values.first().and_then(ElementValue::as_table)
    }

    /// Mutable access to the table payload.
    pub fn table_data_mut(&mut self) -> Option<&mut TableData> {
        self.values.first_mut().and_then(ElementValue::as_table_mut)
    }
}

/// Generate the id for a new element of `kind` in a row currently holding
/// `elements`: `{type}-{count_of_same_type + 1}`. Pure over the element
/// list; deletions and moves can later re-shuffle counts, so long-term
/// uniqueness is not guaranteed.
pub fn next_element_id(kind: ElementType, elements: &[Element]) -> String {
    let same_type = elements.iter().filter(|e| e.kind == kind).count();
    format!("{}-{}", kind.wire_name(), same_type + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: &str, kind: ElementType) -> Element {
        Element {
            id: id.to_string(),
            order: 0,
            kind,
            title: None,
            values: Vec::new(),
            props: NodeProps::default(),
        }
    }

    #[test]
    fn test_next_element_id_counts_same_type() {
        let elements = vec![
            element("text-1", ElementType::Text),
            element("image-1", ElementType::Image),
            element("text-2", ElementType::Text),
        ];
        assert_eq!(next_element_id(ElementType::Text, &elements), "text-3");
        assert_eq!(next_element_id(ElementType::Image, &elements), "image-2");
        assert_eq!(next_element_id(ElementType::Table, &elements), "table-1");
    }

    #[test]
    fn test_next_element_id_can_collide_after_removal() {
        // Scoped uniqueness only: after "text-1" is removed, the next text
        // element is assigned "text-2" again if one already slipped through.
        let elements = vec![element("text-2", ElementType::Text)];
        assert_eq!(next_element_id(ElementType::Text, &elements), "text-2");
    }

    #[test]
    fn test_element_type_wire_names() {
        let json = serde_json::to_string(&ElementType::PageBreak).unwrap();
        assert_eq!(json, r#""pagebreak""#);
        let json = serde_json::to_string(&ElementType::CodeBlock).unwrap();
        assert_eq!(json, r#""codeblock""#);
        let parsed: ElementType = serde_json::from_str(r#""datetime""#).unwrap();
        assert_eq!(parsed, ElementType::DateTime);
    }

    #[test]
    fn test_element_value_untagged() {
        let text: ElementValue = serde_json::from_str(r#""Sample Text""#).unwrap();
        assert_eq!(text, ElementValue::Text("Sample Text".to_string()));

        let items: ElementValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(
            items,
            ElementValue::Items(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_element_serializes_kind_as_type() {
        let el = element("text-1", ElementType::Text);
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "text");
    }
}
