//! Shared property bag for columns, rows, and elements
//!
//! Every node in the template tree carries the same loosely-typed bag of
//! presentation properties. Values are stored as given; the model performs
//! no geometric validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Horizontal alignment of node content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

/// Vertical alignment of node content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

/// Font style flags (a node may carry several at once)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
    Underlined,
    Strikethrough,
}

/// Border stroke for a node box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderProps {
    /// Stroke width in pixels
    pub width: f64,
    /// CSS color string
    pub color: String,
}

/// Condition kind for a visibility rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCondition {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    NotEmpty,
    Empty,
}

/// Visibility rule matched against another element's value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityRule {
    pub condition: RuleCondition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// The property bag shared by columns, rows, elements, and table sub-nodes.
///
/// All fields are optional. Position and size are percentages of the parent
/// box. Type-specific fields (`src`, `format`, `language`, the datetime
/// toggles) simply go unused on nodes of other types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<HorizontalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_alignment: Option<VerticalAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<Vec<FontStyle>>,
    /// Resource location for image and url elements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<BorderProps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<i32>,
    /// Drop shadow, encoded as "size;color;intensity"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    /// Glow effect, encoded as "size;color;intensity"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glow: Option<String>,
    /// Visibility rules keyed by the id of the element they inspect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<BTreeMap<String, VisibilityRule>>,
    /// Datetime: show the live value instead of the captured one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<bool>,
    /// Datetime: include the date part
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<bool>,
    /// Datetime: include the time part
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<bool>,
    /// Format string for datetime elements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Syntax-highlighting language for codeblock elements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl NodeProps {
    /// Create a property bag with just position and size set.
    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    /// Shallow-merge `patch` into this bag. Fields present in the patch
    /// overwrite; absent fields are left untouched. There is no way to
    /// unset a field through a patch.
    pub fn merge(&mut self, patch: NodeProps) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if patch.$field.is_some() {
                    self.$field = patch.$field;
                })*
            };
        }
        take!(
            x, y, width, height, background, color, horizontal_alignment,
            vertical_alignment, font, font_size, font_style, src, opacity,
            inner_margin, outer_margin, borders, corner_radius, layer,
            shadow, glow, rules, current, date, time, format, language,
        );
    }
}

/// A partial update applied to a node's property bag.
///
/// Display titles ride along with prop edits in the UI, so the patch carries
/// an optional `title` which callers split out before merging the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub props: NodeProps,
}

impl PropsPatch {
    /// Patch that only updates properties.
    pub fn props(props: NodeProps) -> Self {
        Self { title: None, props }
    }

    /// Patch that only updates the display title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            props: NodeProps::default(),
        }
    }
}

/// Normalize a display title: empty strings mean "unset".
pub fn normalize_title(title: impl Into<String>) -> Option<String> {
    let title = title.into();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_present_fields() {
        let mut props = NodeProps::at(50.0, 50.0, 20.0, 10.0);
        props.background = Some("#FFFFFF".to_string());

        let patch = NodeProps {
            x: Some(25.0),
            color: Some("#FF0000".to_string()),
            ..Default::default()
        };
        props.merge(patch);

        assert_eq!(props.x, Some(25.0));
        assert_eq!(props.y, Some(50.0));
        assert_eq!(props.color, Some("#FF0000".to_string()));
        assert_eq!(props.background, Some("#FFFFFF".to_string()));
    }

    #[test]
    fn test_merge_accepts_invalid_geometry() {
        // Garbage in, garbage out: the bag does not validate.
        let mut props = NodeProps::at(50.0, 50.0, 20.0, 10.0);
        props.merge(NodeProps {
            width: Some(-5.0),
            ..Default::default()
        });
        assert_eq!(props.width, Some(-5.0));
    }

    #[test]
    fn test_sparse_serialization() {
        let props = NodeProps {
            x: Some(10.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(json, r#"{"x":10.0}"#);
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title(""), None);
        assert_eq!(normalize_title("Header"), Some("Header".to_string()));
    }

    #[test]
    fn test_props_patch_flatten() {
        let json = r#"{"title":"Footer","width":30.0}"#;
        let patch: PropsPatch = serde_json::from_str(json).unwrap();
        assert_eq!(patch.title, Some("Footer".to_string()));
        assert_eq!(patch.props.width, Some(30.0));
    }
}
