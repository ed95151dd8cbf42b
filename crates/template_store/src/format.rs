//! Internal template file format

use serde::{Deserialize, Serialize};
use template_model::Template;

/// File format version
pub const FORMAT_VERSION: u32 = 1;

/// File extension for the internal format
pub const FILE_EXTENSION: &str = "tpl.json";

/// File header for format identification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileHeader {
    /// Application string for format identification
    pub app: String,
    /// Format version
    pub version: u32,
    /// Creation timestamp (ISO 8601)
    pub created: String,
    /// Last modified timestamp (ISO 8601)
    pub modified: String,
}

impl FileHeader {
    pub const APP: &'static str = "template-designer";

    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            app: Self::APP.to_string(),
            version: FORMAT_VERSION,
            created: now.clone(),
            modified: now,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.app == Self::APP && self.version <= FORMAT_VERSION
    }
}

impl Default for FileHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateFile {
    pub header: FileHeader,
    pub template: Template,
}

impl TemplateFile {
    pub fn new(template: Template) -> Self {
        Self {
            header: FileHeader::new(),
            template,
        }
    }
}
