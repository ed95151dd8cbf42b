//! Template serialization

use crate::{Result, TemplateFile};
use template_model::Template;

/// Serialize a template to JSON, wrapped in the versioned file header
pub fn serialize(template: &Template) -> Result<String> {
    let file = TemplateFile::new(template.clone());
    let json = serde_json::to_string_pretty(&file)?;
    Ok(json)
}

/// Deserialize a template from JSON, checking the header
pub fn deserialize(json: &str) -> Result<Template> {
    let file: TemplateFile = serde_json::from_str(json)?;

    if !file.header.is_valid() {
        return Err(crate::StoreError::InvalidFormat(format!(
            "Invalid or unsupported format version: {}",
            file.header.version
        )));
    }

    Ok(file.template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FORMAT_VERSION;

    #[test]
    fn test_round_trip() {
        let template = Template::new();
        let json = serialize(&template).unwrap();
        let loaded = deserialize(&json).unwrap();

        assert_eq!(template, loaded);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let template = Template::new();
        let mut file = TemplateFile::new(template);
        file.header.version = FORMAT_VERSION + 1;
        let json = serde_json::to_string(&file).unwrap();

        assert!(matches!(
            deserialize(&json),
            Err(crate::StoreError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_foreign_app_rejected() {
        let mut file = TemplateFile::new(Template::new());
        file.header.app = "something-else".to_string();
        let json = serde_json::to_string(&file).unwrap();

        assert!(matches!(
            deserialize(&json),
            Err(crate::StoreError::InvalidFormat(_))
        ));
    }
}
