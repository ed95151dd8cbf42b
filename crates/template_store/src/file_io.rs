//! File I/O operations

use crate::{Result, StoreError};
use std::path::Path;
use template_model::Template;

/// Save a template to a file
pub async fn save_template(template: &Template, path: impl AsRef<Path>) -> Result<()> {
    let json = crate::serialize(template)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Load a template from a file
pub async fn load_template(path: impl AsRef<Path>) -> Result<Template> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let json = tokio::fs::read_to_string(path).await?;
    crate::deserialize(&json)
}

/// Save a template synchronously
pub fn save_template_sync(template: &Template, path: impl AsRef<Path>) -> Result<()> {
    let json = crate::serialize(template)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a template synchronously
pub fn load_template_sync(path: impl AsRef<Path>) -> Result<Template> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }

    let json = std::fs::read_to_string(path)?;
    crate::deserialize(&json)
}
