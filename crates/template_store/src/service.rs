//! The persistence service boundary
//!
//! [`TemplateService`] is the async seam between the editing core and
//! whatever stores templates (a database behind an HTTP API in production).
//! [`MemoryTemplateService`] is the in-process implementation used by tests
//! and the autosave task.

use crate::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};
use template_model::{Access, Template};
use tokio::sync::RwLock;

/// Formats a template can be exported to. JSON is the native format;
/// ODT and DOC exports produce a conversion envelope handed off to the
/// document converter downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Odt,
    Doc,
}

/// Search filter for stored templates. All fields are conjunctive; `None`
/// matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFilter {
    /// Case-insensitive substring match against the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
}

/// A stored template's listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: i64,
    pub title: String,
    pub access: Access,
    #[serde(rename = "authorID", skip_serializing_if = "Option::is_none")]
    pub author_id: Option<i64>,
}

/// Async persistence operations over stored templates.
pub trait TemplateService {
    /// Persist a template. A template without an id is created and assigned
    /// one; a template with an id replaces the stored copy. Returns the
    /// stored template, id filled in.
    fn create_or_save(&self, template: Template) -> impl Future<Output = Result<Template>> + Send;

    /// Load a stored template by id.
    fn load(&self, id: i64) -> impl Future<Output = Result<Template>> + Send;

    /// List stored templates matching a filter, ordered by id.
    fn search(
        &self,
        filter: TemplateFilter,
    ) -> impl Future<Output = Result<Vec<TemplateSummary>>> + Send;

    /// Delete a stored template by id.
    fn delete(&self, id: i64) -> impl Future<Output = Result<()>> + Send;

    /// Render a template into the named export format.
    fn export_to(
        &self,
        template: &Template,
        format: ExportFormat,
    ) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// In-memory [`TemplateService`] backed by a `HashMap`.
#[derive(Debug)]
pub struct MemoryTemplateService {
    templates: RwLock<HashMap<i64, Template>>,
    next_id: AtomicI64,
}

impl Default for MemoryTemplateService {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTemplateService {
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.templates.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.templates.read().await.is_empty()
    }
}

impl TemplateService for MemoryTemplateService {
    async fn create_or_save(&self, mut template: Template) -> Result<Template> {
        let id = match template.id {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        template.id = Some(id);
        self.templates.write().await.insert(id, template.clone());
        Ok(template)
    }

    async fn load(&self, id: i64) -> Result<Template> {
        self.templates
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn search(&self, filter: TemplateFilter) -> Result<Vec<TemplateSummary>> {
        let needle = filter.title.as_deref().map(str::to_lowercase);
        let templates = self.templates.read().await;
        let mut matches: Vec<TemplateSummary> = templates
            .iter()
            .filter(|(_, t)| {
                needle
                    .as_deref()
                    .is_none_or(|n| t.props.title.to_lowercase().contains(n))
                    && filter.access.is_none_or(|a| t.props.access == a)
                    && filter.author_id.is_none_or(|a| t.props.author_id == Some(a))
            })
            .map(|(id, t)| TemplateSummary {
                id: *id,
                title: t.props.title.clone(),
                access: t.props.access,
                author_id: t.props.author_id,
            })
            .collect();
        matches.sort_by_key(|s| s.id);
        Ok(matches)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.templates
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn export_to(&self, template: &Template, format: ExportFormat) -> Result<Vec<u8>> {
        let json = crate::serialize(template)?;
        let bytes = match format {
            ExportFormat::Json => json.into_bytes(),
            // The converter service consumes this envelope; no local
            // rendering happens for office formats.
            ExportFormat::Odt => envelope("odt", &json),
            ExportFormat::Doc => envelope("doc", &json),
        };
        Ok(bytes)
    }
}

fn envelope(target: &str, json: &str) -> Vec<u8> {
    format!("convert-to: {target}\n{json}").into_bytes()
}
