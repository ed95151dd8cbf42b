//! Periodic background saving
//!
//! The autosaver samples a shared template at a fixed interval and hands it
//! to the persistence service when it has changed since the last save.
//! Saving is gated on the session being authenticated and the user's
//! auto-save preference; the gates are read once at spawn time. A failed
//! save is logged and retried on the next tick.

use crate::{Result, TemplateService};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use template_model::Template;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Autosave configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutosaveConfig {
    /// Whether autosave is enabled
    pub enabled: bool,
    /// Interval between autosaves in seconds
    pub interval_secs: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
        }
    }
}

impl AutosaveConfig {
    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs;
        self
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Session flags the autosaver consumes read-only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    /// Whether the session belongs to a signed-in user
    pub is_authenticated: bool,
    /// The user's auto-save preference
    pub auto_save: bool,
}

impl SessionSettings {
    /// Whether this session may autosave at all.
    pub fn allows_autosave(&self) -> bool {
        self.is_authenticated && self.auto_save
    }
}

/// Background saver for one editing session.
pub struct Autosaver<S> {
    service: Arc<S>,
    template: Arc<RwLock<Template>>,
    config: AutosaveConfig,
    settings: SessionSettings,
    dirty: Arc<AtomicBool>,
}

impl<S> Autosaver<S>
where
    S: TemplateService + Send + Sync + 'static,
{
    pub fn new(
        service: Arc<S>,
        template: Arc<RwLock<Template>>,
        config: AutosaveConfig,
        settings: SessionSettings,
    ) -> Self {
        Self {
            service,
            template,
            config,
            settings,
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Record that the shared template changed since the last save.
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Save the shared template immediately, regardless of gating or the
    /// dirty flag. The id the service assigns is written back into the
    /// shared template so later saves update instead of creating.
    pub async fn save_now(&self) -> Result<()> {
        let snapshot = self.template.read().await.clone();
        let saved = self.service.create_or_save(snapshot).await?;
        if saved.id.is_some() {
            let mut shared = self.template.write().await;
            if shared.id.is_none() {
                shared.id = saved.id;
            }
        }
        self.dirty.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Spawn the background save loop. When the config or the session gates
    /// rule autosave out, the task exits immediately.
    pub fn spawn(&self) -> JoinHandle<()> {
        let enabled = self.config.enabled && self.settings.allows_autosave();
        let interval = Duration::from_secs(self.config.interval_secs);
        let service = self.service.clone();
        let template = self.template.clone();
        let dirty = self.dirty.clone();

        tokio::spawn(async move {
            if !enabled {
                return;
            }
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so a fresh session
            // is not saved before anything changed.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !dirty.swap(false, Ordering::SeqCst) {
                    continue;
                }
                let snapshot = template.read().await.clone();
                match service.create_or_save(snapshot).await {
                    Ok(saved) => {
                        if saved.id.is_some() {
                            let mut shared = template.write().await;
                            if shared.id.is_none() {
                                shared.id = saved.id;
                            }
                        }
                        tracing::debug!(id = ?saved.id, "autosaved template");
                    }
                    Err(err) => {
                        // Leave the flag set so the next tick retries.
                        dirty.store(true, Ordering::SeqCst);
                        tracing::warn!(error = %err, "autosave failed");
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryTemplateService;

    fn session() -> SessionSettings {
        SessionSettings {
            is_authenticated: true,
            auto_save: true,
        }
    }

    fn saver(
        config: AutosaveConfig,
        settings: SessionSettings,
    ) -> (Autosaver<MemoryTemplateService>, Arc<MemoryTemplateService>) {
        let service = Arc::new(MemoryTemplateService::new());
        let template = Arc::new(RwLock::new(Template::new()));
        (
            Autosaver::new(service.clone(), template, config, settings),
            service,
        )
    }

    #[tokio::test]
    async fn test_save_now_assigns_id() {
        let (saver, service) = saver(AutosaveConfig::default(), session());
        saver.mark_dirty();
        saver.save_now().await.unwrap();

        assert!(!saver.is_dirty());
        assert_eq!(service.len().await, 1);
        assert_eq!(saver.template.read().await.id, Some(1));
    }

    #[tokio::test]
    async fn test_repeated_saves_update_in_place() {
        let (saver, service) = saver(AutosaveConfig::default(), session());
        saver.save_now().await.unwrap();
        saver.save_now().await.unwrap();
        assert_eq!(service.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_loop_saves_when_dirty() {
        let (saver, service) = saver(AutosaveConfig::default().with_interval(1), session());
        let handle = saver.spawn();

        saver.mark_dirty();
        tokio::time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;

        assert_eq!(service.len().await, 1);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_clean_ticks_do_not_save() {
        let (saver, service) = saver(AutosaveConfig::default().with_interval(1), session());
        let handle = saver.spawn();

        tokio::time::sleep(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;

        assert!(service.is_empty().await);
        handle.abort();
    }

    #[tokio::test]
    async fn test_gated_session_never_spawns_loop() {
        let settings = SessionSettings {
            is_authenticated: false,
            auto_save: true,
        };
        let (saver, service) = saver(AutosaveConfig::default().with_interval(1), settings);
        let handle = saver.spawn();

        // The task exits on its own when gated out.
        handle.await.unwrap();
        assert!(service.is_empty().await);
    }

    #[tokio::test]
    async fn test_disabled_config_never_spawns_loop() {
        let (saver, service) = saver(AutosaveConfig::disabled(), session());
        saver.spawn().await.unwrap();
        assert!(service.is_empty().await);
    }
}
