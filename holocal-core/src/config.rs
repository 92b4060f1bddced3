//! holocal configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cell::CellId;
use crate::controller::CalendarView;
use crate::error::{CalendarError, CalendarResult};
use crate::zome::protocol::DEFAULT_ZOME_NAME;

static DEFAULT_CONDUCTOR: &str = "holocal-conductor-local";

fn default_zome_name() -> String {
    DEFAULT_ZOME_NAME.to_string()
}

fn is_default_zome_name(name: &String) -> bool {
    name == DEFAULT_ZOME_NAME
}

fn default_conductor() -> String {
    DEFAULT_CONDUCTOR.to_string()
}

fn is_default_view(view: &CalendarView) -> bool {
    *view == CalendarView::default()
}

/// Configuration at ~/.config/holocal/config.toml
///
/// `dna_hash` and `agent_pub_key` form the cell every zome call is scoped to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolocalConfig {
    pub dna_hash: String,
    pub agent_pub_key: String,

    #[serde(default = "default_zome_name", skip_serializing_if = "is_default_zome_name")]
    pub zome_name: String,

    /// Conductor bridge binary, looked up in PATH.
    #[serde(default = "default_conductor")]
    pub conductor: String,

    #[serde(default, skip_serializing_if = "is_default_view")]
    pub initial_view: CalendarView,
}

impl HolocalConfig {
    pub fn new(dna_hash: impl Into<String>, agent_pub_key: impl Into<String>) -> Self {
        HolocalConfig {
            dna_hash: dna_hash.into(),
            agent_pub_key: agent_pub_key.into(),
            zome_name: default_zome_name(),
            conductor: default_conductor(),
            initial_view: CalendarView::default(),
        }
    }

    pub fn config_path() -> CalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("holocal");

        Ok(config_dir.join("config.toml"))
    }

    pub fn cell_id(&self) -> CellId {
        CellId::new(self.dna_hash.clone(), self.agent_pub_key.clone())
    }

    pub fn load() -> CalendarResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CalendarResult<Self> {
        if !path.exists() {
            return Err(CalendarError::Config(format!(
                "No config at {}. Create one with:\n  holocal init --dna <hash> --agent <key>",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            CalendarError::Config(format!("Invalid config {}: {}", path.display(), e))
        })
    }

    pub fn save_to(&self, path: &Path) -> CalendarResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalendarError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "dna_hash = \"uhC0kdna\"\nagent_pub_key = \"uhCAkalice\"\n").unwrap();

        let config = HolocalConfig::load_from(&path).unwrap();
        assert_eq!(config.zome_name, "calendar_events");
        assert_eq!(config.conductor, "holocal-conductor-local");
        assert_eq!(config.initial_view, CalendarView::TimeGridWeek);
        assert_eq!(config.cell_id(), CellId::new("uhC0kdna", "uhCAkalice"));
    }

    #[test]
    fn test_saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");
        let mut config = HolocalConfig::new("uhC0kdna", "uhCAkalice");
        config.initial_view = CalendarView::DayGridMonth;

        config.save_to(&path).unwrap();
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("initial_view = \"dayGridMonth\""));
        assert!(!saved.contains("zome_name"));
        assert_eq!(HolocalConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_config_explains_how_to_create_it() {
        let dir = tempfile::tempdir().unwrap();
        let err = HolocalConfig::load_from(&dir.path().join("config.toml")).unwrap_err();
        match err {
            CalendarError::Config(msg) => assert!(msg.contains("holocal init")),
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
