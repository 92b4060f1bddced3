//! On-disk persistence of conductor stores, one JSON file per DNA.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use holocal_core::zome::ZomeCall;
use holocal_core::zome::memory::ConductorStore;
use holocal_core::zome::protocol::{CreateCalendarEvent, ZomeFunction};

pub fn default_store_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data_dir.join("holocal").join("conductor"))
}

/// DNA hashes are base64url, so anything else cannot name a store file.
fn store_path(store_dir: &Path, call: &ZomeCall) -> Result<PathBuf> {
    let dna_hash = call.cell_id.dna_hash().to_string();
    if dna_hash.is_empty()
        || !dna_hash
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        bail!("Invalid DNA hash '{dna_hash}'");
    }
    Ok(store_dir.join(format!("{dna_hash}.json")))
}

fn load(path: &Path) -> Result<ConductorStore> {
    if !path.exists() {
        return Ok(ConductorStore::new());
    }

    let content =
        std::fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Parsing {}", path.display()))
}

fn save(path: &Path, store: &ConductorStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp = path.with_extension("json.tmp");
    std::fs::write(&temp, serde_json::to_string_pretty(store)?)?;
    std::fs::rename(&temp, path)?;
    Ok(())
}

/// Run one zome call against the DNA's store, persisting it after a create.
pub fn call(store_dir: &Path, call: &ZomeCall) -> Result<serde_json::Value> {
    let path = store_path(store_dir, call)?;
    let mut store = load(&path)?;

    let result = store.dispatch(call)?;

    if call.fn_name == CreateCalendarEvent::fn_name() {
        save(&path, &store)?;
    }

    Ok(result)
}
