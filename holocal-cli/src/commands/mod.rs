pub mod calendar;
pub mod get;
pub mod init;
pub mod list;
pub mod new;

use holocal_core::EventService;
use holocal_core::config::HolocalConfig;
use holocal_core::zome::ProcessTransport;

/// Service talking to the configured conductor bridge.
pub fn connect(config: &HolocalConfig) -> EventService<ProcessTransport> {
    EventService::with_zome_name(
        ProcessTransport::new(&config.conductor),
        config.cell_id(),
        &config.zome_name,
    )
}
