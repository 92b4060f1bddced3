//! The remote call surface.
//!
//! Every interaction with the store is a single zome call: a function name
//! and a JSON payload, scoped to a cell. [`ZomeTransport`] is the one async
//! primitive the rest of the crate depends on; [`protocol`] binds each
//! function name to its payload and result shapes.

pub mod memory;
pub mod process;
pub mod protocol;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cell::{AgentPubKey, CellId};
use crate::error::CalendarResult;

pub use memory::MemoryConductor;
pub use process::ProcessTransport;
pub use protocol::ZomeFunction;

/// A fully addressed zome call. Also the request line of the process protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZomeCall {
    pub cell_id: CellId,
    pub zome_name: String,
    pub fn_name: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub provenance: AgentPubKey,
    #[serde(default)]
    pub cap_secret: Option<String>,
}

/// Sends a zome call and yields the raw result.
///
/// Any rejection (transport, auth or zome-side) is reported as
/// [`crate::CalendarError::Transport`]. Implementations neither retry nor time out.
#[async_trait]
pub trait ZomeTransport: Send + Sync {
    async fn call_zome(&self, call: ZomeCall) -> CalendarResult<serde_json::Value>;
}

#[async_trait]
impl<T: ZomeTransport + ?Sized> ZomeTransport for Arc<T> {
    async fn call_zome(&self, call: ZomeCall) -> CalendarResult<serde_json::Value> {
        (**self).call_zome(call).await
    }
}
