//! Cell addressing: which DNA and which agent every zome call is scoped to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hash of the DNA (the store identity) a cell runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DnaHash(pub String);

/// Public key of the calling agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentPubKey(pub String);

/// The (store, caller) pair that scopes every zome call.
///
/// Serializes as a two-element array, matching the conductor's cell id shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(pub DnaHash, pub AgentPubKey);

impl CellId {
    pub fn new(dna_hash: impl Into<String>, agent_pub_key: impl Into<String>) -> Self {
        CellId(DnaHash(dna_hash.into()), AgentPubKey(agent_pub_key.into()))
    }

    pub fn dna_hash(&self) -> &DnaHash {
        &self.0
    }

    /// The agent half, used as the provenance of every call.
    pub fn agent_pub_key(&self) -> &AgentPubKey {
        &self.1
    }
}

impl fmt::Display for DnaHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AgentPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
