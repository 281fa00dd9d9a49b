//! Session-immutable snapshot of the mesh directory.
//!
//! Loaded once from the gateway's hello frame; there is no live refresh.
//! Lookups are total: a node the radio has not heard of resolves to
//! [`UNKNOWN_NAME`] rather than an error.

use std::collections::{BTreeMap, BTreeSet};

use crate::packet::{ChannelInfo, NodeInfo};

/// Display name used for any node id the directory does not know.
pub const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct Directory {
    local_id: String,
    nodes: BTreeMap<String, String>,
    channels: BTreeSet<u32>,
}

impl Directory {
    /// Builds the node map and enabled-channel set. An empty node snapshot
    /// is tolerated: the prompt falls back to [`UNKNOWN_NAME`].
    pub fn load(local_id: &str, nodes: &[NodeInfo], channels: &[ChannelInfo]) -> Self {
        if nodes.is_empty() {
            tracing::warn!("gateway reported no known nodes");
        }
        Self {
            local_id: local_id.to_string(),
            nodes: nodes
                .iter()
                .map(|node| (node.id.clone(), node.short_name.clone()))
                .collect(),
            channels: channels
                .iter()
                .filter(|channel| channel.is_enabled())
                .map(|channel| channel.index)
                .collect(),
        }
    }

    pub fn resolve_name(&self, id: &str) -> &str {
        self.nodes.get(id).map_or(UNKNOWN_NAME, String::as_str)
    }

    pub fn is_valid_channel(&self, index: u32) -> bool {
        self.channels.contains(&index)
    }

    /// Short name of the node this session is attached to, for the prompt.
    pub fn local_display_name(&self) -> &str {
        self.resolve_name(&self.local_id)
    }

    /// Known nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
    }

    /// Enabled channel indices in ascending order.
    pub fn channel_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.channels.iter().copied()
    }
}
