//! Packet and snapshot types shared between the gateway link and the UI.

use serde::{Deserialize, Serialize};

/// Destination id carried by packets addressed to the whole mesh.
pub const BROADCAST_ADDR: &str = "^all";

/// Application-layer port of a decoded packet. Anything the gateway sends
/// that this client does not know about deserializes to `Unknown` and is
/// skipped upstream rather than rejected at the framing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortNum {
    TextMessageApp,
    PositionApp,
    NodeinfoApp,
    TelemetryApp,
    #[serde(other)]
    Unknown,
}

/// Decoded portion of a packet. Absent entirely for packets the gateway
/// could not decrypt or parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub portnum: PortNum,
    pub payload: Vec<u8>,
}

/// One application-layer packet event as delivered by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketEvent {
    #[serde(default)]
    pub decoded: Option<Decoded>,
    pub from_id: String,
    pub to_id: String,
}

impl PacketEvent {
    pub fn is_broadcast(&self) -> bool {
        self.to_id == BROADCAST_ADDR
    }
}

/// One known node from the gateway's hello snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub id: String,
    pub short_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelRole {
    Disabled,
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub index: u32,
    pub role: ChannelRole,
}

impl ChannelInfo {
    pub fn is_enabled(&self) -> bool {
        self.role != ChannelRole::Disabled
    }
}
