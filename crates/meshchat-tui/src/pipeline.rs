//! Inbound packets and local echoes become formatted scroll-back lines.
//!
//! Only text-message packets produce output; every other port is skipped
//! without comment. A payload that is not UTF-8 is dropped with a warning
//! rather than taking the session down.

use chrono::Local;

use meshchat_core::directory::Directory;
use meshchat_core::packet::{PacketEvent, PortNum};

use crate::scrollback::LogLine;

pub(crate) fn ingest(packet: &PacketEvent, directory: &Directory) -> Vec<LogLine> {
    lines_for(packet, directory, &timestamp())
}

/// Echo for a public message this client just sent.
pub(crate) fn echo_public(prompt: &str, text: &str) -> LogLine {
    LogLine::public(format!("{} {prompt} {text}", timestamp()))
}

/// Echo for a private message this client just sent.
pub(crate) fn echo_private(
    prompt: &str,
    destination: &str,
    destination_name: &str,
    text: &str,
) -> LogLine {
    LogLine::private(format!(
        "{} {prompt} to {destination} ({destination_name}) 📩 {text}",
        timestamp()
    ))
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn lines_for(packet: &PacketEvent, directory: &Directory, stamp: &str) -> Vec<LogLine> {
    let Some(decoded) = &packet.decoded else {
        return Vec::new();
    };
    if decoded.portnum != PortNum::TextMessageApp {
        return Vec::new();
    }
    let text = match std::str::from_utf8(&decoded.payload) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(from = %packet.from_id, %err, "dropping text packet with non-UTF-8 payload");
            return Vec::new();
        }
    };

    let sender = directory.resolve_name(&packet.from_id);
    if packet.is_broadcast() {
        text.lines()
            .map(|line| LogLine::public(format!("{stamp} {sender}: {line}")))
            .collect()
    } else {
        let recipient = directory.resolve_name(&packet.to_id);
        text.lines()
            .map(|line| {
                LogLine::private(format!(
                    "{stamp} {sender} to {} ({recipient}) 📩 {line}",
                    packet.to_id
                ))
            })
            .collect()
    }
}
