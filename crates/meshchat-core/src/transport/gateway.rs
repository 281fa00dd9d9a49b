//! Wire framing for the gateway link.
//!
//! One JSON object per line, tagged with `type`. The gateway opens every
//! connection with a `hello` frame carrying the node and channel snapshot;
//! after that it streams `packet` frames, and the client writes `send_text`
//! frames. Anything else on the line is noise the client skips.

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::error::TransportError;
use crate::packet::{ChannelInfo, NodeInfo, PacketEvent};
use crate::transport::TransportCommand;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GatewayFrame {
    Hello(HelloFrame),
    Packet(PacketEvent),
    SendText(SendTextFrame),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloFrame {
    pub local_id: String,
    pub nodes: Vec<NodeInfo>,
    pub channels: Vec<ChannelInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTextFrame {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub channel: u32,
}

/// Drains inbound frames until the link closes or the session side hangs
/// up. Malformed and unexpected frames are skipped; the session must not
/// die because the link hiccuped.
pub(crate) async fn read_loop<R>(
    mut reader: R,
    packet_tx: UnboundedSender<PacketEvent>,
) -> Result<(), TransportError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            tracing::info!("gateway closed the link");
            break;
        }
        match serde_json::from_str::<GatewayFrame>(line.trim_end()) {
            Ok(GatewayFrame::Packet(packet)) => {
                if packet_tx.send(packet).is_err() {
                    break;
                }
            }
            Ok(_) => tracing::debug!("ignoring unexpected gateway frame"),
            Err(err) => tracing::debug!(%err, "ignoring malformed gateway frame"),
        }
    }
    Ok(())
}

/// Writes queued commands onto the link until shutdown.
pub(crate) async fn write_loop<W>(
    mut writer: W,
    mut command_rx: UnboundedReceiver<TransportCommand>,
) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(command) = command_rx.recv().await {
        match command {
            TransportCommand::SendText {
                text,
                destination,
                channel,
            } => {
                let frame = GatewayFrame::SendText(SendTextFrame {
                    text,
                    destination,
                    channel,
                });
                write_frame(&mut writer, &frame).await?;
            }
            TransportCommand::Shutdown => break,
        }
    }
    let _ = writer.shutdown().await;
    Ok(())
}

async fn write_frame<W>(writer: &mut W, frame: &GatewayFrame) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    let mut encoded = serde_json::to_vec(frame).map_err(TransportError::Encode)?;
    encoded.push(b'\n');
    writer.write_all(&encoded).await?;
    writer.flush().await?;
    Ok(())
}
