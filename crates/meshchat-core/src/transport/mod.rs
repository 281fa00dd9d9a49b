//! Gateway link: connection targets, the link worker tasks, and the
//! command handle the session loop sends through.
//!
//! The radio itself sits behind a gateway daemon that speaks
//! newline-delimited JSON frames over TCP or a serial device. Connecting
//! performs the hello handshake (which carries the node and channel
//! snapshot), then spawns a reader task feeding inbound packets into an
//! mpsc channel and a writer task draining [`TransportCommand`]s. The
//! session loop never touches the link directly.

mod gateway;

pub use gateway::{GatewayFrame, HelloFrame, SendTextFrame};

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, error::SendError, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_serial::SerialPortBuilderExt;

use crate::error::{TargetParseError, TransportError};
use crate::packet::{ChannelInfo, NodeInfo, PacketEvent};

/// TCP port the gateway daemon listens on.
pub const DEFAULT_TCP_PORT: u16 = 4403;

/// Baud rate for serial gateway links.
pub const SERIAL_BAUD: u32 = 115_200;

/// Where to reach the gateway, parsed from the single CLI argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    Tcp(Ipv4Addr),
    Serial(PathBuf),
}

impl ConnectionTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            ConnectionTarget::Tcp(_) => "tcp",
            ConnectionTarget::Serial(_) => "serial",
        }
    }
}

impl FromStr for ConnectionTarget {
    type Err = TargetParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if let Ok(ip) = raw.parse::<Ipv4Addr>() {
            return Ok(ConnectionTarget::Tcp(ip));
        }
        if raw.contains('/') {
            return Ok(ConnectionTarget::Serial(PathBuf::from(raw)));
        }
        Err(TargetParseError(raw.to_string()))
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionTarget::Tcp(ip) => write!(f, "{ip}"),
            ConnectionTarget::Serial(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Commands the session loop sends to the link writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCommand {
    SendText {
        text: String,
        destination: Option<String>,
        channel: u32,
    },
    Shutdown,
}

/// Clone-able handle over the link's command channel. Sends are
/// fire-and-forget: delivery acknowledgment is the gateway's business.
#[derive(Debug, Clone)]
pub struct RadioHandle {
    command_tx: UnboundedSender<TransportCommand>,
}

impl RadioHandle {
    pub fn new(command_tx: UnboundedSender<TransportCommand>) -> Self {
        Self { command_tx }
    }

    pub fn send(&self, command: TransportCommand) -> Result<(), SendError<TransportCommand>> {
        self.command_tx.send(command)
    }

    pub fn send_text(
        &self,
        text: String,
        destination: Option<String>,
        channel: u32,
    ) -> Result<(), SendError<TransportCommand>> {
        self.send(TransportCommand::SendText {
            text,
            destination,
            channel,
        })
    }
}

/// A connected gateway link: the hello snapshot plus the running worker
/// tasks. The packet receiver is taken once by the session loop.
pub struct Radio {
    local_id: String,
    nodes: Vec<NodeInfo>,
    channels: Vec<ChannelInfo>,
    handle: RadioHandle,
    packet_rx: Option<UnboundedReceiver<PacketEvent>>,
    read_worker: Option<JoinHandle<()>>,
    write_worker: Option<JoinHandle<()>>,
}

/// Connects to the gateway named by `target` and completes the handshake.
pub async fn connect(target: &ConnectionTarget) -> Result<Radio, TransportError> {
    match target {
        ConnectionTarget::Tcp(ip) => {
            let addr = SocketAddr::new(IpAddr::V4(*ip), DEFAULT_TCP_PORT);
            let stream = TcpStream::connect(addr)
                .await
                .map_err(|source| TransportError::Connect {
                    target: addr.to_string(),
                    source,
                })?;
            Radio::start(stream).await
        }
        ConnectionTarget::Serial(path) => {
            let stream = tokio_serial::new(path.to_string_lossy(), SERIAL_BAUD)
                .open_native_async()
                .map_err(|source| TransportError::Serial {
                    path: path.display().to_string(),
                    source,
                })?;
            Radio::start(stream).await
        }
    }
}

impl Radio {
    /// Attaches to an already-established gateway stream: reads the hello
    /// frame, then spawns the link workers.
    pub async fn start<S>(stream: S) -> Result<Self, TransportError>
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        let mut reader = BufReader::new(reader);

        let mut first = String::new();
        if reader.read_line(&mut first).await? == 0 {
            return Err(TransportError::HandshakeClosed);
        }
        let hello = match serde_json::from_str::<GatewayFrame>(first.trim_end()) {
            Ok(GatewayFrame::Hello(hello)) => hello,
            Ok(_) => return Err(TransportError::HandshakeUnexpected),
            Err(err) => return Err(TransportError::Handshake(err)),
        };

        let (packet_tx, packet_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let read_worker = tokio::spawn(async move {
            if let Err(err) = gateway::read_loop(reader, packet_tx).await {
                tracing::warn!(%err, "gateway read worker exited with error");
            }
        });
        let write_worker = tokio::spawn(async move {
            if let Err(err) = gateway::write_loop(writer, command_rx).await {
                tracing::warn!(%err, "gateway write worker exited with error");
            }
        });

        Ok(Self {
            local_id: hello.local_id,
            nodes: hello.nodes,
            channels: hello.channels,
            handle: RadioHandle::new(command_tx),
            packet_rx: Some(packet_rx),
            read_worker: Some(read_worker),
            write_worker: Some(write_worker),
        })
    }

    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    pub fn nodes(&self) -> &[NodeInfo] {
        &self.nodes
    }

    pub fn channels(&self) -> &[ChannelInfo] {
        &self.channels
    }

    pub fn handle(&self) -> RadioHandle {
        self.handle.clone()
    }

    pub fn take_packet_rx(&mut self) -> Option<UnboundedReceiver<PacketEvent>> {
        self.packet_rx.take()
    }

    /// Graceful close: flush the writer side, then stop reading. Serial
    /// links never see EOF, so the reader is aborted rather than joined.
    pub async fn shutdown(mut self) {
        let _ = self.handle.send(TransportCommand::Shutdown);
        if let Some(write_worker) = self.write_worker.take() {
            let _ = write_worker.await;
        }
        if let Some(read_worker) = self.read_worker.take() {
            read_worker.abort();
            let _ = read_worker.await;
        }
    }
}
