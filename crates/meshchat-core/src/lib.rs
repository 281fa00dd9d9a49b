pub mod directory;
pub mod error;
pub mod logging;
pub mod packet;
pub mod transport;

pub use directory::Directory;
pub use error::{TargetParseError, TransportError};
pub use packet::{ChannelInfo, ChannelRole, Decoded, NodeInfo, PacketEvent, PortNum};
pub use transport::{ConnectionTarget, Radio, RadioHandle, TransportCommand};
