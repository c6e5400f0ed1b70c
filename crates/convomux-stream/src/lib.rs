pub mod audio;
pub mod client_trait;
pub mod null_client;
pub mod registry;
pub mod remote_client;
pub mod session;

pub use audio::AudioChannelConfig;
pub use client_trait::{ChannelEvent, ChannelEventKind, StreamClient};
pub use null_client::NullStreamClient;
pub use registry::StreamClientRegistry;
pub use remote_client::RemoteStreamClient;
pub use session::{SessionHandle, SessionLifecycle, SessionRegistry};
