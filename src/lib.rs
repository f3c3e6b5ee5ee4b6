//! Wire-level data model and codec for the Telegram Bot API.
//!
//! Typed requests are encoded to JSON, or to a multipart body when they carry
//! uploads; responses are unwrapped from their `ok`/`result` envelope and
//! decoded, polymorphic objects included. Network I/O is left to a
//! [`client::Transport`] implementation.

#[macro_use]
mod macros;

pub mod args;
pub mod cache;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod input_file;
pub mod logging;
pub mod methods;
pub mod multipart;
pub mod registry;
pub mod response;
pub mod types;

pub use client::{Bot, ClientError, Transport};
pub use error::{CodecError, ProtocolError};
pub use input_file::InputFile;
pub use methods::Method;
pub use multipart::{Payload, build_payload};
pub use registry::{Discriminator, Hierarchy, UnknownVariant};
pub use response::{ApiResponse, ResponseParameters};
