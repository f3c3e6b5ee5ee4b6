//! Glue between the codec and an external transport.
//!
//! The crate does not perform network I/O. A [`Transport`] ships the
//! assembled [`Payload`] and hands back the raw response; [`Bot::call`] does
//! the encoding before and the envelope decoding after.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::CodecError;
use crate::methods::Method;
use crate::multipart::{Payload, build_payload_async};
use crate::response::{ApiResponse, decode_envelope_slice};

/// One outgoing call, ready for the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub method: &'static str,
    pub url: String,
    pub payload: Payload,
}

/// Raw response as received by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Ships payloads to the Bot API. Implemented outside this crate.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutgoingRequest) -> anyhow::Result<TransportResponse>;
}

/// Fault while making a call. API-level failures are not errors here; they
/// come back as [`ApiResponse::Failure`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Transport(anyhow::Error),
}

/// Typed front end over a [`Transport`].
pub struct Bot<T> {
    config: Config,
    transport: T,
}

impl<T: Transport> Bot<T> {
    pub fn new(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Encode `method`, send it and decode the envelope of the reply.
    #[instrument(skip(self, method), fields(method = M::NAME))]
    pub async fn call<M>(&self, method: M) -> Result<ApiResponse<M::Response>, ClientError>
    where
        M: Method + Send + 'static,
    {
        let payload = build_payload_async(method).await?;
        debug!(multipart = payload.is_multipart(), "Sending request");

        let response = self
            .transport
            .send(OutgoingRequest {
                method: M::NAME,
                url: self.config.method_url(M::NAME),
                payload,
            })
            .await
            .map_err(ClientError::Transport)?;

        let decoded = decode_envelope_slice(&response.body)?;
        if let ApiResponse::Failure(err) = &decoded {
            warn!(
                status = response.status,
                code = err.code,
                description = %err.description,
                "Bot API call failed"
            );
        }
        Ok(decoded)
    }
}
