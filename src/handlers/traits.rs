use async_trait::async_trait;
use thiserror::Error;

use crate::codec::DecodingError;
use crate::model::ModelError;
use crate::rollup::{FinishStatus, RequestData};
use crate::worker::http::{RollupClient, TransportError};

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("payload decoding failed: {0}")]
    Decoding(#[from] DecodingError),
    #[error("model failed: {0}")]
    Model(#[from] ModelError),
    #[error("rollup server call failed: {0}")]
    Transport(#[from] TransportError),
}

/// Rollup request handler
///
/// A handler consumes the `data` section of one request, emits whatever
/// notices or reports it needs through `client`, and returns the status to
/// announce on the next `/finish`.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle(
        &self,
        data: &RequestData,
        client: &dyn RollupClient,
    ) -> Result<FinishStatus, HandlerError>;
}
