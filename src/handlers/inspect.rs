use async_trait::async_trait;
use tracing::info;

use super::traits::{HandlerError, RequestHandler};
use crate::rollup::{FinishStatus, Report, RequestData};
use crate::worker::http::RollupClient;

/// Echoes the raw payload back as a report
///
/// The payload is forwarded as received, without decoding.
#[derive(Debug, Clone, Default)]
pub struct InspectHandler;

impl InspectHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RequestHandler for InspectHandler {
    async fn handle(
        &self,
        data: &RequestData,
        client: &dyn RollupClient,
    ) -> Result<FinishStatus, HandlerError> {
        info!(payload = %data.payload, "Received inspect request data");

        info!("Adding report");
        let report = Report {
            payload: data.payload.clone(),
        };
        let status_code = client.send_report(&report).await?;
        info!(status_code, "Received report status");

        Ok(FinishStatus::Accept)
    }
}
