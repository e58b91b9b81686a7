use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::traits::{HandlerError, RequestHandler};
use crate::codec;
use crate::model::Classifier;
use crate::rollup::{FinishStatus, Notice, RequestData};
use crate::worker::http::RollupClient;

/// Classifies the decoded payload and emits the label as a notice
#[derive(Clone)]
pub struct AdvanceHandler {
    classifier: Arc<dyn Classifier>,
}

impl AdvanceHandler {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}

#[async_trait]
impl RequestHandler for AdvanceHandler {
    async fn handle(
        &self,
        data: &RequestData,
        client: &dyn RollupClient,
    ) -> Result<FinishStatus, HandlerError> {
        info!(payload = %data.payload, "Received advance request data");

        let text = codec::decode(&data.payload)?;
        let sentiment = self.classifier.classify(&text)?;
        info!(text = %text, sentiment = %sentiment, "Inference of sentiment");

        info!("Adding notice");
        let notice = Notice {
            payload: codec::encode(&sentiment),
        };
        let status_code = client.send_notice(&notice).await?;
        info!(status_code, "Received notice status");

        Ok(FinishStatus::Accept)
    }
}
