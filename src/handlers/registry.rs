use std::sync::Arc;

use super::advance::AdvanceHandler;
use super::inspect::InspectHandler;
use super::traits::RequestHandler;
use crate::model::Classifier;
use crate::rollup::RequestType;

/// One handler per [`RequestType`]
///
/// Every request type has exactly one slot, so a lookup by type cannot miss.
/// Raw tags are parsed into [`RequestType`] before they get here.
#[derive(Clone)]
pub struct HandlerRegistry {
    advance: Arc<dyn RequestHandler>,
    inspect: Arc<dyn RequestHandler>,
}

impl HandlerRegistry {
    pub fn new(advance: Arc<dyn RequestHandler>, inspect: Arc<dyn RequestHandler>) -> Self {
        Self { advance, inspect }
    }

    /// Registry with the sentiment advance handler and the echo inspect handler
    pub fn with_defaults(classifier: Arc<dyn Classifier>) -> Self {
        Self::new(
            Arc::new(AdvanceHandler::new(classifier)),
            Arc::new(InspectHandler::new()),
        )
    }

    /// Replace the handler for one request type
    pub fn register(&mut self, request_type: RequestType, handler: Arc<dyn RequestHandler>) {
        match request_type {
            RequestType::AdvanceState => self.advance = handler,
            RequestType::InspectState => self.inspect = handler,
        }
    }

    pub fn get(&self, request_type: RequestType) -> Arc<dyn RequestHandler> {
        match request_type {
            RequestType::AdvanceState => Arc::clone(&self.advance),
            RequestType::InspectState => Arc::clone(&self.inspect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerError;
    use crate::model::ModelError;
    use crate::rollup::{FinishStatus, RequestData};
    use crate::testing::RecordingClient;
    use crate::worker::http::RollupClient;
    use async_trait::async_trait;

    struct Echo;

    impl Classifier for Echo {
        fn classify(&self, text: &str) -> Result<String, ModelError> {
            Ok(text.to_string())
        }
    }

    struct AlwaysReject;

    #[async_trait]
    impl RequestHandler for AlwaysReject {
        async fn handle(
            &self,
            _data: &RequestData,
            _client: &dyn RollupClient,
        ) -> Result<FinishStatus, HandlerError> {
            Ok(FinishStatus::Reject)
        }
    }

    fn data() -> RequestData {
        RequestData {
            payload: "0x4869".to_string(),
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_defaults_route_by_type() {
        let registry = HandlerRegistry::with_defaults(Arc::new(Echo));
        let client = RecordingClient::default();

        let advance = registry.get(RequestType::AdvanceState);
        advance.handle(&data(), &client).await.unwrap();
        assert_eq!(client.notices().len(), 1);
        assert!(client.reports().is_empty());

        let inspect = registry.get(RequestType::InspectState);
        inspect.handle(&data(), &client).await.unwrap();
        assert_eq!(client.reports().len(), 1);
        assert_eq!(client.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_register_replaces_handler() {
        let mut registry = HandlerRegistry::with_defaults(Arc::new(Echo));
        registry.register(RequestType::InspectState, Arc::new(AlwaysReject));

        let client = RecordingClient::default();
        let status = registry
            .get(RequestType::InspectState)
            .handle(&data(), &client)
            .await
            .unwrap();

        assert_eq!(status, FinishStatus::Reject);
        assert!(client.reports().is_empty());
    }
}
