//! Poll-dispatch loop
//!
//! Each iteration announces the current [`FinishStatus`] on `/finish` and acts
//! on the answer:
//!
//! - `202`: nothing pending, poll again (after the optional idle backoff)
//! - bootstrap input (epoch 0, input 0): record the rollup address, status unchanged
//! - anything else: dispatch to the handler for its type and keep the returned status
//!
//! Request-level failures (bad payload, unknown type, model error) turn into a
//! `reject` for the next `/finish` unless the policy is [`ErrorPolicy::Halt`].
//! Failures talking to the rollup server always stop the loop.

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use super::RunnerConfig;
use super::http::{RollupClient, TransportError};
use crate::config::ErrorPolicy;
use crate::handlers::{HandlerError, HandlerRegistry};
use crate::observability::Metrics;
use crate::rollup::{FinishResponse, FinishStatus, RequestType, RollupRequest, UnknownRequestType};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    UnknownRequestType(#[from] UnknownRequestType),

    #[error("{request_type} handler failed: {source}")]
    Handler {
        request_type: RequestType,
        #[source]
        source: HandlerError,
    },

    #[error("bootstrap input carries no msg_sender")]
    MissingBootstrapSender,

    #[error("rollup server unavailable: {0}")]
    Transport(#[from] TransportError),
}

impl DispatchError {
    /// Whether the loop can go on after this error
    ///
    /// Losing the rollup server is never recoverable from inside the loop.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DispatchError::Transport(_)
                | DispatchError::Handler {
                    source: HandlerError::Transport(_),
                    ..
                }
        )
    }
}

/// Outcome of one loop iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Idle,
    Bootstrap {
        rollup_address: String,
    },
    Handled {
        request_type: RequestType,
        status: FinishStatus,
    },
    Rejected {
        reason: String,
    },
}

pub struct Runner {
    client: Arc<dyn RollupClient>,
    registry: HandlerRegistry,
    config: RunnerConfig,
    metrics: Arc<Metrics>,
    status: FinishStatus,
    rollup_address: Option<String>,
}

impl Runner {
    pub fn new(client: Arc<dyn RollupClient>, registry: HandlerRegistry, config: RunnerConfig) -> Self {
        Self {
            client,
            registry,
            config,
            metrics: Arc::new(Metrics::new()),
            status: FinishStatus::Accept,
            rollup_address: None,
        }
    }

    /// Status that the next `/finish` will announce
    pub fn status(&self) -> FinishStatus {
        self.status
    }

    /// Address captured from the bootstrap input, once seen
    pub fn rollup_address(&self) -> Option<&str> {
        self.rollup_address.as_deref()
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Poll forever
    pub async fn run(&mut self) -> Result<(), DispatchError> {
        loop {
            if let Err(err) = self.step().await {
                return Err(self.stopped(err));
            }
        }
    }

    /// Poll until `shutdown` resolves
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<(), DispatchError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!(metrics = ?self.metrics.snapshot(), "Shutdown signal received");
                    return Ok(());
                }
                step = self.step() => {
                    if let Err(err) = step {
                        return Err(self.stopped(err));
                    }
                }
            }
        }
    }

    fn stopped(&self, err: DispatchError) -> DispatchError {
        error!(error = %err, metrics = ?self.metrics.snapshot(), "Rollup loop stopped");
        err
    }

    /// Run one finish/dispatch iteration
    pub async fn step(&mut self) -> Result<Step, DispatchError> {
        let request = match self.client.finish(self.status).await? {
            FinishResponse::Idle => {
                info!("No pending rollup request, trying again");
                self.metrics.idle_poll();
                if !self.config.idle_backoff.is_zero() {
                    tokio::time::sleep(self.config.idle_backoff).await;
                }
                return Ok(Step::Idle);
            }
            FinishResponse::Request(request) => request,
        };

        let outcome = if request.data.is_bootstrap() {
            match request.data.bootstrap_sender() {
                Some(sender) => {
                    info!(rollup_address = sender, "Captured rollup address");
                    self.rollup_address = Some(sender.to_string());
                    self.metrics.bootstrap();
                    return Ok(Step::Bootstrap {
                        rollup_address: sender.to_string(),
                    });
                }
                None => Err(DispatchError::MissingBootstrapSender),
            }
        } else {
            self.dispatch(&request).await
        };

        match outcome {
            Ok((request_type, status)) => {
                self.status = status;
                Ok(Step::Handled {
                    request_type,
                    status,
                })
            }
            Err(err) if err.is_fatal() || self.config.on_error == ErrorPolicy::Halt => {
                error!(error = %err, request_type = %request.request_type, "Request handling failed");
                Err(err)
            }
            Err(err) => {
                warn!(error = %err, request_type = %request.request_type, "Rejecting request");
                self.status = FinishStatus::Reject;
                self.metrics.request_rejected();
                Ok(Step::Rejected {
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Route a request to its handler
    pub async fn dispatch(
        &self,
        request: &RollupRequest,
    ) -> Result<(RequestType, FinishStatus), DispatchError> {
        let request_type = request.kind()?;
        let handler = self.registry.get(request_type);

        let status = handler
            .handle(&request.data, self.client.as_ref())
            .await
            .map_err(|source| DispatchError::Handler {
                request_type,
                source,
            })?;

        match request_type {
            RequestType::AdvanceState => self.metrics.advance_handled(),
            RequestType::InspectState => self.metrics.inspect_handled(),
        }

        Ok((request_type, status))
    }
}
