//! In-memory rollup server for unit tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

use crate::rollup::{FinishResponse, FinishStatus, Notice, Report, RequestData, RollupRequest};
use crate::worker::http::{Result, RollupClient, TransportError};

/// Scripted [`RollupClient`] that records everything sent to it
///
/// `finish` pops the next scripted response; an exhausted script yields a
/// transport error so loops under test stop.
#[derive(Default)]
pub struct RecordingClient {
    script: Mutex<VecDeque<Result<FinishResponse>>>,
    finishes: Mutex<Vec<FinishStatus>>,
    notices: Mutex<Vec<Notice>>,
    reports: Mutex<Vec<Report>>,
}

impl RecordingClient {
    pub fn scripted(responses: impl IntoIterator<Item = FinishResponse>) -> Self {
        let client = Self::default();
        client
            .script
            .lock()
            .unwrap()
            .extend(responses.into_iter().map(Ok));
        client
    }

    pub fn push_error(&self, error: TransportError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    pub fn finishes(&self) -> Vec<FinishStatus> {
        self.finishes.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl RollupClient for RecordingClient {
    async fn finish(&self, status: FinishStatus) -> Result<FinishResponse> {
        self.finishes.lock().unwrap().push(status);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::RequestFailed("script exhausted".to_string())))
    }

    async fn send_notice(&self, notice: &Notice) -> Result<u16> {
        self.notices.lock().unwrap().push(notice.clone());
        Ok(201)
    }

    async fn send_report(&self, report: &Report) -> Result<u16> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(202)
    }
}

pub fn request(request_type: &str, payload: &str) -> FinishResponse {
    FinishResponse::Request(RollupRequest {
        request_type: request_type.to_string(),
        data: RequestData {
            payload: payload.to_string(),
            metadata: None,
        },
    })
}

/// Shared sink for capturing formatted log lines in tests
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
