//! Rollup protocol types
//!
//! Wire shapes exchanged with the rollup HTTP server:
//!
//! - `POST /finish` with [`FinishRequest`], answered by `202` (idle) or a [`RollupRequest`]
//! - `POST /notice` with a [`Notice`]
//! - `POST /report` with a [`Report`]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Outcome of the most recently handled request, announced on `/finish`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishStatus {
    #[default]
    Accept,
    Reject,
}

impl FinishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishStatus::Accept => "accept",
            FinishStatus::Reject => "reject",
        }
    }
}

impl fmt::Display for FinishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /finish`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishRequest {
    pub status: FinishStatus,
}

/// Closed set of request types the dapp knows how to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    AdvanceState,
    InspectState,
}

impl RequestType {
    pub const ALL: [RequestType; 2] = [RequestType::AdvanceState, RequestType::InspectState];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::AdvanceState => "advance_state",
            RequestType::InspectState => "inspect_state",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag that does not name a known [`RequestType`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown request type: {0}")]
pub struct UnknownRequestType(pub String);

impl FromStr for RequestType {
    type Err = UnknownRequestType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "advance_state" => Ok(RequestType::AdvanceState),
            "inspect_state" => Ok(RequestType::InspectState),
            other => Err(UnknownRequestType(other.to_string())),
        }
    }
}

/// Input metadata attached to advance requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Only the bootstrap input relies on it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_sender: Option<String>,
    pub epoch_index: u64,
    pub input_index: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl Metadata {
    /// The first input of the first epoch carries the rollup's own address
    /// and is not an application request.
    pub fn is_bootstrap(&self) -> bool {
        self.epoch_index == 0 && self.input_index == 0
    }
}

/// `data` section of a rollup request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestData {
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl RequestData {
    pub fn is_bootstrap(&self) -> bool {
        self.metadata.as_ref().is_some_and(Metadata::is_bootstrap)
    }

    /// Address carried by a bootstrap request, if this is one and it has a sender
    pub fn bootstrap_sender(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .filter(|metadata| metadata.is_bootstrap())
            .and_then(|metadata| metadata.msg_sender.as_deref())
    }
}

/// Unit of work returned by `/finish`
///
/// `request_type` stays a raw tag on the wire so that an unknown type can be
/// told apart from a malformed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupRequest {
    pub request_type: String,
    pub data: RequestData,
}

impl RollupRequest {
    pub fn kind(&self) -> Result<RequestType, UnknownRequestType> {
        self.request_type.parse()
    }
}

/// Durable state change emitted by advance handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub payload: String,
}

/// Read-only answer emitted by inspect handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub payload: String,
}

/// What `/finish` handed back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishResponse {
    /// `202 Accepted`: nothing pending
    Idle,
    Request(RollupRequest),
}
