use thiserror::Error;

use crate::domain::simulator::clock::Tick;
use crate::domain::utils::id::{NodeId, RequestId};

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse simulation config JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write statistics: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to build simulation model: {0}")]
    ModelConstructionError(String),

    #[error("Invalid request {id}: units ({units}) and duration ({duration}) must both be positive")]
    InvalidRequest { id: RequestId, units: u64, duration: Tick },

    #[error("Internal scheduler error: {0}")]
    Internal(String),
}

/// Failure of a reservation attempt on the [`ResourceSet`](crate::domain::resource::resource_set::ResourceSet).
///
/// Both variants are ordinary outcomes at this level; the scheduler decides
/// which of them is a contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReserveError {
    #[error("Node {0} does not exist")]
    NotFound(NodeId),

    #[error("Node {node} has {spare} spare units, {requested} requested")]
    NoResource { node: NodeId, requested: u64, spare: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
