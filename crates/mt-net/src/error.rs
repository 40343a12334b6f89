//! Network-subsystem error type.

use thiserror::Error;

use mt_core::NodeId;

/// Errors produced by `mt-net` construction.  Guarded-insertion rejections
/// are *not* errors; see [`EdgeInsert`](crate::graph::EdgeInsert).
#[derive(Debug, Error)]
pub enum NetError {
    #[error("node {0} already exists in the graph")]
    DuplicateNode(NodeId),

    #[error("self-loop road at node {0}")]
    SelfLoop(NodeId),

    #[error("node {0} not found in the graph")]
    NodeNotFound(NodeId),
}

pub type NetResult<T> = Result<T, NetError>;
