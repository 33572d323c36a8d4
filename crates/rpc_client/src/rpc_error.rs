// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_error.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use thiserror::Error;

/// Errors raised while talking to a ledger node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// Transport level failure (connection refused, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Node answered with a non-success status
    #[error("Node returned status {code}: {message}")]
    Status { code: u16, message: String },

    /// Body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Requested resource is unknown to the node
    #[error("Not found: {0}")]
    NotFound(String),

    /// Waiting exceeded the caller's timeout
    #[error("Timed out waiting for transaction {0}")]
    Timeout(String),

    /// Transaction committed but execution failed
    #[error("Transaction {hash} failed: {vm_status}")]
    VmFailure { hash: String, vm_status: String },
}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        RpcError::Http(err.to_string())
    }
}
