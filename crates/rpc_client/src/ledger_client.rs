// Copyright (C) 2015-2025 The Neo Project.
//
// ledger_client.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::models::{CommittedTransaction, ViewRequest};
use crate::rpc_error::RpcError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Ledger operations the client core depends on.
///
/// `RpcClient` talks to a fullnode over REST; tests and embedders can supply
/// their own transport.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Executes a view function and returns its raw, untrusted return value
    async fn view(&self, request: &ViewRequest) -> Result<Value, RpcError>;

    /// Waits up to `timeout` for `hash` to commit successfully
    async fn wait_for_transaction(
        &self,
        hash: &str,
        timeout: Duration,
    ) -> Result<CommittedTransaction, RpcError>;
}
