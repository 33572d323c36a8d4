// Copyright (C) 2015-2025 The Neo Project.
//
// committed_transaction.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transaction type reported while a transaction sits in the mempool
const PENDING_TRANSACTION_TYPE: &str = "pending_transaction";

/// A transaction the ledger has committed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedTransaction {
    /// Transaction hash
    pub hash: String,

    /// Ledger version the transaction was committed at
    pub version: Option<String>,

    /// Whether execution succeeded
    pub success: bool,

    /// VM status string, `Executed successfully` on success
    pub vm_status: String,
}

/// Result of looking a transaction up by hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionLookup {
    /// Known to the ledger but not committed yet
    Pending,
    /// Committed, successfully or not
    Committed(CommittedTransaction),
}

impl TransactionLookup {
    /// Parses a `transactions/by_hash` response body
    pub fn from_json(json: &Value) -> Result<Self, String> {
        let obj = json
            .as_object()
            .ok_or_else(|| "Transaction response is not an object".to_string())?;

        let tx_type = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or("Missing or invalid 'type' field")?;

        if tx_type == PENDING_TRANSACTION_TYPE {
            return Ok(TransactionLookup::Pending);
        }

        let hash = obj
            .get("hash")
            .and_then(Value::as_str)
            .ok_or("Missing or invalid 'hash' field")?
            .to_string();

        let success = obj
            .get("success")
            .and_then(Value::as_bool)
            .ok_or("Missing or invalid 'success' field")?;

        let vm_status = obj
            .get("vm_status")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let version = obj.get("version").and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Ok(TransactionLookup::Committed(CommittedTransaction {
            hash,
            version,
            success,
            vm_status,
        }))
    }
}
