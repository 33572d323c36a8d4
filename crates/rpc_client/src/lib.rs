// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! SkillToken Ledger Client Library
//!
//! This crate provides the ledger-facing half of the SkillToken client: the
//! `LedgerClient` abstraction, a REST implementation for fullnodes, and the
//! wire models for view calls and entry function payloads.

pub mod models;
mod ledger_client;
mod rpc_client;
mod rpc_error;

pub use ledger_client::LedgerClient;
pub use rpc_client::{RpcClient, DEFAULT_TRANSACTION_POLL_INTERVAL};
pub use rpc_error::RpcError;

// Re-export commonly used types
pub use models::{CommittedTransaction, EntryFunctionPayload, TransactionLookup, ViewRequest};
