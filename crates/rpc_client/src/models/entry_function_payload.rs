// Copyright (C) 2015-2025 The Neo Project.
//
// entry_function_payload.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload type tag understood by injected wallets
pub const ENTRY_FUNCTION_PAYLOAD_TYPE: &str = "entry_function_payload";

/// State-mutating entry function call handed to a wallet for signing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryFunctionPayload {
    /// Always `entry_function_payload`
    #[serde(rename = "type")]
    pub payload_type: String,

    /// Fully qualified function id
    pub function: String,

    /// Generic type arguments, empty for the skill token module
    pub type_arguments: Vec<String>,

    /// Ordered arguments
    pub arguments: Vec<Value>,
}

impl EntryFunctionPayload {
    /// Creates an entry function payload without type arguments
    pub fn new(function: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            payload_type: ENTRY_FUNCTION_PAYLOAD_TYPE.to_string(),
            function: function.into(),
            type_arguments: Vec::new(),
            arguments,
        }
    }

    /// `mint_skill_token(skill_name, skill_level)`
    pub fn mint_skill_token(function: impl Into<String>, skill_name: &str, skill_level: u64) -> Self {
        Self::new(
            function,
            vec![Value::String(skill_name.to_string()), Value::from(skill_level)],
        )
    }
}
