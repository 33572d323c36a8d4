// Copyright (C) 2015-2025 The Neo Project.
//
// view_request.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-only view function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRequest {
    /// Fully qualified function id, `<address>::<module>::<function>`
    pub function: String,

    /// Generic type arguments
    pub type_arguments: Vec<String>,

    /// Positional arguments
    pub arguments: Vec<Value>,
}

impl ViewRequest {
    /// Creates a view request without type arguments
    pub fn new(function: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            function: function.into(),
            type_arguments: Vec::new(),
            arguments,
        }
    }

    /// `get_user_tokens(owner)` for an already normalized address
    pub fn get_user_tokens(function: impl Into<String>, owner: &str) -> Self {
        Self::new(function, vec![Value::String(owner.to_string())])
    }
}
