// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Wire models exchanged with the ledger and the wallet provider.

mod committed_transaction;
mod entry_function_payload;
mod view_request;

pub use committed_transaction::{CommittedTransaction, TransactionLookup};
pub use entry_function_payload::{EntryFunctionPayload, ENTRY_FUNCTION_PAYLOAD_TYPE};
pub use view_request::ViewRequest;
