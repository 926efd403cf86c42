use std::fmt;

use serde::Deserialize;

/// How an operation relates to the ambient transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// No transaction is started for the operation.
    NotRequired,
    /// Reuses the active transaction, or opens one when none is active.
    Required,
    /// Always opens a new transaction. This is not a savepoint: the session
    /// decides how an inner begin relates to an outer one.
    Nested,
}

impl Policy {
    /// Tells whether a call under this policy opens (and therefore owns) a
    /// transaction, given whether one is already active.
    pub fn opens_transaction(self, transaction_active: bool) -> bool {
        match self {
            Policy::NotRequired => false,
            Policy::Required => !transaction_active,
            Policy::Nested => true,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::NotRequired => "not required",
            Policy::Required => "required",
            Policy::Nested => "nested",
        };
        f.write_str(name)
    }
}
