use serde::Deserialize;

use crate::core::domain::error_kind::ErrorKind;
use crate::core::domain::policy::Policy;

/// Defaults shared by the resolver and the interceptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionalConfig {
    #[serde(default = "default_policy")]
    pub default_policy: Policy,

    #[serde(default)]
    pub default_no_rollback_exceptions: Vec<ErrorKind>,

    /// Only types implementing `TransactionalAware` are intercepted.
    #[serde(default)]
    pub strict_mode: bool,
}

impl Default for TransactionalConfig {
    fn default() -> Self {
        Self {
            default_policy: default_policy(),
            default_no_rollback_exceptions: Vec::new(),
            strict_mode: false,
        }
    }
}

fn default_policy() -> Policy {
    Policy::Required
}
