use std::fmt;

/// Marker for service types that opt in to transaction management when
/// strict mode is enabled.
pub trait TransactionalAware {
    /// Name under which declarations for this type are registered.
    const TYPE_NAME: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMetadata {
    pub name: String,
    pub transactional_aware: bool,
}

/// Describes an operation that may be intercepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationMetadata {
    pub owner: TypeMetadata,
    pub name: String,
    pub public: bool,
}

impl OperationMetadata {
    /// A public operation on a type that does not carry the marker.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: TypeMetadata {
                name: type_name.into(),
                transactional_aware: false,
            },
            name: name.into(),
            public: true,
        }
    }

    /// A public operation on a type implementing [`TransactionalAware`].
    pub fn of_aware<T: TransactionalAware>(name: impl Into<String>) -> Self {
        let mut metadata = Self::new(T::TYPE_NAME, name);
        metadata.owner.transactional_aware = true;
        metadata
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }
}

/// Identifies an intercepted call in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub type_name: String,
    pub operation: String,
}

impl InvocationContext {
    pub fn new(type_name: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            operation: operation.into(),
        }
    }
}

impl From<&OperationMetadata> for InvocationContext {
    fn from(value: &OperationMetadata) -> Self {
        Self::new(value.owner.name.clone(), value.name.clone())
    }
}

impl fmt::Display for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.type_name, self.operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Billing;

    impl TransactionalAware for Billing {
        const TYPE_NAME: &'static str = "Billing";
    }

    #[test]
    fn aware_metadata_carries_the_marker() {
        let op = OperationMetadata::of_aware::<Billing>("charge");
        assert_eq!(op.owner.name, "Billing");
        assert!(op.owner.transactional_aware);
        assert!(op.public);
        assert!(!OperationMetadata::new("Billing", "charge").owner.transactional_aware);
    }

    #[test]
    fn context_displays_as_qualified_name() {
        let op = OperationMetadata::new("Billing", "refund").private();
        assert!(!op.public);
        assert_eq!(InvocationContext::from(&op).to_string(), "Billing::refund");
    }
}
