use thiserror::Error;

use crate::core::domain::entity::user::User;
use crate::core::domain::error_kind::{Classify, ErrorKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreateUserValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

impl Classify for CreateUserValidationError {
    fn kind(&self) -> ErrorKind {
        let validation = ErrorKind::from_static("validation.user");
        match self {
            CreateUserValidationError::EmptyName => validation.child("name"),
            CreateUserValidationError::InvalidEmail(_) => validation.child("email"),
        }
    }
}

#[derive(Debug)]
pub struct UnvalidatedCreateUserInput {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl TryFrom<UnvalidatedCreateUserInput> for User {
    type Error = CreateUserValidationError;

    fn try_from(value: UnvalidatedCreateUserInput) -> Result<Self, Self::Error> {
        let name = value.name.trim();
        if name.is_empty() {
            return Err(CreateUserValidationError::EmptyName);
        }
        let email = value.email.trim();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(CreateUserValidationError::InvalidEmail(value.email));
        }
        Ok(User {
            id: value.id,
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}
