use crate::FieldKey;

/// Registration is all-or-nothing at startup, a duplicate key aborts it.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("a resolver is already registered for {key}")]
    DuplicateField { key: FieldKey },
}

/// Error returned by resolver functions themselves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ResolverError {
    message: String,
}

impl ResolverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&'static str> for ResolverError {
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ResolverError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}
