use thiserror::Error;

/// Result type alias using the canonical error facility
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// handling, tests, and HTTP responses. Kinds fall into three families:
/// validation (caller's fault, never retried), data access (store failures,
/// transaction rolled back), and identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    MissingField,
    EmptyCart,
    UnknownItem,

    // Lookup / uniqueness
    NotFound,
    AlreadyExists,
    ConstraintViolation,

    // Identity
    Unauthorised,

    // Infrastructure
    Persistence,
    Concurrency,
    Serialization,
    Io,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::EmptyCart => "ERR_EMPTY_CART",
            ExErrorKind::UnknownItem => "ERR_UNKNOWN_ITEM",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput
                | ExErrorKind::MissingField
                | ExErrorKind::EmptyCart
                | ExErrorKind::UnknownItem
                | ExErrorKind::AlreadyExists
        )
    }

    /// Whether the error came from the store (connection, constraint, transaction).
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            ExErrorKind::Persistence
                | ExErrorKind::Concurrency
                | ExErrorKind::ConstraintViolation
                | ExErrorKind::Io
        )
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus free-form context
/// for the server-side log.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (order id, user id, item name)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain-level error taxonomy
///
/// Raised by the pure core (validation, cart handling). Converted into
/// `ExError` at the engine boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NutriCartError {
    /// Checkout attempted with no items
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart referenced names that are not in the catalog
    #[error("Unknown item(s): {}", names.join(", "))]
    UnknownItems { names: Vec<String> },

    /// A cart line had a blank name
    #[error("Cart item at position {position} has no name")]
    BlankItemName { position: usize },

    /// Required request field missing or blank
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Totals contained a negative or non-finite value
    #[error("Invalid totals: {reason}")]
    InvalidTotals { reason: String },

    /// Email already registered with the identity provider
    #[error("Email already registered")]
    EmailTaken { email: String },

    /// Email/password pair did not match
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Bearer token missing, unknown or expired
    #[error("Invalid token")]
    InvalidToken,

    /// JSON (de)serialization failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<NutriCartError> for ExError {
    fn from(err: NutriCartError) -> Self {
        let message = err.to_string();
        match err {
            NutriCartError::EmptyCart => ExError::new(ExErrorKind::EmptyCart).with_message(message),

            NutriCartError::UnknownItems { names } => ExError::new(ExErrorKind::UnknownItem)
                .with_entity_id(names.join(","))
                .with_message(message),

            NutriCartError::BlankItemName { .. } | NutriCartError::InvalidTotals { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            NutriCartError::MissingField { field } => ExError::new(ExErrorKind::MissingField)
                .with_entity_id(field)
                .with_message(message),

            NutriCartError::EmailTaken { email } => ExError::new(ExErrorKind::AlreadyExists)
                .with_entity_id(email)
                .with_message(message),

            NutriCartError::InvalidCredentials | NutriCartError::InvalidToken => {
                ExError::new(ExErrorKind::Unauthorised).with_message(message)
            }

            NutriCartError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for NutriCartError {
    fn from(err: serde_json::Error) -> Self {
        NutriCartError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_stable() {
        let cases = [
            (ExErrorKind::EmptyCart, "ERR_EMPTY_CART"),
            (ExErrorKind::UnknownItem, "ERR_UNKNOWN_ITEM"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
            (ExErrorKind::Unauthorised, "ERR_UNAUTHORISED"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_validation_and_data_access_are_disjoint() {
        let all = [
            ExErrorKind::InvalidInput,
            ExErrorKind::MissingField,
            ExErrorKind::EmptyCart,
            ExErrorKind::UnknownItem,
            ExErrorKind::NotFound,
            ExErrorKind::AlreadyExists,
            ExErrorKind::ConstraintViolation,
            ExErrorKind::Unauthorised,
            ExErrorKind::Persistence,
            ExErrorKind::Concurrency,
            ExErrorKind::Serialization,
            ExErrorKind::Io,
            ExErrorKind::Internal,
        ];
        for kind in all {
            assert!(
                !(kind.is_validation() && kind.is_data_access()),
                "{:?} classified as both",
                kind
            );
        }
    }

    #[test]
    fn test_unknown_items_conversion_keeps_names() {
        let err: ExError = NutriCartError::UnknownItems {
            names: vec!["Lobster".into(), "Caviar".into()],
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::UnknownItem);
        assert_eq!(err.entity_id(), Some("Lobster,Caviar"));
        assert!(err.message().contains("Lobster, Caviar"));
    }

    #[test]
    fn test_display_includes_code_and_op() {
        let err = ExError::new(ExErrorKind::Persistence)
            .with_op("commit_order")
            .with_message("disk I/O error");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_PERSISTENCE]"));
        assert!(rendered.contains("commit_order"));
        assert!(rendered.contains("disk I/O error"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        use std::error::Error;
        let inner = ExError::new(ExErrorKind::ConstraintViolation).with_message("UNIQUE");
        let outer = ExError::new(ExErrorKind::Concurrency).with_source(inner);
        assert!(outer.source().is_some());
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::ConstraintViolation)
        );
    }
}
