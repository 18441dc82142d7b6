use thiserror::Error;

/// Result type alias using SupplyError
pub type Result<T> = std::result::Result<T, SupplyError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on when
/// rendering feedback, independent of the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidOrderName,
    InvalidDate,
    InvalidAmount,

    // Lookup
    NotFound,

    // Storage
    ConstraintViolation,
    Persistence,
    Migration,
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidOrderName => "ERR_INVALID_ORDER_NAME",
            ExErrorKind::InvalidDate => "ERR_INVALID_DATE",
            ExErrorKind::InvalidAmount => "ERR_INVALID_AMOUNT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Migration => "ERR_MIGRATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// operation and entity context for log lines and user feedback.
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

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
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

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
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
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for order and part operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SupplyError {
    /// Order not found in store
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: i64 },

    /// Part not found in store
    #[error("Part not found: {part_id}")]
    PartNotFound { part_id: i64 },

    /// Order name is empty or whitespace
    #[error("Invalid order name: {reason}")]
    InvalidOrderName { reason: String },

    /// Part name is empty or whitespace
    #[error("Invalid part name: {reason}")]
    InvalidPartName { reason: String },

    /// Date text is not a `yyyy-MM-dd` calendar date
    #[error("Invalid date '{value}': expected yyyy-MM-dd")]
    InvalidDate { value: String },

    /// Amount text is not a finite decimal
    #[error("Invalid amount '{value}'")]
    InvalidAmount { value: String },

    /// Stored row could not be decoded into a model
    #[error("Corrupt stored value in {field}: {value}")]
    CorruptRow { field: String, value: String },
}

impl From<SupplyError> for ExError {
    fn from(err: SupplyError) -> Self {
        match err {
            SupplyError::OrderNotFound { order_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(order_id)
                .with_message("Order not found"),

            SupplyError::PartNotFound { part_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(part_id)
                .with_message("Part not found"),

            e @ SupplyError::InvalidOrderName { .. } => {
                ExError::new(ExErrorKind::InvalidOrderName).with_message(e.to_string())
            }

            e @ SupplyError::InvalidPartName { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(e.to_string())
            }

            e @ SupplyError::InvalidDate { .. } => {
                ExError::new(ExErrorKind::InvalidDate).with_message(e.to_string())
            }

            e @ SupplyError::InvalidAmount { .. } => {
                ExError::new(ExErrorKind::InvalidAmount).with_message(e.to_string())
            }

            e @ SupplyError::CorruptRow { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_op_and_entity() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("update_part")
            .with_entity_id(7)
            .with_message("Part not found");

        let rendered = err.to_string();
        assert_eq!(
            rendered,
            "[ERR_NOT_FOUND] in operation 'update_part': Part not found (entity_id: 7)"
        );
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = ExError::new(ExErrorKind::Persistence).with_message("disk I/O error");
        let outer = ExError::new(ExErrorKind::Migration).with_source(inner);

        let source = std::error::Error::source(&outer).expect("source");
        assert!(source.to_string().contains("disk I/O error"));
        assert_eq!(
            outer.source_error().map(ExError::kind),
            Some(ExErrorKind::Persistence)
        );
    }
}
