//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur in the payroll and workflow
//! subsystems. No error here is fatal to the process; every variant is
//! scoped to the single operation that raised it.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::Validation {
///     field: "name".to_string(),
///     message: "must not be empty".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid field 'name': must not be empty");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input was missing or malformed. The operation never reached the store.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A uniqueness constraint was violated, e.g. a duplicate daily
    /// attendance claim or a second payslip for the same period.
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflicting state.
        message: String,
    },

    /// An illegal state transition was attempted, e.g. deciding an
    /// already-decided request or paying an already-paid payslip.
    /// The underlying record is left untouched.
    #[error("Illegal state transition on {entity} '{id}': {message}")]
    InvalidTransition {
        /// The kind of record the transition was attempted on.
        entity: String,
        /// The id of the record.
        id: String,
        /// A description of why the transition is illegal.
        message: String,
    },

    /// The actor lacks the capability required for the operation.
    #[error("Actor '{actor}' is not permitted to {operation}")]
    Unauthorized {
        /// The id of the actor that was denied.
        actor: String,
        /// The operation that was denied.
        operation: String,
    },

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record that was looked up.
        entity: String,
        /// The id that was not found.
        id: String,
    },

    /// The document store was temporarily unavailable. Callers should
    /// retry with backoff; see [`crate::store::retry`].
    #[error("Store unavailable: {message}")]
    Store {
        /// A description of the transient failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns true if the error is transient and the operation may be
    /// retried unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(self, EngineError::Store { .. })
    }

    /// Convenience constructor for validation errors.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for conflict errors.
    pub fn conflict(message: impl Into<String>) -> Self {
        EngineError::Conflict {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = EngineError::validation("base_salary", "must be non-negative");
        assert_eq!(
            error.to_string(),
            "Invalid field 'base_salary': must be non-negative"
        );
    }

    #[test]
    fn test_conflict_displays_message() {
        let error = EngineError::conflict("attendance already requested for 2025-12-01");
        assert_eq!(
            error.to_string(),
            "Conflict: attendance already requested for 2025-12-01"
        );
    }

    #[test]
    fn test_invalid_transition_displays_entity_and_id() {
        let error = EngineError::InvalidTransition {
            entity: "payslip".to_string(),
            id: "abc".to_string(),
            message: "already Paid".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Illegal state transition on payslip 'abc': already Paid"
        );
    }

    #[test]
    fn test_unauthorized_displays_actor_and_operation() {
        let error = EngineError::Unauthorized {
            actor: "emp_1".to_string(),
            operation: "generate payslips".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Actor 'emp_1' is not permitted to generate payslips"
        );
    }

    #[test]
    fn test_not_found_displays_entity_and_id() {
        let error = EngineError::NotFound {
            entity: "employee".to_string(),
            id: "missing".to_string(),
        };
        assert_eq!(error.to_string(), "employee not found: missing");
    }

    #[test]
    fn test_only_store_errors_are_transient() {
        let store = EngineError::Store {
            message: "connection reset".to_string(),
        };
        assert!(store.is_transient());

        let validation = EngineError::validation("name", "empty");
        assert!(!validation.is_transient());

        let conflict = EngineError::conflict("duplicate");
        assert!(!conflict.is_transient());
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_conflict() -> EngineResult<()> {
            Err(EngineError::conflict("duplicate"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_conflict()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
