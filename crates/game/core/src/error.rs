//! Common error infrastructure for rpg-core.
//!
//! This module provides the shared severity classification and the core's
//! loud-failure error type. Expected refusals (a missed cooldown, a shop with
//! no stock, ...) are NOT errors: they are returned as outcome values by the
//! operations that produce them. Domain-specific errors (`StatError`,
//! `ItemError`, `ModifierParseError`, `DataError`) live next to the code that
//! raises them.

use crate::entity::EntityId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may try again or pick another action
/// - **Validation**: invalid input, reject without retry
/// - **Internal**: unexpected state inconsistency (a bug)
/// - **Fatal**: content or configuration is broken; abort the triggering operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or broken content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all rpg-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Programmer and content errors.
///
/// These indicate a bug in content data or calling code, never a state a
/// player can trigger, and abort the operation that hit them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("unknown item preset `{name}`")]
    UnknownItem { name: String },

    #[error("location `{location}` does not resolve to a zone")]
    MissingLocation { location: String },

    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    #[error("entity {0} is not a {1}")]
    WrongEntityKind(EntityId, &'static str),
}

impl GameError for CoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownItem { .. } | Self::MissingLocation { .. } => ErrorSeverity::Fatal,
            Self::UnknownEntity(_) => ErrorSeverity::Validation,
            Self::WrongEntityKind(..) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownItem { .. } => "UNKNOWN_ITEM",
            Self::MissingLocation { .. } => "MISSING_LOCATION",
            Self::UnknownEntity(_) => "UNKNOWN_ENTITY",
            Self::WrongEntityKind(..) => "WRONG_ENTITY_KIND",
        }
    }
}

/// Failures while restoring an entity from its plain-data projection.
///
/// A restore is all-or-nothing: any of these aborts the whole load.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("field `{field}` holds a non-finite number")]
    NonFinite { field: &'static str },

    #[error("field `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("unknown equipment kind `{0}`")]
    UnknownEquipmentKind(String),

    #[error("item `{name}` cannot be equipped in slot `{slot}`")]
    SlotMismatch { name: String, slot: String },

    #[error("inventory overflow: {count} items exceed capacity {capacity}")]
    InventoryOverflow { count: usize, capacity: usize },
}

impl GameError for DataError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonFinite { .. } => "DATA_NON_FINITE",
            Self::OutOfRange { .. } => "DATA_OUT_OF_RANGE",
            Self::UnknownEquipmentKind(_) => "DATA_UNKNOWN_EQUIPMENT_KIND",
            Self::SlotMismatch { .. } => "DATA_SLOT_MISMATCH",
            Self::InventoryOverflow { .. } => "DATA_INVENTORY_OVERFLOW",
        }
    }
}

/// Rejects NaN and infinities in persisted numbers.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, DataError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DataError::NonFinite { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_item_is_fatal() {
        let err = CoreError::UnknownItem {
            name: "excalibur".into(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "UNKNOWN_ITEM");
        assert_eq!(err.to_string(), "unknown item preset `excalibur`");
    }

    #[test]
    fn ensure_finite_rejects_nan() {
        assert!(ensure_finite("life", f64::NAN).is_err());
        assert_eq!(ensure_finite("life", 3.0), Ok(3.0));
    }
}
