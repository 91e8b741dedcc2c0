//! Core record types for regform.
//!
//! A [`Registration`] is what the form produces; a [`Record`] is a
//! registration after the store has assigned it an identifier.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The payload captured by the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// The registrant's name.
    pub name: String,
    /// The registrant's email address.
    pub email: String,
}

impl Registration {
    /// Create a new registration from the two form fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Check that both fields are present.
    ///
    /// Only an empty string counts as missing; whitespace is kept and stored
    /// as typed. No format checks are applied to the email.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::missing_field("name"));
        }
        if self.email.is_empty() {
            return Err(Error::missing_field("email"));
        }
        Ok(())
    }

    /// Whether both fields are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Encode as the JSON text kept in the `value` column.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode the JSON text stored for record `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialization`] if the text is not a registration.
    pub fn from_value(id: i64, value: &str) -> Result<Self> {
        serde_json::from_str(value).map_err(|source| Error::Deserialization { id, source })
    }
}

/// A stored registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier assigned by the store. Never reused.
    pub id: i64,
    /// The registration itself.
    pub payload: Registration,
}

impl Record {
    /// Create a record from its parts.
    #[must_use]
    pub fn new(id: i64, payload: Registration) -> Self {
        Self { id, payload }
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} <{}>", self.id, self.payload.name, self.payload.email)
    }
}
