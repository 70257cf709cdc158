//! Lookup request parsing
//!
//! A raw request is an ordered list of string terms: the entry identifier,
//! the attribute name, and, only when the attribute is the
//! `custom_properties` sentinel, the custom property key.

use crate::constants::CUSTOM_PROPERTIES;
use crate::errors::{Error, Result};

/// The attribute a request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedAttribute {
    /// A built-in entry field such as `username` or `password`.
    Field(String),
    /// A user-defined property, requested through the `custom_properties`
    /// sentinel. Carries the property key.
    Custom(String),
}

/// A validated lookup request: which entry, and which attribute to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    entry: String,
    attribute: RequestedAttribute,
}

impl LookupRequest {
    /// Parse raw request terms into a validated request.
    ///
    /// Rules:
    /// - at least two terms: entry identifier and attribute name;
    /// - every term must be non-empty;
    /// - `custom_properties` requires a third term (the property key);
    /// - any other attribute takes exactly two terms. Extra terms are
    ///   rejected rather than silently ignored, so a misspelled sentinel
    ///   cannot drop the property key on the floor.
    pub fn parse(terms: &[String]) -> Result<Self> {
        if terms.is_empty() {
            return Err(Error::request_format("no arguments provided"));
        }
        if terms.iter().any(String::is_empty) {
            return Err(Error::request_format("all arguments must be non-empty"));
        }

        let entry = terms[0].clone();
        let Some(property_name) = terms.get(1) else {
            return Err(Error::request_format("property name is not provided"));
        };

        let attribute = if property_name == CUSTOM_PROPERTIES {
            let Some(key) = terms.get(2) else {
                return Err(Error::request_format("custom property key is not provided"));
            };
            if terms.len() > 3 {
                return Err(Error::request_format(format!(
                    "unexpected extra arguments: {}",
                    terms[3..].join(", ")
                )));
            }
            RequestedAttribute::Custom(key.clone())
        } else {
            if terms.len() > 2 {
                return Err(Error::request_format(format!(
                    "unexpected extra arguments: {}",
                    terms[2..].join(", ")
                )));
            }
            RequestedAttribute::Field(property_name.clone())
        };

        Ok(Self { entry, attribute })
    }

    /// The entry identifier, passed verbatim to the external tool.
    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// The requested attribute.
    #[must_use]
    pub fn attribute(&self) -> &RequestedAttribute {
        &self.attribute
    }

    /// The attribute value actually sent to the external tool: the field
    /// name itself, or the custom property key for sentinel requests.
    #[must_use]
    pub fn shown_attribute(&self) -> &str {
        match &self.attribute {
            RequestedAttribute::Field(name) => name,
            RequestedAttribute::Custom(key) => key,
        }
    }
}
