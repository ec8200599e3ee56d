//! Conversion of stored records into typed values.
//!
//! Backends return records as raw [`Bson`]; [`FromBson`] decodes them into any
//! deserializable type through serde, mapping failures onto the store error type.

use bson::{Bson, de::deserialize_from_bson};
use serde::de::DeserializeOwned;

use crate::error::{DocumentStoreError, DocumentStoreResult};

/// Decodes a stored BSON record into `Self`.
///
/// Implemented for every type that implements `serde::Deserialize`.
pub trait FromBson: Sized {
    /// Creates a value from a stored BSON record.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Serialization`] if the record does not match the
    /// shape of `Self`, and [`DocumentStoreError::InvalidDocument`] if it is not a document.
    fn from_bson(bson: Bson) -> DocumentStoreResult<Self>;
}

impl<D: DeserializeOwned> FromBson for D {
    fn from_bson(bson: Bson) -> DocumentStoreResult<Self> {
        if bson.as_document().is_none() {
            return Err(DocumentStoreError::InvalidDocument(format!(
                "expected a document, found {:?}",
                bson.element_type()
            )));
        }

        Ok(deserialize_from_bson(bson)?)
    }
}
