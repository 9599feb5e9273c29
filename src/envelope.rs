//! Envelope unwrapping for Zendesk responses.
//!
//! Zendesk wraps every payload in a top-level object under a fixed key:
//! `{"users": [...]}` for collections, `{"user": {...}}` for one entity,
//! `{"user_related": {...}}` for relation counts. [`unwrap_envelope`] is the
//! single decode step for all of them, parameterized by the key.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ZendeskError;

/// Decoded response body: the top-level JSON object.
pub type Envelope = Map<String, Value>;

/// Extracts and decodes the payload stored under `key`.
///
/// Other keys (`next_page`, `count`, ...) are discarded. A missing or
/// `null` key decodes to `T::default()`, matching the API's habit of
/// omitting empty values.
///
/// # Errors
///
/// Returns `ZendeskError::Serialization` if the payload does not match `T`.
pub fn unwrap_envelope<T>(mut envelope: Envelope, key: &str) -> Result<T, ZendeskError>
where
    T: DeserializeOwned + Default,
{
    match envelope.remove(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(payload) => Ok(serde_json::from_value(payload)?),
    }
}

/// Wraps a request payload under `key`, e.g. `{"user": {...}}`.
pub fn wrap_envelope<T>(key: &str, payload: &T) -> Result<Value, ZendeskError>
where
    T: serde::Serialize + ?Sized,
{
    let mut envelope = Envelope::new();
    envelope.insert(key.to_string(), serde_json::to_value(payload)?);
    Ok(Value::Object(envelope))
}
