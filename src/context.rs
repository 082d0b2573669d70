//! Structural `@context` check for status list documents.
//!
//! This is not JSON-LD processing: it only looks at the order and presence of
//! the two context URLs the StatusList2021 vocabulary relies on.
use serde_json::Value;

use crate::Error;

/// Verifiable Credentials Data Model v1 context.
pub const CREDENTIALS_V1_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// StatusList2021 context.
pub const STATUS_LIST_2021_V1_CONTEXT: &str = "https://w3id.org/vc/status-list/2021/v1";

/// Asserts that `credential` declares a `@context` compatible with
/// StatusList2021: the credentials v1 context first, and the status list
/// context somewhere in the sequence.
pub fn assert_status_list_2021_context(credential: &Value) -> Result<(), Error> {
    let credential = credential
        .as_object()
        .ok_or_else(|| Error::invalid_argument("credential", "must be an object."))?;
    let context = credential
        .get("@context")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::invalid_argument("@context", "must be an array."))?;
    if context.first().and_then(Value::as_str) != Some(CREDENTIALS_V1_CONTEXT) {
        return Err(Error::Structural(format!(
            "The first \"@context\" value must be \"{CREDENTIALS_V1_CONTEXT}\"."
        )));
    }
    if !context
        .iter()
        .any(|c| c.as_str() == Some(STATUS_LIST_2021_V1_CONTEXT))
    {
        return Err(Error::Structural(format!(
            "\"@context\" must include \"{STATUS_LIST_2021_V1_CONTEXT}\"."
        )));
    }
    Ok(())
}
