use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{assert_status_list_2021_context, Error, OneOrMany};

pub const STATUS_LIST_2021_ENTRY_TYPE: &str = "StatusList2021Entry";

/// Integer identifying a bit position in a status list, serialized as a
/// decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StatusListIndex(usize);

impl StatusListIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl FromStr for StatusListIndex {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl TryFrom<String> for StatusListIndex {
    type Error = std::num::ParseIntError;

    fn try_from(string: String) -> Result<Self, Self::Error> {
        string.parse()
    }
}

impl From<StatusListIndex> for String {
    fn from(index: StatusListIndex) -> String {
        index.0.to_string()
    }
}

impl fmt::Display for StatusListIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Status List 2021 entry, for use in a Verifiable Credential's
/// `credentialStatus` property.
/// <https://www.w3.org/TR/2023/WD-vc-status-list-20230427/#statuslist2021entry>
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusList2021Entry {
    /// URL for status information of the verifiable credential - but not the
    /// URL of the status list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_: String,
    /// Status purpose, e.g. `revocation` or `suspension`.
    pub status_purpose: String,
    /// Index of this credential's status in the status list credential.
    pub status_list_index: StatusListIndex,
    /// URL to a [`StatusList2021Credential`](crate::StatusList2021Credential).
    pub status_list_credential: String,
}

impl StatusList2021Entry {
    pub fn new(
        id: Option<String>,
        status_purpose: String,
        status_list_index: StatusListIndex,
        status_list_credential: String,
    ) -> Self {
        Self {
            id,
            type_: STATUS_LIST_2021_ENTRY_TYPE.to_string(),
            status_purpose,
            status_list_index,
            status_list_credential,
        }
    }

    /// Reads a `credentialStatus` entry, validating each field it relies on.
    pub fn from_json(entry: &Value) -> Result<Self, Error> {
        let object = entry
            .as_object()
            .ok_or_else(|| Error::invalid_argument("credentialStatus", "must be an object."))?;
        let status_list_index = object
            .get("statusListIndex")
            .and_then(Value::as_str)
            .and_then(|index| index.parse().ok())
            .ok_or_else(|| Error::invalid_argument("statusListIndex", "must be an integer."))?;
        let status_list_credential = object
            .get("statusListCredential")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                Error::invalid_argument("statusListCredential", "must be a non-empty string.")
            })?;
        let status_purpose = object
            .get("statusPurpose")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::invalid_argument("statusPurpose", "must be a string."))?;
        Ok(Self {
            id: object.get("id").and_then(Value::as_str).map(ToOwned::to_owned),
            type_: STATUS_LIST_2021_ENTRY_TYPE.to_string(),
            status_purpose: status_purpose.to_owned(),
            status_list_index,
            status_list_credential: status_list_credential.to_owned(),
        })
    }
}

fn credential_status(credential: &Value) -> Result<Option<OneOrMany<&Value>>, Error> {
    let credential = credential
        .as_object()
        .ok_or_else(|| Error::invalid_argument("credential", "must be an object."))?;
    Ok(credential
        .get("credentialStatus")
        .and_then(OneOrMany::from_json))
}

fn is_status_list_entry(entry: &Value) -> bool {
    entry.get("type").and_then(Value::as_str) == Some(STATUS_LIST_2021_ENTRY_TYPE)
}

/// Every `StatusList2021Entry` of the credential, in document order. Entries
/// of other types are skipped.
pub(crate) fn status_list_entries(credential: &Value) -> Result<Vec<&Value>, Error> {
    Ok(match credential_status(credential)? {
        Some(statuses) => statuses
            .into_vec()
            .into_iter()
            .filter(|entry| is_status_list_entry(entry))
            .collect(),
        None => Vec::new(),
    })
}

/// Checks whether the credential carries at least one `StatusList2021Entry`.
///
/// The credential shape and `@context` are asserted first, with the same
/// errors as [`assert_status_list_2021_context`].
pub fn status_type_matches(credential: &Value) -> Result<bool, Error> {
    assert_status_list_2021_context(credential)?;
    Ok(match credential_status(credential)? {
        Some(statuses) => statuses.iter().any(|entry| is_status_list_entry(entry)),
        None => false,
    })
}

/// Returns the first `StatusList2021Entry` of the credential with the given
/// status purpose, unchanged.
pub fn get_credential_status<'a>(
    credential: &'a Value,
    status_purpose: &str,
) -> Result<&'a Value, Error> {
    let statuses = credential_status(credential)?
        .ok_or_else(|| Error::NotFound("\"credentialStatus\" not found.".to_string()))?;
    statuses
        .into_vec()
        .into_iter()
        .find(|entry| {
            is_status_list_entry(entry)
                && entry.get("statusPurpose").and_then(Value::as_str) == Some(status_purpose)
        })
        .ok_or_else(|| {
            Error::NotFound(format!(
                "Credential status type \"{STATUS_LIST_2021_ENTRY_TYPE}\" and status purpose \"{status_purpose}\" not found."
            ))
        })
}
