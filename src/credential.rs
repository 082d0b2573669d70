use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    BitString, EncodedList, Error, OneOrMany, CREDENTIALS_V1_CONTEXT,
    STATUS_LIST_2021_V1_CONTEXT,
};

pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";
pub const STATUS_LIST_2021_CREDENTIAL_TYPE: &str = "StatusList2021Credential";
pub const STATUS_LIST_2021_TYPE: &str = "StatusList2021";

/// Issuer of a credential, either a bare URI or an object with an `id`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
#[allow(clippy::upper_case_acronyms)]
pub enum Issuer {
    URI(String),
    Object(ObjectWithId),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ObjectWithId {
    pub id: String,
    #[serde(flatten)]
    pub property_set: Map<String, Value>,
}

impl Issuer {
    pub fn get_id(&self) -> &str {
        match self {
            Self::URI(uri) => uri,
            Self::Object(object) => &object.id,
        }
    }

    /// Reads the `issuer` property of a credential, if present and well-formed.
    pub fn from_credential(credential: &Value) -> Option<Self> {
        credential
            .get("issuer")
            .and_then(|issuer| serde_json::from_value(issuer.clone()).ok())
    }
}

/// Credential subject of type StatusList2021, expected to be used in a
/// Verifiable Credential of type [`StatusList2021Credential`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusList2021 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_: String,
    pub status_purpose: String,
    pub encoded_list: EncodedList,
    #[serde(flatten)]
    pub more_properties: Map<String, Value>,
}

impl StatusList2021 {
    /// Reads the `credentialSubject` of a status list credential, ignoring
    /// the rest of the document.
    pub fn from_credential(document: &Value) -> Result<Self, Error> {
        let subject = document
            .get("credentialSubject")
            .cloned()
            .unwrap_or(Value::Null);
        serde_json::from_value(subject)
            .map_err(|e| Error::Structural(format!("Unable to parse status list: {e}")))
    }

    pub fn new(id: Option<String>, status_purpose: String, encoded_list: EncodedList) -> Self {
        Self {
            id,
            type_: STATUS_LIST_2021_TYPE.to_string(),
            status_purpose,
            encoded_list,
            more_properties: Map::new(),
        }
    }
}

/// Verifiable Credential of type StatusList2021Credential.
/// <https://www.w3.org/TR/2023/WD-vc-status-list-20230427/#statuslist2021credential>
///
/// Signing is left to the caller: `proof` is carried through untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusList2021Credential {
    #[serde(rename = "@context")]
    pub context: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_: OneOrMany<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Issuer>,
    pub credential_subject: StatusList2021,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Value>,
    #[serde(flatten)]
    pub more_properties: Map<String, Value>,
}

impl StatusList2021Credential {
    /// Decodes the embedded status list.
    pub fn decode_status_list(&self, limit: Option<u64>) -> Result<BitString, Error> {
        self.credential_subject.encoded_list.decode(limit)
    }

    /// Sets the status at `index` in the embedded list, returning the
    /// previous value.
    ///
    /// Any existing proof no longer covers the updated list; the caller must
    /// sign the credential again.
    pub fn set_status(&mut self, index: usize, value: bool) -> Result<bool, Error> {
        let mut list = self.decode_status_list(None)?;
        let previous = list.set(index, value)?;
        self.credential_subject.encoded_list = list.encode()?;
        Ok(previous)
    }

    pub fn to_value(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(|e| Error::Structural(e.to_string()))
    }

    /// Reads a status list credential from an already validated document.
    pub fn from_value(document: &Value) -> Result<Self, Error> {
        serde_json::from_value(document.clone()).map_err(|e| {
            Error::Structural(format!("Unable to parse status list credential: {e}"))
        })
    }
}

/// Builds an unsigned StatusList2021Credential for `list`.
pub fn create_credential(
    id: &str,
    list: &BitString,
    status_purpose: &str,
) -> Result<StatusList2021Credential, Error> {
    if id.is_empty() {
        return Err(Error::invalid_argument("id", "must be a non-empty string."));
    }
    if status_purpose.is_empty() {
        return Err(Error::invalid_argument(
            "statusPurpose",
            "must be a non-empty string.",
        ));
    }
    if list.is_empty() {
        return Err(Error::invalid_argument("list", "must not be empty."));
    }
    Ok(StatusList2021Credential {
        context: vec![
            Value::from(CREDENTIALS_V1_CONTEXT),
            Value::from(STATUS_LIST_2021_V1_CONTEXT),
        ],
        id: Some(id.to_string()),
        type_: OneOrMany::Many(vec![
            VERIFIABLE_CREDENTIAL_TYPE.to_string(),
            STATUS_LIST_2021_CREDENTIAL_TYPE.to_string(),
        ]),
        issuer: None,
        credential_subject: StatusList2021::new(
            Some(format!("{id}#list")),
            status_purpose.to_string(),
            list.encode()?,
        ),
        proof: None,
        more_properties: Map::new(),
    })
}

/// Checks the type labels of a resolved status list credential.
pub(crate) fn assert_status_list_credential_shape(document: &Value) -> Result<(), Error> {
    let types = document
        .get("type")
        .and_then(|types| serde_json::from_value::<OneOrMany<String>>(types.clone()).ok());
    if !types.map_or(false, |types| {
        types.contains(&STATUS_LIST_2021_CREDENTIAL_TYPE.to_string())
    }) {
        return Err(Error::Structural(format!(
            "Status list credential type must include \"{STATUS_LIST_2021_CREDENTIAL_TYPE}\"."
        )));
    }
    let subject_type = document
        .get("credentialSubject")
        .and_then(|subject| subject.get("type"))
        .and_then(Value::as_str);
    if subject_type != Some(STATUS_LIST_2021_TYPE) {
        return Err(Error::Structural(format!(
            "Status list type must be \"{STATUS_LIST_2021_TYPE}\"."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    const LIST_ID: &str = "https://example.com/status/1";

    /// `encodedList` of an empty 100,000-bit list.
    const EMPTY_100K_LIST: &str =
        "H4sIAAAAAAAA_-3AMQEAAADCoPVPbQsvKAAAAAAAAAAAAAAAgL8BcwM92tQwAAA";

    #[test]
    fn create_credential_shape() {
        let list = BitString::new(100_000).unwrap();
        let credential = create_credential(LIST_ID, &list, "revocation").unwrap();
        let value = credential.to_value().unwrap();
        assert_eq!(
            value["@context"],
            json!([CREDENTIALS_V1_CONTEXT, STATUS_LIST_2021_V1_CONTEXT])
        );
        assert_eq!(value["id"], json!(LIST_ID));
        assert_eq!(
            value["type"],
            json!(["VerifiableCredential", "StatusList2021Credential"])
        );
        assert_eq!(
            value["credentialSubject"],
            json!({
                "id": "https://example.com/status/1#list",
                "type": "StatusList2021",
                "statusPurpose": "revocation",
                "encodedList": EMPTY_100K_LIST
            })
        );
        assert!(value.get("proof").is_none());
        assert_status_list_credential_shape(&value).unwrap();
        crate::assert_status_list_2021_context(&value).unwrap();

        let decoded = credential.decode_status_list(None).unwrap();
        assert_eq!(decoded.len(), 100_000);
    }

    #[test]
    fn create_credential_requires_arguments() {
        let list = BitString::new(8).unwrap();
        assert_eq!(
            create_credential("", &list, "revocation").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            create_credential(LIST_ID, &list, "").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        let empty = BitString::from_bytes(Vec::new());
        assert_eq!(
            create_credential(LIST_ID, &empty, "revocation")
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn set_status_updates_encoded_list() {
        let list = BitString::new(1024).unwrap();
        let mut credential = create_credential(LIST_ID, &list, "suspension").unwrap();
        let before = credential.credential_subject.encoded_list.clone();
        assert!(!credential.set_status(42, true).unwrap());
        assert_ne!(credential.credential_subject.encoded_list, before);
        let decoded = credential.decode_status_list(None).unwrap();
        assert_eq!(decoded.iter_ones().collect::<Vec<_>>(), vec![42]);
        assert!(credential.set_status(42, false).unwrap());
        assert_eq!(credential.credential_subject.encoded_list, before);
        assert_eq!(
            credential.set_status(1024, true).unwrap_err().kind(),
            ErrorKind::IndexOutOfRange
        );
    }

    #[test]
    fn shape_errors() {
        let list = BitString::new(8).unwrap();
        let mut value = create_credential(LIST_ID, &list, "revocation")
            .unwrap()
            .to_value()
            .unwrap();
        value["credentialSubject"]["type"] = json!("RevocationList2020");
        let e = assert_status_list_credential_shape(&value).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Structural);

        value["type"] = json!("VerifiableCredential");
        let e = assert_status_list_credential_shape(&value).unwrap_err();
        assert!(e.to_string().contains("StatusList2021Credential"));
    }

    #[test]
    fn subject_is_read_alone() {
        let list = BitString::new(8).unwrap();
        let mut value = create_credential(LIST_ID, &list, "revocation")
            .unwrap()
            .to_value()
            .unwrap();
        value.as_object_mut().unwrap().remove("id");
        value["issuer"] = json!({"name": "no id"});

        let subject = StatusList2021::from_credential(&value).unwrap();
        assert_eq!(subject.status_purpose, "revocation");
        assert_eq!(subject.encoded_list, list.encode().unwrap());

        value["credentialSubject"]
            .as_object_mut()
            .unwrap()
            .remove("encodedList");
        let e = StatusList2021::from_credential(&value).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Structural);
    }

    #[test]
    fn credential_without_id() {
        let list = BitString::new(8).unwrap();
        let mut value = create_credential(LIST_ID, &list, "revocation")
            .unwrap()
            .to_value()
            .unwrap();
        value.as_object_mut().unwrap().remove("id");
        let credential = StatusList2021Credential::from_value(&value).unwrap();
        assert_eq!(credential.id, None);
        assert!(credential.to_value().unwrap().get("id").is_none());
    }

    #[test]
    fn issuer_forms() {
        let uri = json!({"issuer": "did:example:12345"});
        assert_eq!(
            Issuer::from_credential(&uri).unwrap().get_id(),
            "did:example:12345"
        );
        let object = json!({"issuer": {"id": "did:example:12345", "name": "Example"}});
        assert_eq!(
            Issuer::from_credential(&object).unwrap().get_id(),
            "did:example:12345"
        );
        assert!(Issuer::from_credential(&json!({"issuer": 1})).is_none());
        assert!(Issuer::from_credential(&json!({})).is_none());
    }
}
