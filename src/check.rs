use core::fmt;

use futures::future::join_all;
use log::{debug, warn};
use serde_json::Value;

use crate::credential::assert_status_list_credential_shape;
use crate::entry::{status_list_entries, STATUS_LIST_2021_ENTRY_TYPE};
use crate::suite::verify_with_suites;
use crate::{
    assert_status_list_2021_context, DocumentLoader, EncodedList, Error, Issuer, OneOrMany,
    ProofSuite, StatusList2021, StatusList2021Entry,
};

/// Options for [`check_status`].
#[derive(Clone)]
pub struct CheckStatusOptions<'a> {
    /// Resolves status list credentials. Required.
    pub document_loader: Option<&'a dyn DocumentLoader>,
    /// Suites used to verify the status list credential proof. Required
    /// unless `verify_status_list_credential` is `false`.
    pub suite: Option<OneOrMany<&'a dyn ProofSuite>>,
    /// Verify the proof of each status list credential. Defaults to `true`.
    pub verify_status_list_credential: bool,
    /// Require the credential and status list issuers to match. Defaults to
    /// `true`.
    pub verify_matching_issuers: bool,
    /// Report a credential without any `StatusList2021Entry` as verified
    /// instead of failing. Defaults to `false`.
    pub allow_missing_status: bool,
    /// Maximum decompressed size of a status list, in bytes.
    pub decode_limit: u64,
}

impl<'a> CheckStatusOptions<'a> {
    pub fn with_document_loader(mut self, loader: &'a dyn DocumentLoader) -> Self {
        self.document_loader = Some(loader);
        self
    }

    pub fn with_suite(mut self, suite: &'a dyn ProofSuite) -> Self {
        self.suite = Some(OneOrMany::One(suite));
        self
    }

    pub fn with_suites(mut self, suites: Vec<&'a dyn ProofSuite>) -> Self {
        self.suite = Some(OneOrMany::Many(suites));
        self
    }
}

impl Default for CheckStatusOptions<'_> {
    fn default() -> Self {
        Self {
            document_loader: None,
            suite: None,
            verify_status_list_credential: true,
            verify_matching_issuers: true,
            allow_missing_status: false,
            decode_limit: EncodedList::DEFAULT_LIMIT,
        }
    }
}

impl fmt::Debug for CheckStatusOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckStatusOptions")
            .field("verify_status_list_credential", &self.verify_status_list_credential)
            .field("verify_matching_issuers", &self.verify_matching_issuers)
            .field("allow_missing_status", &self.allow_missing_status)
            .field("decode_limit", &self.decode_limit)
            .finish_non_exhaustive()
    }
}

/// Outcome of checking one `StatusList2021Entry`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryResult {
    pub verified: bool,
    /// The entry, if its fields were well-formed.
    pub entry: Option<StatusList2021Entry>,
    /// Value of the referenced bit. `true` means the condition named by the
    /// status purpose (revoked, suspended) holds. Interpreting it is up to
    /// the caller.
    pub status: Option<bool>,
    pub error: Option<Error>,
}

/// Outcome of [`check_status`].
///
/// `verified` tells whether every status entry is authentic and well-formed;
/// it does not tell whether the credential is revoked. See
/// [`EntryResult::status`] for that.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusCheckResult {
    pub verified: bool,
    /// One result per entry, in document order.
    pub results: Vec<EntryResult>,
    /// First error encountered, if any.
    pub error: Option<Error>,
}

impl StatusCheckResult {
    fn error(error: Error) -> Self {
        Self {
            verified: false,
            results: Vec::new(),
            error: Some(error),
        }
    }

    /// Whether any entry references a set bit.
    pub fn any_status_set(&self) -> bool {
        self.results.iter().any(|result| result.status == Some(true))
    }
}

/// Validates every StatusList2021 entry of `credential`.
///
/// This function never fails: errors, including invalid options, are
/// reported in the returned [`StatusCheckResult`]. Entries are checked
/// concurrently.
pub async fn check_status(
    credential: &Value,
    options: &CheckStatusOptions<'_>,
) -> StatusCheckResult {
    let (entries, loader, suites) = match prepare(credential, options) {
        Ok(prepared) => prepared,
        Err(e) => {
            warn!("Unable to check credential status: {e}");
            return StatusCheckResult::error(e);
        }
    };
    if entries.is_empty() {
        if options.allow_missing_status {
            debug!("Credential has no {STATUS_LIST_2021_ENTRY_TYPE}, accepted");
            return StatusCheckResult {
                verified: true,
                results: Vec::new(),
                error: None,
            };
        }
        return StatusCheckResult::error(Error::NotFound(format!(
            "\"credentialStatus\" does not contain a \"{STATUS_LIST_2021_ENTRY_TYPE}\" entry."
        )));
    }

    let results = join_all(
        entries
            .into_iter()
            .map(|entry| check_entry(credential, entry, loader, &suites, options)),
    )
    .await;
    let error = results.iter().find_map(|result| result.error.clone());
    StatusCheckResult {
        verified: results.iter().all(|result| result.verified),
        results,
        error,
    }
}

#[allow(clippy::type_complexity)]
fn prepare<'c, 'a>(
    credential: &'c Value,
    options: &CheckStatusOptions<'a>,
) -> Result<(Vec<&'c Value>, &'a dyn DocumentLoader, Vec<&'a dyn ProofSuite>), Error> {
    if !credential.is_object() {
        return Err(Error::invalid_argument("credential", "must be an object."));
    }
    let loader = options
        .document_loader
        .ok_or_else(|| Error::invalid_argument("documentLoader", "must be provided."))?;
    let suites = options
        .suite
        .clone()
        .map(OneOrMany::into_vec)
        .unwrap_or_default();
    if options.verify_status_list_credential && suites.is_empty() {
        return Err(Error::invalid_argument(
            "suite",
            "must be provided when \"verifyStatusListCredential\" is true.",
        ));
    }
    Ok((status_list_entries(credential)?, loader, suites))
}

async fn check_entry(
    credential: &Value,
    entry: &Value,
    loader: &dyn DocumentLoader,
    suites: &[&dyn ProofSuite],
    options: &CheckStatusOptions<'_>,
) -> EntryResult {
    let entry = match StatusList2021Entry::from_json(entry) {
        Ok(entry) => entry,
        Err(e) => {
            warn!("Invalid {STATUS_LIST_2021_ENTRY_TYPE}: {e}");
            return EntryResult {
                verified: false,
                entry: None,
                status: None,
                error: Some(e),
            };
        }
    };
    debug!(
        "Checking {} status at index {} of {}",
        entry.status_purpose, entry.status_list_index, entry.status_list_credential
    );
    match check_entry_status(credential, &entry, loader, suites, options).await {
        Ok(status) => {
            debug!(
                "Status list {} verified, status {}",
                entry.status_list_credential, status
            );
            EntryResult {
                verified: true,
                entry: Some(entry),
                status: Some(status),
                error: None,
            }
        }
        Err(e) => {
            warn!("Status list {} failed: {e}", entry.status_list_credential);
            EntryResult {
                verified: false,
                entry: Some(entry),
                status: None,
                error: Some(e),
            }
        }
    }
}

async fn check_entry_status(
    credential: &Value,
    entry: &StatusList2021Entry,
    loader: &dyn DocumentLoader,
    suites: &[&dyn ProofSuite],
    options: &CheckStatusOptions<'_>,
) -> Result<bool, Error> {
    let url = &entry.status_list_credential;
    let document = loader.load(url).await.map_err(|e| Error::Resolution {
        url: url.clone(),
        reason: e.to_string(),
    })?;

    assert_status_list_credential_shape(&document)?;
    assert_status_list_2021_context(&document)?;
    if options.verify_status_list_credential {
        verify_with_suites(&document, suites, loader).await?;
    }

    let subject = StatusList2021::from_credential(&document)?;
    let list = subject.encoded_list.decode(Some(options.decode_limit))?;

    if subject.status_purpose != entry.status_purpose {
        return Err(Error::PurposeMismatch {
            claim: entry.status_purpose.clone(),
            list: subject.status_purpose,
        });
    }

    let status = list.get(entry.status_list_index.get())?;

    if options.verify_matching_issuers {
        let issuer = Issuer::from_credential(credential)
            .ok_or_else(|| Error::Structural("Credential is missing issuer".to_string()))?;
        let list_issuer = Issuer::from_credential(&document).ok_or_else(|| {
            Error::Structural("Status list credential is missing issuer".to_string())
        })?;
        if issuer.get_id() != list_issuer.get_id() {
            return Err(Error::IssuerMismatch {
                credential: issuer.get_id().to_string(),
                list: list_issuer.get_id().to_string(),
            });
        }
    }

    Ok(status)
}
