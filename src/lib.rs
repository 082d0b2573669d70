//! StatusList2021 status lists for [Verifiable Credentials][vc-data-model].
//!
//! A status list is a compressed bitstring published inside a Verifiable
//! Credential of type `StatusList2021Credential`. Each credential issued
//! against the list carries a `StatusList2021Entry` in its
//! `credentialStatus` property, pointing at one bit of the list. The bit
//! tells whether the condition named by the status purpose (`revocation`,
//! `suspension`) holds for that credential.
//!
//! This crate provides:
//! - the [`BitString`] model and its [`EncodedList`] transport form (GZIP then
//!   base64url);
//! - [`create_credential`] to build an unsigned status list credential;
//! - [`status_type_matches`] and [`get_credential_status`] to inspect a
//!   credential's status entries;
//! - [`check_status`], which resolves every referenced status list through a
//!   [`DocumentLoader`], verifies it with the caller's [`ProofSuite`]s and
//!   reads the referenced bits.
//!
//! [vc-data-model]: <https://www.w3.org/TR/vc-data-model/>
//! [status-list]: <https://www.w3.org/TR/2023/WD-vc-status-list-20230427/>
//!
//! # Basic Usage
//!
//! ```
//! use ssi_status_list::{create_credential, create_list, decode_list};
//!
//! let mut list = create_list(100_000)?;
//! list.set(94567, true)?;
//!
//! let credential = create_credential(
//!     "https://example.com/credentials/status/3",
//!     &list,
//!     "revocation",
//! )?;
//! let encoded = credential.credential_subject.encoded_list.as_str();
//!
//! let decoded = decode_list(encoded)?;
//! assert!(decoded.get(94567)?);
//! assert!(!decoded.get(94566)?);
//! # Ok::<(), ssi_status_list::Error>(())
//! ```
//!
//! Signing the credential and serving it are left to the caller. See the
//! [status list specification][status-list] for the data model.
mod bitstring;
mod check;
mod context;
mod credential;
mod encoded_list;
mod entry;
mod error;
mod loader;
mod one_or_many;
mod suite;

pub use bitstring::BitString;
pub use check::{check_status, CheckStatusOptions, EntryResult, StatusCheckResult};
pub use context::{
    assert_status_list_2021_context, CREDENTIALS_V1_CONTEXT, STATUS_LIST_2021_V1_CONTEXT,
};
pub use credential::{
    create_credential, Issuer, ObjectWithId, StatusList2021, StatusList2021Credential,
    STATUS_LIST_2021_CREDENTIAL_TYPE, STATUS_LIST_2021_TYPE, VERIFIABLE_CREDENTIAL_TYPE,
};
pub use encoded_list::EncodedList;
pub use entry::{
    get_credential_status, status_type_matches, StatusList2021Entry, StatusListIndex,
    STATUS_LIST_2021_ENTRY_TYPE,
};
pub use error::{Error, ErrorKind};
pub use loader::{DocumentLoader, LoadError, MapLoader};
pub use one_or_many::OneOrMany;
pub use suite::{ProofSuite, ProofVerification};

/// Creates an all-zero status list of `length` bits.
///
/// `length` must be positive. Decoding the encoded list yields `length`
/// rounded up to a multiple of 8.
pub fn create_list(length: usize) -> Result<BitString, Error> {
    BitString::new(length)
}

/// Decodes an `encodedList` value, with the default decompression limit.
pub fn decode_list(encoded_list: &str) -> Result<BitString, Error> {
    EncodedList::new(encoded_list.to_string()).decode(None)
}
