use std::fmt;
use std::io::{Read, Write};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{Deserialize, Serialize};

use crate::{BitString, Error};

/// Transport form of a [`BitString`]: the GZIP-compressed backing bytes,
/// base64url-encoded without padding.
///
/// This is the exact value stored at `credentialSubject.encodedList`.
/// Encoding is deterministic, so the string can be used as a content key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EncodedList(String);

impl EncodedList {
    /// Default maximum decompressed size accepted by [`EncodedList::decode`].
    ///
    /// 16MiB, i.e. 134,217,728 statuses.
    pub const DEFAULT_LIMIT: u64 = 16 * 1024 * 1024;

    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn encode(list: &BitString) -> Result<Self, Error> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(list.as_bytes()).map_err(encode_error)?;
        let compressed = encoder.finish().map_err(encode_error)?;
        Ok(Self(base64::encode_config(compressed, base64::URL_SAFE_NO_PAD)))
    }

    /// Decodes the list, refusing to decompress more than `limit` bytes
    /// (defaults to [`Self::DEFAULT_LIMIT`]).
    pub fn decode(&self, limit: Option<u64>) -> Result<BitString, Error> {
        if self.0.is_empty() {
            return Err(Error::invalid_argument(
                "encodedList",
                "must be a non-empty string.",
            ));
        }
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);
        // Padded input is tolerated even though the encoder never emits it.
        let compressed =
            base64::decode_config(self.0.trim_end_matches('='), base64::URL_SAFE_NO_PAD)
                .map_err(decode_error)?;
        let mut bytes = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(decode_error)?;
        if bytes.len() as u64 > limit {
            return Err(Error::Decode {
                reason: format!("decoded status list exceeds {limit} bytes"),
            });
        }
        if bytes.is_empty() {
            return Err(Error::Decode {
                reason: "decoded status list is empty".to_string(),
            });
        }
        Ok(BitString::from_bytes(bytes))
    }
}

impl fmt::Display for EncodedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn encode_error(e: std::io::Error) -> Error {
    Error::Encode {
        reason: e.to_string(),
    }
}

fn decode_error(e: impl fmt::Display) -> Error {
    Error::Decode {
        reason: e.to_string(),
    }
}
