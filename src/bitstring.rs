use bitvec::prelude::*;

use crate::{EncodedList, Error};

/// Fixed-length bit vector backing a status list.
///
/// Bits are indexed from most significant to least significant:
/// ```text
/// | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | ... | n-1 |
/// | byte 0                        | ...           |
/// ```
///
/// See: <https://www.w3.org/TR/2023/WD-vc-status-list-20230427/#bitstring-encoding>
///
/// The length is fixed at construction. A cleared bit (`false`) means the
/// status condition does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString(BitVec<u8, Msb0>);

impl BitString {
    /// Creates an all-zero bit-string of exactly `length` bits.
    ///
    /// The backing storage holds `ceil(length / 8)` bytes. The encoded form
    /// only stores whole bytes, so decoding an encoded list yields the length
    /// rounded up to a multiple of 8, with the padding bits cleared.
    pub fn new(length: usize) -> Result<Self, Error> {
        if length == 0 {
            return Err(Error::invalid_argument("length", "must be a positive integer."));
        }
        Ok(Self(BitVec::repeat(false, length)))
    }

    /// Creates a bit-string from its backing bytes. The length is
    /// `bytes.len() * 8`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(BitVec::from_vec(bytes))
    }

    /// Number of addressable bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the bit at `index`.
    pub fn get(&self, index: usize) -> Result<bool, Error> {
        match self.0.get(index) {
            Some(bit) => Ok(*bit),
            None => Err(self.out_of_range(index)),
        }
    }

    /// Sets the bit at `index`, returning its previous value.
    pub fn set(&mut self, index: usize, value: bool) -> Result<bool, Error> {
        let length = self.len();
        match self.0.get_mut(index) {
            Some(mut bit) => {
                let previous = *bit;
                *bit = value;
                Ok(previous)
            }
            None => Err(Error::IndexOutOfRange { index, length }),
        }
    }

    /// Iterates over the indexes of every set bit, e.g. the revoked
    /// credentials of a revocation list.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter_ones()
    }

    /// Backing bytes, `ceil(len / 8)` of them.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_raw_slice()
    }

    /// Compresses and encodes the bit-string.
    pub fn encode(&self) -> Result<EncodedList, Error> {
        EncodedList::encode(self)
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            length: self.len(),
        }
    }
}
