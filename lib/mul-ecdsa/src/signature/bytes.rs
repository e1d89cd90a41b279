//! Signature conversion from and to bytes.

use num_bigint::BigUint;
use num_traits::Zero;

use super::Signature;
use crate::error::{Error, Result};

/// Byte length of one signature component for a group of order `order`.
fn component_len(order: &BigUint) -> usize {
    order.to_bytes_be().len()
}

/// Writes `value` big-endian into `out`, left padded with zeroes.
fn write_padded(value: &BigUint, out: &mut [u8]) {
    let bytes = value.to_bytes_be();
    let offset = out.len() - bytes.len();
    out[offset..].copy_from_slice(&bytes);
}

impl Signature {
    /// Parse a signature from fixed-width bytes, i.e. twice the byte length
    /// of `order`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidSignature`] - if `slice` has the wrong length, or if
    ///   the `r` and/or `s` component is not in the range `1..order` when
    ///   interpreted as a big endian integer.
    pub fn from_slice(slice: &[u8], order: &BigUint) -> Result<Self> {
        let len = component_len(order);
        if slice.len() != 2 * len {
            return Err(Error::InvalidSignature);
        }

        let (r, s) = slice.split_at(len);
        let r = BigUint::from_bytes_be(r);
        let s = BigUint::from_bytes_be(s);

        let is_member = |v: &BigUint| !v.is_zero() && v < order;
        if !is_member(&r) || !is_member(&s) {
            return Err(Error::InvalidSignature);
        }

        Ok(Signature { r, s })
    }

    /// Serialize this signature as `r || s`, each component big endian and
    /// padded to the byte length of `order`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidSignature`] - if a component is not below `order`.
    pub fn to_bytes(&self, order: &BigUint) -> Result<Vec<u8>> {
        if &self.r >= order || &self.s >= order {
            return Err(Error::InvalidSignature);
        }

        let len = component_len(order);
        let mut bytes = vec![0; 2 * len];
        write_padded(&self.r, &mut bytes[..len]);
        write_padded(&self.s, &mut bytes[len..]);
        Ok(bytes)
    }
}
