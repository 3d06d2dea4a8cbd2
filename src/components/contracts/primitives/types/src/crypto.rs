use bech32::{FromBase32, ToBase32};
use core::fmt::Formatter;
use core::str::FromStr;
use ruc::*;
use sha2::{Digest, Sha256};

/// Human readable part of every bech32 address.
pub const ADDRESS_HRP: &str = "fra";

/// An opaque 20-byte account identifier, shown as bech32.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Default, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// The account owned by the module `name`.
    pub fn module(name: &str) -> Self {
        let mut addr = Address::default();
        addr.0.copy_from_slice(&Sha256::digest(name.as_bytes())[..20]);
        addr
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl From<[u8; 20]> for Address {
    fn from(x: [u8; 20]) -> Self {
        Self(x)
    }
}

impl<'a> TryFrom<&'a [u8]> for Address {
    type Error = Box<dyn RucError>;

    fn try_from(x: &'a [u8]) -> Result<Address> {
        if x.len() != 20 {
            return Err(eg!(format!("address must be 20 bytes, got {}", x.len())));
        }
        let mut r = Address::default();
        r.0.copy_from_slice(x);
        Ok(r)
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let s = bech32::encode(ADDRESS_HRP, self.0.to_base32())
            .map_err(|_| core::fmt::Error)?;
        write!(f, "{}", s)
    }
}

impl core::fmt::Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Address {
    type Err = Box<dyn RucError>;

    fn from_str(s: &str) -> Result<Address> {
        let (hrp, data) = bech32::decode(s).c(d!(format!("invalid address '{}'", s)))?;
        if hrp != ADDRESS_HRP {
            return Err(eg!(format!("unexpected address prefix '{}'", hrp)));
        }
        let v = Vec::<u8>::from_base32(&data).c(d!())?;
        Address::try_from(v.as_slice())
    }
}

crate::math::impl_serde_str!(Address);
