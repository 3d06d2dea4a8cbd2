//! Text encoding of storage keys.
//!
//! Keys are compared as bytes, so numbers are zero padded to keep prefix iteration
//! ascending in numeric order.

use fp_types::crypto::Address;
use ruc::*;

pub trait StorageKey: Sized {
    fn encode_key(&self) -> String;

    fn decode_key(s: &str) -> Result<Self>;
}

impl StorageKey for String {
    fn encode_key(&self) -> String {
        self.clone()
    }

    fn decode_key(s: &str) -> Result<Self> {
        Ok(s.to_owned())
    }
}

impl StorageKey for u64 {
    fn encode_key(&self) -> String {
        format!("{:020}", self)
    }

    fn decode_key(s: &str) -> Result<Self> {
        s.parse::<u64>().c(d!())
    }
}

impl StorageKey for (u64, u64) {
    fn encode_key(&self) -> String {
        format!("{:020}-{:020}", self.0, self.1)
    }

    fn decode_key(s: &str) -> Result<Self> {
        let (a, b) = s.split_once('-').c(d!(format!("invalid pair key '{}'", s)))?;
        Ok((u64::decode_key(a)?, u64::decode_key(b)?))
    }
}

impl StorageKey for Address {
    fn encode_key(&self) -> String {
        self.to_string()
    }

    fn decode_key(s: &str) -> Result<Self> {
        s.parse::<Address>()
    }
}
