use std::fmt;

/// Separator between the parts of a key, also the lower bound of a range.
pub const SPLIT_BGN: &str = "_";
/// Upper bound of a range, sorts after every printable key part.
pub const SPLIT_END: &str = "~";

/// Builder for `base_part_part` keys and their iteration bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefix {
    base: Vec<u8>,
}

impl Prefix {
    pub fn new(key: &[u8]) -> Self {
        Prefix { base: key.to_vec() }
    }

    /// "base" ==> "base_key"
    pub fn push(&self, key: &[u8]) -> Self {
        let mut pfx = self.clone();
        pfx.base.extend_from_slice(SPLIT_BGN.as_bytes());
        pfx.base.extend_from_slice(key);
        pfx
    }

    /// "base" ==> "base_sub_key"
    pub fn push_sub(&self, sub_prefix: &[u8], sub_key: &[u8]) -> Self {
        self.push(sub_prefix).push(sub_key)
    }

    /// "base" ==> "base_"
    pub fn begin(&self) -> Vec<u8> {
        let mut key = self.base.clone();
        key.extend_from_slice(SPLIT_BGN.as_bytes());
        key
    }

    /// "base" ==> "base~"
    pub fn end(&self) -> Vec<u8> {
        let mut key = self.base.clone();
        key.extend_from_slice(SPLIT_END.as_bytes());
        key
    }
}

impl AsRef<[u8]> for Prefix {
    fn as_ref(&self) -> &[u8] {
        self.base.as_ref()
    }
}

impl From<Vec<u8>> for Prefix {
    fn from(item: Vec<u8>) -> Self {
        Prefix { base: item }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.base))
    }
}
