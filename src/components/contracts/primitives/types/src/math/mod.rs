//! Arbitrary precision integers and 18-digit fixed point decimals.
//!
//! Both serialize as strings so genesis files and store values stay readable and
//! never lose precision.

macro_rules! impl_serde_str {
    ($t:ty) => {
        impl serde::Serialize for $t {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse::<$t>()
                    .map_err(|e| serde::de::Error::custom(e.to_string()))
            }
        }
    };
}

pub(crate) use impl_serde_str;

mod dec;
mod int;

pub use dec::{Dec, PRECISION};
pub use int::Int;
