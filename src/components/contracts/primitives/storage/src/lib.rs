#![deny(warnings)]
#![allow(missing_docs)]

pub mod key;
pub mod types;

#[cfg(test)]
mod tests;

pub use key::StorageKey;
pub use paste;
pub use ruc::{d, Result, RucResult};
pub use serde::{de::DeserializeOwned, Serialize};
pub use storage::store::{Prefix, StatelessStore};

/// Names one collection of one module. Every key of the collection lives under
/// `module_prefix ++ STORAGE_PREFIX`.
pub trait StorageInstance: StatelessStore {
    fn module_prefix() -> &'static str;

    const STORAGE_PREFIX: &'static str;

    fn prefix() -> Prefix {
        let raw = [Self::module_prefix(), Self::STORAGE_PREFIX].concat();
        Prefix::new(raw.as_bytes())
    }
}

/// Declares a typed collection owned by `$module`.
///
///```
/// # use fp_storage::generate_storage;
///
/// // a single value
/// generate_storage!(Distribution, Height => Value<u64>);
///
/// // values keyed by one key
/// generate_storage!(Distribution, Names => Map<String, u64>);
///
/// // values keyed by a pair, iterable by the first key
/// generate_storage!(Distribution, Events => DoubleMap<String, (u64, u64), Vec<u8>>);
///
/// # fn main() {}
/// ```
#[macro_export]
macro_rules! generate_storage {
    ($module:ident, $name:ident => Value<$value:ty>) => {
        $crate::generate_storage!(@instance $module, $name);
        $crate::paste::paste! {
            pub type $name = $crate::types::StorageValue<[<$name Instance>], $value>;
        }
    };
    ($module:ident, $name:ident => Map<$key:ty, $value:ty>) => {
        $crate::generate_storage!(@instance $module, $name);
        $crate::paste::paste! {
            pub type $name = $crate::types::StorageMap<[<$name Instance>], $key, $value>;
        }
    };
    ($module:ident, $name:ident => DoubleMap<$key1:ty, $key2:ty, $value:ty>) => {
        $crate::generate_storage!(@instance $module, $name);
        $crate::paste::paste! {
            pub type $name =
                $crate::types::StorageDoubleMap<[<$name Instance>], $key1, $key2, $value>;
        }
    };
    (@instance $module:ident, $name:ident) => {
        $crate::paste::paste! {
            pub struct [<$name Instance>];

            impl $crate::StatelessStore for [<$name Instance>] {}

            impl $crate::StorageInstance for [<$name Instance>] {
                fn module_prefix() -> &'static str {
                    stringify!($module)
                }
                const STORAGE_PREFIX: &'static str = stringify!($name);
            }
        }
    };
}
