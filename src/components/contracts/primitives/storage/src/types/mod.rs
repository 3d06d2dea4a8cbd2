mod double_map;
mod map;
mod value;

pub use double_map::StorageDoubleMap;
pub use map::StorageMap;
pub use value::StorageValue;
