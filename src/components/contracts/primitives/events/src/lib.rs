#![deny(warnings)]
#![allow(missing_docs)]

#[cfg(test)]
mod tests;

pub use fp_event_derive::Event;
pub use serde_json::to_string;

use serde::{Deserialize, Serialize};

/// One `key=value` attribute of an emitted event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    pub value: String,
}

/// A typed event, `type_` is `<module>_<StructName>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub type_: String,
    pub attributes: Vec<EventAttribute>,
}

impl EventRecord {
    /// Value of the first attribute named `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

pub trait Event {
    /// Generates `EventRecord` where value types are formatted with `Debug`.
    #[allow(clippy::wrong_self_convention)]
    fn emit_event(field_type: String, structure: Self) -> EventRecord;

    /// Generates `EventRecord` where value types are serialized as json.
    #[allow(clippy::wrong_self_convention)]
    fn emit_serde_event(field_type: String, structure: Self) -> EventRecord;
}
