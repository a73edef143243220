//! JSON layout of the persisted vault: a bare array of entries, no version field.

use crate::models::entry::Entry;
use crate::Result;

pub fn encode_entries(entries: &[Entry]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}

pub fn decode_entries(json: &str) -> Result<Vec<Entry>> {
    Ok(serde_json::from_str(json)?)
}
