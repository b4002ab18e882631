use crate::error::FixtureError;
use crate::project::{Entry, Forest};

const ANDROID_PROJECT: &str = include_str!("fixture/android_project.json");

pub fn parse_entries(raw: &str) -> Result<Vec<Entry>, FixtureError> {
    Ok(serde_json::from_str(raw)?)
}

/// The sample Android project shown in the explorer.
pub fn android_project() -> Result<Forest, FixtureError> {
    let entries = parse_entries(ANDROID_PROJECT)?;
    Ok(Forest::from_entries(entries)?)
}
