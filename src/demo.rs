//! Demo data: the Johnson wedding reception.
//!
//! The fixture is embedded at build time and decoded on demand. It doubles as
//! the input format of the CLI (`{"event": {...}, "discussions": [...]}`).

use crate::error::Result;
use crate::{Discussion, EventRecord};
use serde::{Deserialize, Serialize};

const JOHNSON_WEDDING: &str = include_str!("../data/johnson_wedding.json");

/// One event and the discussions about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub event: EventRecord,
    pub discussions: Vec<Discussion>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Decode the embedded demo data set.
pub fn fixture() -> Result<Fixture> {
    Fixture::from_json(JOHNSON_WEDDING)
}
