//! Built-in Montreal metro dataset.
//!
//! Both layouts share one pixel space on a 460x540 canvas; `geo_offset` and
//! `map_offset` shift them into frame.

use crate::foundation::error::MetroResult;
use crate::scene::model::MetroMap;

const MONTREAL_JSON: &str = include_str!("../../data/montreal.json");

/// Load the embedded Montreal dataset (yellow, orange, green, blue in draw order).
pub fn montreal() -> MetroResult<MetroMap> {
    MetroMap::from_json_str(MONTREAL_JSON)
}
