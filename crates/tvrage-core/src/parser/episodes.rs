//! Episode list parser for the TVRage feeds
//!
//! Turns the season/episode tree under a show node into `Season` entities.
//! The same shape appears in two feeds: the dedicated episode_list feed and
//! the consolidated full_show_info feed.

use crate::error::Result;
use crate::feed::{listify, Value};
use crate::types::Season;

/// Parse the seasons of a show node (an element carrying `Episodelist`).
///
/// Season nodes are normalized before construction, so a show with exactly
/// one season parses the same as a show with several. A show node without
/// an `Episodelist` yields an empty sequence.
///
/// # Errors
/// Returns [`crate::TvRageError::Parse`] when a season node lacks a usable
/// season number.
pub fn parse_seasons(show_node: &Value) -> Result<Vec<Season>> {
    let seasons = show_node
        .get("Episodelist")
        .and_then(|list| list.get("Season"));

    listify(seasons).into_iter().map(Season::from_node).collect()
}
