//! Show detail parser for the TVRage feeds
//!
//! Maps a parsed show node onto [`ShowInfo`]. The showinfo feed and the
//! consolidated full_show_info feed describe the same attributes under
//! partly different element names, so every mapping accepts both spellings.

use crate::feed::{listify, Value};
use crate::types::ShowInfo;

/// Map a show node (the `Showinfo` or `Show` element) onto a `ShowInfo`.
///
/// Absent elements stay `None`; the genre and aka collections are always
/// sequences regardless of how many entries the feed carried.
pub fn parse_show_info(node: &Value) -> ShowInfo {
    ShowInfo {
        name: first_text(node, &["showname", "name"]),
        link: first_text(node, &["showlink", "link"]),
        started: first_text(node, &["started"]),
        start_date: first_text(node, &["startdate"]),
        ended: first_text(node, &["ended"]),
        network: first_text(node, &["network"]),
        air_time: first_text(node, &["airtime"]),
        time_zone: first_text(node, &["timezone"]),
        run_time: first_text(node, &["runtime"]),
        origin_country: first_text(node, &["origin_country"]),
        air_day: first_text(node, &["airday"]),
        classification: first_text(node, &["classification"]),
        season_count: first_text(node, &["seasons", "totalseasons"]),
        status: first_text(node, &["status"]),
        genres: string_list(node.get("genres"), "genre"),
        akas: string_list(node.get("akas"), "aka"),
    }
}

/// First present text value among alternative element names.
fn first_text(node: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| node.text_of(key))
        .map(str::to_string)
}

/// Normalize a wrapper element (`<genres><genre>..`) into a string sequence.
fn string_list(wrapper: Option<&Value>, item: &str) -> Vec<String> {
    let items = wrapper.and_then(|w| w.get(item));
    listify(items)
        .into_iter()
        .filter_map(Value::as_text)
        .map(str::to_string)
        .collect()
}
