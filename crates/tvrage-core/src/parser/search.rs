//! Listing feed parsers for the TVRage client
//!
//! Covers the three feeds that yield minimally-populated shows: the global
//! current-shows feed (partitioned by country), the search feed, and the
//! quickinfo name-lookup page.

use regex_lite::Regex;

use crate::error::{Result, TvRageError};
use crate::feed::{listify, Value};

/// A minimally-populated show payload from a listing feed: identity plus
/// (sometimes) a display name. Everything else lazy-loads later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowRef {
    /// Stable TVRage show id, kept as a string
    pub id: String,
    /// Display name, when the feed carried one
    pub name: Option<String>,
}

/// Build a `ShowRef` from one show entry of a listing feed.
///
/// The current-shows feed names its elements `showid`/`showname`, the
/// search feed `showid`/`name`; both are accepted.
fn parse_show_entry(node: &Value) -> Result<ShowRef> {
    let id = node
        .text_of("showid")
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| TvRageError::Parse("show entry is missing a showid".to_string()))?
        .to_string();
    let name = node
        .text_of("showname")
        .or_else(|| node.text_of("name"))
        .map(str::to_string);
    Ok(ShowRef { id, name })
}

/// Parse the current-shows feed for one country.
///
/// The feed lists every country in one document; entries for other
/// countries are filtered out here.
///
/// # Errors
/// - [`TvRageError::CountryNotFound`] when `country` does not appear in the
///   feed at all.
/// - [`TvRageError::Parse`] when a show entry lacks an id.
pub fn parse_current_shows(doc: &Value, country: &str) -> Result<Vec<ShowRef>> {
    let countries = doc
        .get("currentshows")
        .and_then(|feed| feed.get("country"));

    let matching = listify(countries)
        .into_iter()
        .find(|node| node.text_of("name") == Some(country));

    let country_node =
        matching.ok_or_else(|| TvRageError::CountryNotFound(country.to_string()))?;

    listify(country_node.get("show"))
        .into_iter()
        .map(parse_show_entry)
        .collect()
}

/// Parse the search feed into its result entries, in feed order.
///
/// A result document without entries (TVRage answers `<Results>0</Results>`
/// for no matches) yields an empty sequence.
pub fn parse_search_results(doc: &Value) -> Result<Vec<ShowRef>> {
    let shows = doc.get("Results").and_then(|results| results.get("show"));

    listify(shows).into_iter().map(parse_show_entry).collect()
}

/// Scan a quickinfo page for the show id marker.
///
/// The quickinfo endpoint answers with line-oriented `key@value` pairs
/// wrapped in HTML; the `Show ID@` marker carries the id and `Show Name@`
/// the display name. Absence of the id marker means the name is unknown.
pub fn parse_quickinfo(body: &str) -> Option<ShowRef> {
    let id_re = Regex::new(r"Show ID@(\d+)").ok()?;
    let name_re = Regex::new(r"Show Name@([^<\r\n]+)").ok()?;

    let id = id_re.captures(body)?.get(1)?.as_str().to_string();
    let name = name_re
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    Some(ShowRef { id, name })
}
