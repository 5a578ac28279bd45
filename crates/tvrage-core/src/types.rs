//! Data types for the TVRage client
//!
//! Pure data holders built from normalized feed nodes. All equality is
//! structural, and every scalar coming off the wire stays a `String`: the
//! feeds serve numeric-looking identifiers that must not be assumed to fit
//! a fixed-width integer type.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TvRageError};
use crate::feed::{listify, Value};

/// One episode within a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode number within its season (`seasonnum`, zero-padded in the feed)
    pub number: Option<String>,
    /// Overall episode number across the show (`epnum`)
    pub overall_number: Option<String>,
    /// Production code (`prodnum`)
    pub production_code: Option<String>,
    /// Original air date (`airdate`)
    pub air_date: Option<String>,
    /// TVRage episode page link
    pub link: Option<String>,
    /// Episode title
    pub title: Option<String>,
}

impl Episode {
    /// Build an episode from a single normalized feed node.
    pub fn from_node(node: &Value) -> Self {
        let text = |key: &str| node.text_of(key).map(str::to_string);
        Self {
            number: text("seasonnum"),
            overall_number: text("epnum"),
            production_code: text("prodnum"),
            air_date: text("airdate"),
            link: text("link"),
            title: text("title"),
        }
    }
}

/// One season of a show: its number and its episodes, in feed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Season number (positive, 1-based, from the feed's `no` attribute)
    pub number: u32,
    /// Episodes in in-season order
    pub episodes: Vec<Episode>,
}

impl Season {
    /// Build a season from a single normalized season node, recursively
    /// normalizing and building its episode children.
    ///
    /// # Errors
    /// Returns [`TvRageError::Parse`] when the `no` attribute is missing or
    /// not a positive integer; a season without a usable number would
    /// silently corrupt season ordering.
    pub fn from_node(node: &Value) -> Result<Self> {
        let number = node
            .text_of("no")
            .and_then(|no| no.parse::<u32>().ok())
            .filter(|no| *no > 0)
            .ok_or_else(|| {
                TvRageError::Parse("season node has no usable 'no' attribute".to_string())
            })?;

        let episodes = listify(node.get("episode"))
            .into_iter()
            .map(Episode::from_node)
            .collect();

        Ok(Self { number, episodes })
    }
}

/// Detail attributes of a show, populated from a single feed response.
///
/// Field names follow the showinfo feed; the consolidated feed spells some
/// elements differently (`name`/`showname`, `totalseasons`/`seasons`) and
/// both spellings are accepted when mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowInfo {
    /// Display name
    pub name: Option<String>,
    /// TVRage show page link
    pub link: Option<String>,
    /// Year the show started
    pub started: Option<String>,
    /// Full start date
    pub start_date: Option<String>,
    /// Date the show ended, absent while airing
    pub ended: Option<String>,
    /// Network airing the show
    pub network: Option<String>,
    /// Air time of day
    pub air_time: Option<String>,
    /// Network time zone
    pub time_zone: Option<String>,
    /// Episode run time in minutes
    pub run_time: Option<String>,
    /// Country of origin
    pub origin_country: Option<String>,
    /// Week day the show airs
    pub air_day: Option<String>,
    /// Classification (e.g. "Scripted")
    pub classification: Option<String>,
    /// Number of seasons reported by the feed
    pub season_count: Option<String>,
    /// Airing status (e.g. "Canceled/Ended")
    pub status: Option<String>,
    /// Genres, always a sequence even when the feed yielded zero or one
    pub genres: Vec<String>,
    /// Alternative titles, always a sequence
    pub akas: Vec<String>,
}
