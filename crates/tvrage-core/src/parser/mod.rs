//! Feed parsers for the TVRage client
//!
//! Stateless routines that turn parsed feed documents into entities.

pub mod episodes;
pub mod search;
pub mod show_info;

pub use episodes::parse_seasons;
pub use search::{parse_current_shows, parse_quickinfo, parse_search_results, ShowRef};
pub use show_info::parse_show_info;
