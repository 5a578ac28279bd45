//! The Show entity
//!
//! A `Show` starts out knowing only its id and fetches the rest of its data
//! on demand: the detail attributes load once on first accessor call, the
//! season list once on first `season_list` call. Greedy instances front-load
//! a single consolidated fetch at construction instead and never touch the
//! dedicated episode-list feed.
//!
//! An instance memoizes into its own fields behind `&mut self`, so the
//! exactly-one-fetch guarantee holds without any locking: one owner, one
//! caller at a time.

use std::sync::Arc;

use crate::client::TvRageClient;
use crate::error::{Result, TvRageError};
use crate::feed::{parse_document, Value};
use crate::parser::{parse_seasons, parse_show_info, ShowRef};
use crate::types::{Episode, Season, ShowInfo};

/// Construction options for a [`Show`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowOptions {
    /// Fetch the consolidated detail feed eagerly at construction time,
    /// covering both detail attributes and the season list in one request.
    pub greedy: bool,
}

/// A TV show: identity, detail attributes and seasons.
///
/// Constructed through [`crate::TvRage`]; never fetches anything until a
/// piece of data is actually asked for (unless built greedy).
pub struct Show {
    client: Arc<TvRageClient>,
    id: String,
    /// Name carried over from a listing feed, served until detail loads
    name_hint: Option<String>,
    /// Detail attributes, populated at most once
    info: Option<ShowInfo>,
    /// Season list, populated at most once
    seasons: Option<Vec<Season>>,
    /// Consolidated show node retained by greedy construction; season_list
    /// builds from it instead of fetching the episode-list feed
    full: Option<Value>,
}

/// Fetch the consolidated detail feed and return its raw `Show` node.
pub(crate) async fn fetch_full_node(client: &TvRageClient, id: &str) -> Result<Value> {
    let body = client
        .fetch(&format!("/feeds/full_show_info.php?sid={}", id))
        .await?;
    let doc = parse_document(&body)?;
    doc.get("Show").cloned().ok_or_else(|| {
        TvRageError::Parse("consolidated feed has no Show element".to_string())
    })
}

fn validate_id(id: &str) -> Result<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(TvRageError::InvalidArgument("show id is required".to_string()));
    }
    Ok(id.to_string())
}

macro_rules! info_accessors {
    ($($(#[$doc:meta])* $field:ident),+ $(,)?) => {
        $(
            $(#[$doc])*
            pub async fn $field(&mut self) -> Result<Option<String>> {
                Ok(self.info().await?.$field.clone())
            }
        )+
    };
}

impl Show {
    /// Build a lazy show. No network call happens here.
    pub(crate) fn new(client: Arc<TvRageClient>, id: &str) -> Result<Self> {
        Ok(Self {
            client,
            id: validate_id(id)?,
            name_hint: None,
            info: None,
            seasons: None,
            full: None,
        })
    }

    /// Build a show honoring [`ShowOptions`]. Greedy construction performs
    /// the consolidated fetch immediately and starts out fully loaded.
    pub(crate) async fn with_options(
        client: Arc<TvRageClient>,
        id: &str,
        options: ShowOptions,
    ) -> Result<Self> {
        let mut show = Self::new(client, id)?;
        if options.greedy {
            let node = fetch_full_node(&show.client, &show.id).await?;
            show.info = Some(parse_show_info(&node));
            show.full = Some(node);
        }
        Ok(show)
    }

    /// Build a minimally-populated show from a listing feed entry.
    pub(crate) fn from_ref(client: Arc<TvRageClient>, entry: ShowRef) -> Result<Self> {
        Ok(Self::new(client, &entry.id)?.with_name_hint(entry.name))
    }

    /// Attach a display name from a listing feed.
    pub(crate) fn with_name_hint(mut self, name: Option<String>) -> Self {
        self.name_hint = name;
        self
    }

    /// The stable TVRage show id. Always available, never fetched.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the detail attributes have been loaded yet.
    pub fn detail_loaded(&self) -> bool {
        self.info.is_some()
    }

    /// Whether the season list has been loaded yet.
    pub fn seasons_loaded(&self) -> bool {
        self.seasons.is_some()
    }

    /// The show's detail attributes, fetching the show-info feed on first
    /// call. Exactly one detail fetch happens per instance no matter how
    /// many attributes are read.
    ///
    /// # Errors
    /// Propagates transport and parse failures from the fetch unchanged.
    pub async fn info(&mut self) -> Result<&ShowInfo> {
        if self.info.is_none() {
            let body = self
                .client
                .fetch(&format!("/feeds/showinfo.php?sid={}", self.id))
                .await?;
            let doc = parse_document(&body)?;
            let node = doc.get("Showinfo").ok_or_else(|| {
                TvRageError::Parse("show info feed has no Showinfo element".to_string())
            })?;
            self.info = Some(parse_show_info(node));
        }
        // populated above; the closure never runs
        Ok(self.info.get_or_insert_with(ShowInfo::default))
    }

    /// Display name. A show that came from a listing feed answers with the
    /// listing name without fetching; otherwise this loads detail like any
    /// other accessor.
    pub async fn name(&mut self) -> Result<Option<String>> {
        if self.info.is_none() {
            if let Some(name) = &self.name_hint {
                return Ok(Some(name.clone()));
            }
        }
        Ok(self.info().await?.name.clone())
    }

    info_accessors! {
        /// TVRage show page link.
        link,
        /// Year the show started airing.
        started,
        /// Full start date.
        start_date,
        /// Date the show ended, `None` while still airing.
        ended,
        /// Network airing the show.
        network,
        /// Air time of day.
        air_time,
        /// Network time zone.
        time_zone,
        /// Episode run time in minutes.
        run_time,
        /// Country of origin.
        origin_country,
        /// Week day the show airs.
        air_day,
        /// Classification, e.g. "Scripted".
        classification,
        /// Number of seasons reported by the feed.
        season_count,
        /// Airing status, e.g. "Canceled/Ended".
        status,
    }

    /// Genres, always a sequence even when the feed carried zero or one.
    pub async fn genres(&mut self) -> Result<Vec<String>> {
        Ok(self.info().await?.genres.clone())
    }

    /// Alternative titles, always a sequence.
    pub async fn akas(&mut self) -> Result<Vec<String>> {
        Ok(self.info().await?.akas.clone())
    }

    /// The show's seasons, in feed order.
    ///
    /// First call on a lazy instance fetches the dedicated episode-list
    /// feed; a greedy instance builds from the consolidated node it already
    /// holds and never fetches the episode-list feed. Cached afterwards.
    pub async fn season_list(&mut self) -> Result<&[Season]> {
        if self.seasons.is_none() {
            let seasons = match &self.full {
                Some(node) => parse_seasons(node)?,
                None => {
                    let body = self
                        .client
                        .fetch(&format!("/feeds/episode_list.php?sid={}", self.id))
                        .await?;
                    let doc = parse_document(&body)?;
                    let show = doc.get("Show").ok_or_else(|| {
                        TvRageError::Parse("episode list feed has no Show element".to_string())
                    })?;
                    parse_seasons(show)?
                }
            };
            self.seasons = Some(seasons);
        }
        Ok(self.seasons.get_or_insert_with(Vec::new))
    }

    /// All episodes flattened in season order then in-season order.
    /// Derived from [`season_list`](Self::season_list); no fetch of its own.
    pub async fn episode_list(&mut self) -> Result<Vec<Episode>> {
        let seasons = self.season_list().await?;
        Ok(seasons
            .iter()
            .flat_map(|season| season.episodes.iter().cloned())
            .collect())
    }
}
