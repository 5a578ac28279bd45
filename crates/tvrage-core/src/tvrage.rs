//! Main TVRage client API
//!
//! This module provides the high-level API for the TVRage feeds. It
//! combines the HTTP client with the feed parsers and hands out [`Show`]
//! entities that lazy-load their own data.

use std::sync::Arc;

use crate::client::{ClientConfig, TvRageClient};
use crate::error::{Result, TvRageError};
use crate::feed::{parse_document, Value};
use crate::parser::{parse_current_shows, parse_quickinfo, parse_search_results};
use crate::show::{fetch_full_node, Show, ShowOptions};

/// Country used by [`TvRage::current`] when none is given.
const DEFAULT_COUNTRY: &str = "US";

/// Entry point for the TVRage feed client
///
/// Provides the finder operations (by id, by name, current shows, search)
/// and the raw consolidated-feed accessor. All network operations are
/// asynchronous; nothing is fetched until an operation needs it.
///
/// # Example
/// ```no_run
/// use tvrage_core::TvRage;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let tvrage = TvRage::new()?;
///
///     let mut show = tvrage.show("2930")?;
///     println!("{:?}", show.name().await?);
///
///     Ok(())
/// }
/// ```
pub struct TvRage {
    client: Arc<TvRageClient>,
}

impl TvRage {
    /// Create a new client with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(TvRageClient::new()?))
    }

    /// Create a new client with custom transport configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_client(TvRageClient::with_config(config)?))
    }

    /// Create a new client around a pre-configured transport.
    ///
    /// Useful for testing or custom client setups.
    pub fn with_client(client: TvRageClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Construct a lazy [`Show`] for an id. No network call happens until
    /// the show's data is accessed.
    ///
    /// # Errors
    /// * `TvRageError::InvalidArgument` if `id` is empty
    pub fn show(&self, id: &str) -> Result<Show> {
        Show::new(self.client.clone(), id)
    }

    /// Construct a [`Show`] honoring [`ShowOptions`]; greedy instances
    /// fetch the consolidated detail feed once, right here.
    ///
    /// # Errors
    /// * `TvRageError::InvalidArgument` if `id` is empty
    /// * transport/parse failures from the greedy fetch
    ///
    /// # Example
    /// ```no_run
    /// use tvrage_core::{ShowOptions, TvRage};
    ///
    /// # async fn example() -> Result<(), tvrage_core::TvRageError> {
    /// let tvrage = TvRage::new()?;
    /// let mut show = tvrage
    ///     .show_with("2930", ShowOptions { greedy: true })
    ///     .await?;
    /// // already loaded; no further fetches for attributes or seasons
    /// let seasons = show.season_list().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn show_with(&self, id: &str, options: ShowOptions) -> Result<Show> {
        Show::with_options(self.client.clone(), id, options).await
    }

    /// Fetch the consolidated detail feed for `id` and return the parsed
    /// `Show` sub-structure verbatim, unnormalized, for callers that need
    /// the complete raw payload rather than the entity view.
    ///
    /// # Errors
    /// * `TvRageError::InvalidArgument` if `id` is empty
    pub async fn full_info(&self, id: &str) -> Result<Value> {
        let id = id.trim();
        if id.is_empty() {
            return Err(TvRageError::InvalidArgument("show id is required".to_string()));
        }
        fetch_full_node(&self.client, id).await
    }

    /// Look a show up by name through the quickinfo feed.
    ///
    /// # Errors
    /// * `TvRageError::InvalidArgument` if `name` is empty
    /// * `TvRageError::ShowNotFound` if the lookup yields no id
    ///
    /// # Example
    /// ```no_run
    /// use tvrage_core::TvRage;
    ///
    /// # async fn example() -> Result<(), tvrage_core::TvRageError> {
    /// let tvrage = TvRage::new()?;
    /// let mut show = tvrage.by_name("The Colbert Report").await?;
    /// println!("{}", show.id());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn by_name(&self, name: &str) -> Result<Show> {
        self.by_name_with(name, ShowOptions::default()).await
    }

    /// Look a show up by name, constructing it with [`ShowOptions`].
    pub async fn by_name_with(&self, name: &str, options: ShowOptions) -> Result<Show> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TvRageError::InvalidArgument(
                "show name cannot be empty".to_string(),
            ));
        }

        let path = format!("/tools/quickinfo.php?show={}", urlencoding::encode(trimmed));
        let body = self.client.fetch(&path).await?;

        let entry = parse_quickinfo(&body)
            .ok_or_else(|| TvRageError::ShowNotFound(trimmed.to_string()))?;

        let show = Show::with_options(self.client.clone(), &entry.id, options)
            .await?
            .with_name_hint(entry.name);
        Ok(show)
    }

    /// Currently airing shows for the default country (US).
    pub async fn current(&self) -> Result<Vec<Show>> {
        self.current_in(DEFAULT_COUNTRY).await
    }

    /// Currently airing shows for a country code, in feed order. Each
    /// result is a minimally-populated [`Show`] (id and name); everything
    /// else lazy-loads as usual.
    ///
    /// # Errors
    /// * `TvRageError::CountryNotFound` if `country` has no entries in the
    ///   feed
    pub async fn current_in(&self, country: &str) -> Result<Vec<Show>> {
        let body = self.client.fetch("/feeds/currentshows.php").await?;
        let doc = parse_document(&body)?;

        parse_current_shows(&doc, country)?
            .into_iter()
            .map(|entry| Show::from_ref(self.client.clone(), entry))
            .collect()
    }

    /// Search for shows. Results come back in feed order, each a
    /// minimally-populated [`Show`].
    ///
    /// # Errors
    /// * `TvRageError::InvalidArgument` if `query` is empty or
    ///   whitespace-only
    ///
    /// # Example
    /// ```no_run
    /// use tvrage_core::TvRage;
    ///
    /// # async fn example() -> Result<(), tvrage_core::TvRageError> {
    /// let tvrage = TvRage::new()?;
    /// for mut show in tvrage.search("house").await? {
    ///     let name = show.name().await?;
    ///     println!("{} {:?}", show.id(), name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, query: &str) -> Result<Vec<Show>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(TvRageError::InvalidArgument(
                "search query cannot be empty".to_string(),
            ));
        }

        let path = format!("/feeds/search.php?show={}", urlencoding::encode(trimmed));
        let body = self.client.fetch(&path).await?;
        let doc = parse_document(&body)?;

        parse_search_results(&doc)?
            .into_iter()
            .map(|entry| Show::from_ref(self.client.clone(), entry))
            .collect()
    }
}
