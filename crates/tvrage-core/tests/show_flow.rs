//! End-to-end tests for the show flows against a mocked feed service.
//!
//! Every test mounts the relevant feed fixtures on a local wiremock server
//! and asserts both the resulting entities and the fetch accounting (how
//! often each feed endpoint was actually hit).

use tvrage_core::client::ClientConfig;
use tvrage_core::feed::parse_document;
use tvrage_core::{Show, ShowOptions, TvRage, TvRageError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHOWINFO: &str = include_str!("fixtures/showinfo.xml");
const EPISODE_LIST: &str = include_str!("fixtures/episode_list.xml");
const EPISODE_LIST_ONE_SEASON: &str = include_str!("fixtures/episode_list_one_season.xml");
const FULL_SHOW_INFO: &str = include_str!("fixtures/full_show_info.xml");
const CURRENT_SHOWS: &str = include_str!("fixtures/currentshows.xml");
const QUICKINFO: &str = include_str!("fixtures/quickinfo.html");
const QUICKINFO_MISSING: &str = include_str!("fixtures/quickinfo_missing.html");
const SEARCH: &str = include_str!("fixtures/search.xml");

fn tvrage_for(server: &MockServer) -> TvRage {
    // effectively unthrottled, tests should not sleep
    let config = ClientConfig {
        base_url: server.uri(),
        requests_per_second: 1000.0,
        timeout_secs: 5,
    };
    TvRage::with_config(config).expect("client should build")
}

async fn mount_feed(server: &MockServer, feed_path: &str, sid: &str, body: &str, hits: u64) {
    Mock::given(method("GET"))
        .and(path(feed_path))
        .and(query_param("sid", sid))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn detail_attributes_come_from_a_single_fetch() {
    let server = MockServer::start().await;
    mount_feed(&server, "/feeds/showinfo.php", "2930", SHOWINFO, 1).await;

    let tvrage = tvrage_for(&server);
    let mut show = tvrage.show("2930").unwrap();
    assert!(!show.detail_loaded());

    // read a pile of distinct attributes; the expect(1) above proves one fetch
    assert_eq!(
        show.name().await.unwrap().as_deref(),
        Some("Buffy the Vampire Slayer")
    );
    assert_eq!(
        show.link().await.unwrap().as_deref(),
        Some("http://tvrage.com/Buffy_The_Vampire_Slayer")
    );
    assert_eq!(show.started().await.unwrap().as_deref(), Some("1997"));
    assert_eq!(
        show.start_date().await.unwrap().as_deref(),
        Some("Mar/10/1997")
    );
    assert_eq!(show.ended().await.unwrap().as_deref(), Some("May/20/2003"));
    assert_eq!(show.network().await.unwrap().as_deref(), Some("UPN"));
    assert_eq!(show.air_time().await.unwrap().as_deref(), Some("20:00"));
    assert_eq!(
        show.time_zone().await.unwrap().as_deref(),
        Some("GMT-5 -DST")
    );
    assert_eq!(show.run_time().await.unwrap().as_deref(), Some("60"));
    assert_eq!(show.origin_country().await.unwrap().as_deref(), Some("US"));
    assert_eq!(show.air_day().await.unwrap().as_deref(), Some("Tuesday"));
    assert_eq!(
        show.classification().await.unwrap().as_deref(),
        Some("Scripted")
    );
    assert_eq!(show.season_count().await.unwrap().as_deref(), Some("7"));
    assert_eq!(
        show.status().await.unwrap().as_deref(),
        Some("Canceled/Ended")
    );
    assert_eq!(
        show.genres().await.unwrap(),
        vec!["Action", "Adventure", "Comedy", "Drama", "Mystery", "Sci-Fi"]
    );

    let akas = show.akas().await.unwrap();
    assert_eq!(akas.len(), 14);
    assert_eq!(akas[0], "Buffy & vampyrerna");

    assert!(show.detail_loaded());
}

#[tokio::test]
async fn one_season_show_still_yields_a_season_sequence() {
    let server = MockServer::start().await;
    mount_feed(
        &server,
        "/feeds/episode_list.php",
        "2930",
        EPISODE_LIST_ONE_SEASON,
        1,
    )
    .await;

    let tvrage = tvrage_for(&server);
    let mut show = tvrage.show("2930").unwrap();

    let seasons = show.season_list().await.unwrap().to_vec();
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].number, 1);
    assert_eq!(seasons[0].episodes.len(), 2);
    assert_eq!(
        seasons[0].episodes[0].title.as_deref(),
        Some("Welcome to the Hellmouth (1)")
    );
}

#[tokio::test]
async fn episode_list_is_the_flattened_season_list() {
    let server = MockServer::start().await;
    // season list is memoized, so episode_list triggers no second fetch
    mount_feed(&server, "/feeds/episode_list.php", "2930", EPISODE_LIST, 1).await;

    let tvrage = tvrage_for(&server);
    let mut show = tvrage.show("2930").unwrap();

    let seasons = show.season_list().await.unwrap().to_vec();
    assert_eq!(seasons.len(), 2);

    let flattened: Vec<_> = seasons
        .iter()
        .flat_map(|season| season.episodes.iter().cloned())
        .collect();
    let episodes = show.episode_list().await.unwrap();
    assert_eq!(episodes, flattened);
    assert_eq!(episodes.len(), 5);
    assert_eq!(episodes[3].title.as_deref(), Some("When She Was Bad"));
}

#[tokio::test]
async fn full_info_returns_the_raw_show_node() {
    let server = MockServer::start().await;
    mount_feed(
        &server,
        "/feeds/full_show_info.php",
        "2930",
        FULL_SHOW_INFO,
        1,
    )
    .await;

    let tvrage = tvrage_for(&server);
    let node = tvrage.full_info("2930").await.unwrap();

    let expected = parse_document(FULL_SHOW_INFO).unwrap();
    assert_eq!(Some(&node), expected.get("Show"));
    assert_eq!(node.text_of("name"), Some("Buffy the Vampire Slayer"));
}

#[tokio::test]
async fn greedy_show_fetches_consolidated_feed_only() {
    let server = MockServer::start().await;
    // the non-greedy instance takes the single episode_list hit; the greedy
    // one must account for the single full_show_info hit and nothing else
    mount_feed(
        &server,
        "/feeds/full_show_info.php",
        "2930",
        FULL_SHOW_INFO,
        1,
    )
    .await;
    mount_feed(&server, "/feeds/episode_list.php", "2930", EPISODE_LIST, 1).await;
    mount_feed(&server, "/feeds/showinfo.php", "2930", SHOWINFO, 0).await;

    let tvrage = tvrage_for(&server);

    let mut lazy = tvrage.show("2930").unwrap();
    let lazy_seasons = lazy.season_list().await.unwrap().to_vec();

    let mut greedy = tvrage
        .show_with("2930", ShowOptions { greedy: true })
        .await
        .unwrap();
    assert!(greedy.detail_loaded());

    // attributes come from the consolidated payload, not showinfo.php
    assert_eq!(
        greedy.name().await.unwrap().as_deref(),
        Some("Buffy the Vampire Slayer")
    );
    assert_eq!(greedy.network().await.unwrap().as_deref(), Some("UPN"));

    // season structure matches the dedicated episode-list feed's
    let greedy_seasons = greedy.season_list().await.unwrap().to_vec();
    assert_eq!(greedy_seasons, lazy_seasons);
}

#[tokio::test]
async fn by_name_resolves_to_a_show() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tools/quickinfo.php"))
        .and(query_param("show", "The Colbert Report"))
        .respond_with(ResponseTemplate::new(200).set_body_string(QUICKINFO))
        .expect(1)
        .mount(&server)
        .await;

    let tvrage = tvrage_for(&server);
    let mut show = tvrage.by_name("The Colbert Report").await.unwrap();

    assert_eq!(show.id(), "6715");
    // the quickinfo name rides along; detail stays unloaded
    assert_eq!(
        show.name().await.unwrap().as_deref(),
        Some("The Colbert Report")
    );
    assert!(!show.detail_loaded());
}

#[tokio::test]
async fn by_name_without_id_marker_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tools/quickinfo.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(QUICKINFO_MISSING))
        .mount(&server)
        .await;

    let tvrage = tvrage_for(&server);
    let result = tvrage.by_name("The Colbert Report").await;

    assert!(matches!(
        result,
        Err(TvRageError::ShowNotFound(name)) if name == "The Colbert Report"
    ));
}

#[tokio::test]
async fn current_defaults_to_us() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/currentshows.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CURRENT_SHOWS))
        .expect(1)
        .mount(&server)
        .await;

    let tvrage = tvrage_for(&server);
    let shows: Vec<Show> = tvrage.current().await.unwrap();

    assert_eq!(shows.len(), 5);
    assert_eq!(shows[0].id(), "3183");
    assert!(shows.iter().all(|show| !show.detail_loaded()));
}

#[tokio::test]
async fn current_filters_by_country() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/currentshows.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CURRENT_SHOWS))
        .mount(&server)
        .await;

    let tvrage = tvrage_for(&server);

    let mut uk_shows = tvrage.current_in("UK").await.unwrap();
    assert_eq!(uk_shows.len(), 3);
    assert_eq!(
        uk_shows[0].name().await.unwrap().as_deref(),
        Some("Doctor Who")
    );

    let missing = tvrage.current_in("NL").await;
    assert!(matches!(
        missing,
        Err(TvRageError::CountryNotFound(code)) if code == "NL"
    ));
}

#[tokio::test]
async fn search_returns_results_in_feed_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/search.php"))
        .and(query_param("show", "house"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH))
        .expect(1)
        .mount(&server)
        .await;

    let tvrage = tvrage_for(&server);
    let mut shows = tvrage.search("house").await.unwrap();

    assert_eq!(shows.len(), 4);
    let ids: Vec<&str> = shows.iter().map(Show::id).collect();
    assert_eq!(ids, vec!["22622", "3908", "6247", "31332"]);
    assert_eq!(shows[0].name().await.unwrap().as_deref(), Some("House"));
}

#[tokio::test]
async fn malformed_feed_surfaces_a_parse_error() {
    let server = MockServer::start().await;
    mount_feed(
        &server,
        "/feeds/showinfo.php",
        "2930",
        "<Showinfo><showname>Broken",
        1,
    )
    .await;

    let tvrage = tvrage_for(&server);
    let mut show = tvrage.show("2930").unwrap();
    assert!(matches!(
        show.name().await,
        Err(TvRageError::Parse(_))
    ));
}

#[tokio::test]
async fn transport_failure_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feeds/showinfo.php"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tvrage = tvrage_for(&server);
    let mut show = tvrage.show("2930").unwrap();
    assert!(matches!(
        show.name().await,
        Err(TvRageError::Transport(_))
    ));
}
