//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::key_pool::AccessKeyPool;
use super::types::{
    TmdbErrorResponse, TmdbMovie, TmdbMovieDetails, TmdbPage, TmdbSeries, TmdbTvDetails,
    TmdbVideoList,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Number of key rotations allowed per request on HTTP 429.
const MAX_KEY_ROTATIONS: u32 = 1;

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API keys sent as the `api_key` query parameter.
    keys: AccessKeyPool,
    /// Response language.
    language: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_keys: Vec<String>,
    user_agent: Option<String>,
    language: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_keys: Vec::new(),
            user_agent: None,
            language: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Appends an API key to the rotation pool.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_keys.push(key.into());
        self
    }

    /// Appends several API keys to the rotation pool, in order.
    #[must_use]
    pub fn api_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.api_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (default: "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - no API key is set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let keys = AccessKeyPool::new(self.api_keys)?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            keys,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the index of the API key currently in use.
    #[must_use]
    pub fn key_index(&self) -> usize {
        self.keys.index()
    }

    /// Sends a GET request with the active API key and query params.
    /// On HTTP 429, rotates to the next key and retries once.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut rotations = 0u32;
        loop {
            let (key_index, key) = self.keys.active();
            let request = self
                .http_client
                .get(url.clone())
                .query(query)
                .query(&[("api_key", key)])
                .build()
                .with_context(|| format!("failed to build request: {path}"))?;

            tracing::debug!(key_index, "TMDB API request");

            let result = self.http_client.execute(request).await;
            let response = result.with_context(|| format!("request failed: {path}"))?;

            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS && rotations < MAX_KEY_ROTATIONS {
                rotations = rotations.saturating_add(1);
                let next = self.keys.rotate_from(key_index);
                tracing::warn!(
                    key_index = next,
                    key_count = self.keys.len(),
                    "TMDB API rate limited (429). Rotating API key and retrying..."
                );
                continue;
            }

            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| String::from("<failed to read body>"));
                if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                    bail!(
                        "TMDB API error (HTTP {}): code={}, message={}",
                        status,
                        error_response.status_code,
                        error_response.status_message,
                    );
                }
                bail!("TMDB API error (HTTP {status}): {body}");
            }

            let body = response
                .text()
                .await
                .with_context(|| format!("failed to read response body: {path}"))?;
            let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
            let parsed =
                raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
            return Ok(parsed);
        }
    }

    /// Runs `get_json` and logs any failure, resolving it to `None`.
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Option<T> {
        match self.get_json(path, query).await {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::error!(path, error = format!("{e:#}"), "TMDB API request failed");
                None
            }
        }
    }

    /// `language` + `page=1` query shared by paged list endpoints.
    fn first_page_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("language", self.language.clone()),
            ("page", String::from("1")),
        ]
    }

    /// `language` query shared by detail and video endpoints.
    fn language_query(&self) -> [(&'static str, String); 1] {
        [("language", self.language.clone())]
    }

    /// `discover/*` query filtered by genre.
    fn discover_query(&self, genre_id: u32) -> Vec<(&'static str, String)> {
        let mut query = vec![("with_genres", genre_id.to_string())];
        query.extend(self.first_page_query());
        query
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn popular_movies(&self) -> Option<TmdbPage<TmdbMovie>> {
        self.fetch("movie/popular", &self.first_page_query()).await
    }

    #[instrument(skip_all)]
    async fn trending_movies(&self) -> Option<TmdbPage<TmdbMovie>> {
        self.fetch("trending/movie/week", &self.language_query())
            .await
    }

    #[instrument(skip_all)]
    async fn popular_tv(&self) -> Option<TmdbPage<TmdbSeries>> {
        self.fetch("tv/popular", &self.first_page_query()).await
    }

    #[instrument(skip(self))]
    async fn movies_by_genre(&self, genre_id: u32) -> Option<TmdbPage<TmdbMovie>> {
        self.fetch("discover/movie", &self.discover_query(genre_id))
            .await
    }

    #[instrument(skip(self))]
    async fn tv_by_genre(&self, genre_id: u32) -> Option<TmdbPage<TmdbSeries>> {
        self.fetch("discover/tv", &self.discover_query(genre_id))
            .await
    }

    #[instrument(skip(self))]
    async fn movie_videos(&self, movie_id: u64) -> Option<TmdbVideoList> {
        let path = format!("movie/{movie_id}/videos");
        self.fetch(&path, &self.language_query()).await
    }

    #[instrument(skip(self))]
    async fn tv_videos(&self, series_id: u64) -> Option<TmdbVideoList> {
        let path = format!("tv/{series_id}/videos");
        self.fetch(&path, &self.language_query()).await
    }

    #[instrument(skip(self))]
    async fn movie_details(&self, movie_id: u64) -> Option<TmdbMovieDetails> {
        let path = format!("movie/{movie_id}");
        self.fetch(&path, &self.language_query()).await
    }

    #[instrument(skip(self))]
    async fn tv_details(&self, series_id: u64) -> Option<TmdbTvDetails> {
        let path = format!("tv/{series_id}");
        self.fetch(&path, &self.language_query()).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const RATE_LIMIT_BODY: &str = r#"{"status_code":25,"status_message":"Your request count (41) is over the allowed limit of 40.","success":false}"#;

    /// Builds a client with two keys pointed at the mock server.
    fn mock_client(server: &MockServer) -> TmdbClient {
        let base_url = format!("{}/3/", server.uri());
        TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_keys(["key-a", "key-b"])
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    /// The nine list, video and detail operations.
    #[derive(Debug, Clone, Copy)]
    enum Op {
        PopularMovies,
        TrendingMovies,
        PopularTv,
        MoviesByGenre,
        TvByGenre,
        MovieVideos,
        TvVideos,
        MovieDetails,
        TvDetails,
    }

    const ALL_OPS: [(Op, &str, &str); 9] = [
        (
            Op::PopularMovies,
            "/3/movie/popular",
            include_str!("../../../../fixtures/tmdb/popular_movies.json"),
        ),
        (
            Op::TrendingMovies,
            "/3/trending/movie/week",
            include_str!("../../../../fixtures/tmdb/trending_movies_week.json"),
        ),
        (
            Op::PopularTv,
            "/3/tv/popular",
            include_str!("../../../../fixtures/tmdb/popular_tv.json"),
        ),
        (
            Op::MoviesByGenre,
            "/3/discover/movie",
            include_str!("../../../../fixtures/tmdb/popular_movies.json"),
        ),
        (
            Op::TvByGenre,
            "/3/discover/tv",
            include_str!("../../../../fixtures/tmdb/popular_tv.json"),
        ),
        (
            Op::MovieVideos,
            "/3/movie/533535/videos",
            include_str!("../../../../fixtures/tmdb/movie_videos_533535.json"),
        ),
        (
            Op::TvVideos,
            "/3/tv/1399/videos",
            include_str!("../../../../fixtures/tmdb/tv_videos_empty.json"),
        ),
        (
            Op::MovieDetails,
            "/3/movie/533535",
            include_str!("../../../../fixtures/tmdb/movie_details_533535.json"),
        ),
        (
            Op::TvDetails,
            "/3/tv/1399",
            include_str!("../../../../fixtures/tmdb/tv_details_1399.json"),
        ),
    ];

    /// Runs `op` and reports whether it produced a payload.
    async fn run_op(client: &TmdbClient, op: Op) -> bool {
        match op {
            Op::PopularMovies => client.popular_movies().await.is_some(),
            Op::TrendingMovies => client.trending_movies().await.is_some(),
            Op::PopularTv => client.popular_tv().await.is_some(),
            Op::MoviesByGenre => client.movies_by_genre(28).await.is_some(),
            Op::TvByGenre => client.tv_by_genre(35).await.is_some(),
            Op::MovieVideos => client.movie_videos(533_535).await.is_some(),
            Op::TvVideos => client.tv_videos(1399).await.is_some(),
            Op::MovieDetails => client.movie_details(533_535).await.is_some(),
            Op::TvDetails => client.tv_details(1399).await.is_some(),
        }
    }

    #[test]
    fn test_builder_requires_api_key() {
        // Arrange & Act
        let result = TmdbClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("at least one API key is required")
        );
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = TmdbClient::builder().api_key("test-key").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_defaults() {
        // Arrange & Act
        let client = TmdbClient::builder()
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(client.language, "en-US");
        assert_eq!(client.key_index(), 0);
    }

    #[test]
    fn test_parse_popular_movies_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/popular_movies.json");

        // Act
        let page: TmdbPage<TmdbMovie> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].id, 1_022_789);
        assert_eq!(page.results[0].title, "Inside Out 2");
    }

    #[test]
    fn test_parse_popular_tv_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/popular_tv.json");

        // Act
        let page: TmdbPage<TmdbSeries> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.results[0].id, 1399);
        assert_eq!(page.results[0].name, "Game of Thrones");
        assert!(page.results[0].origin_country.contains(&String::from("US")));
    }

    #[test]
    fn test_parse_movie_videos_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_videos_533535.json");

        // Act
        let videos: TmdbVideoList = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(videos.results.len(), 2);
        assert_eq!(videos.results[1].video_type, "Trailer");
        assert_eq!(videos.results[1].site, "YouTube");
        assert_eq!(videos.results[1].key, "73_1biulkYk");
    }

    #[test]
    fn test_parse_movie_details_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_details_533535.json");

        // Act
        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(details.runtime, Some(128));
        assert_eq!(details.genres.len(), 3);
        assert_eq!(details.release_date.as_deref(), Some("2024-07-24"));
    }

    #[test]
    fn test_parse_error_response() {
        // Arrange & Act
        let error: TmdbErrorResponse = serde_json::from_str(RATE_LIMIT_BODY).unwrap();

        // Assert
        assert_eq!(error.status_code, 25);
        assert!(!error.success);
    }

    #[tokio::test]
    async fn test_popular_movies_sends_key_language_and_page() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/popular_movies.json");

        Mock::given(method("GET"))
            .and(path("/3/movie/popular"))
            .and(query_param("api_key", "key-a"))
            .and(query_param("language", "en-US"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let page = client.popular_movies().await.unwrap();

        // Assert
        assert_eq!(page.results.len(), 2);
    }

    #[tokio::test]
    async fn test_movies_by_genre_sends_with_genres() {
        // Arrange
        let mock_server = MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/discover_empty.json");

        Mock::given(method("GET"))
            .and(path("/3/discover/movie"))
            .and(query_param("with_genres", "99"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let page = client.movies_by_genre(99).await.unwrap();

        // Assert
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn test_every_operation_retries_once_with_second_key() {
        for (op, op_path, json_body) in ALL_OPS {
            // Arrange
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path(op_path))
                .and(query_param("api_key", "key-a"))
                .respond_with(ResponseTemplate::new(429).set_body_string(RATE_LIMIT_BODY))
                .expect(1)
                .mount(&mock_server)
                .await;
            Mock::given(method("GET"))
                .and(path(op_path))
                .and(query_param("api_key", "key-b"))
                .respond_with(ResponseTemplate::new(200).set_body_string(json_body))
                .expect(1)
                .mount(&mock_server)
                .await;

            let client = mock_client(&mock_server);

            // Act
            let ok = run_op(&client, op).await;

            // Assert
            assert!(ok, "{op:?} should succeed after one rotation");
            assert_eq!(client.key_index(), 1, "{op:?} should rotate to key-b");
        }
    }

    #[tokio::test]
    async fn test_every_operation_gives_up_after_second_429() {
        for (op, op_path, _) in ALL_OPS {
            // Arrange
            let mock_server = MockServer::start().await;

            // Initial request + one retry, never a third
            Mock::given(method("GET"))
                .and(path(op_path))
                .respond_with(ResponseTemplate::new(429).set_body_string(RATE_LIMIT_BODY))
                .expect(2)
                .mount(&mock_server)
                .await;

            let client = mock_client(&mock_server);

            // Act
            let ok = run_op(&client, op).await;

            // Assert
            assert!(!ok, "{op:?} should resolve to None");
            assert_eq!(client.key_index(), 1, "{op:?} should rotate only once");
        }
    }

    #[tokio::test]
    async fn test_rotation_is_shared_by_later_requests() {
        // Arrange
        let mock_server = MockServer::start().await;
        let trending = include_str!("../../../../fixtures/tmdb/trending_movies_week.json");
        let popular = include_str!("../../../../fixtures/tmdb/popular_movies.json");

        Mock::given(method("GET"))
            .and(path("/3/trending/movie/week"))
            .and(query_param("api_key", "key-a"))
            .respond_with(ResponseTemplate::new(429).set_body_string(RATE_LIMIT_BODY))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/3/trending/movie/week"))
            .and(query_param("api_key", "key-b"))
            .respond_with(ResponseTemplate::new(200).set_body_string(trending))
            .mount(&mock_server)
            .await;
        // Only key-b is accepted here; a stale key-a would hit the 404 fallback.
        Mock::given(method("GET"))
            .and(path("/3/movie/popular"))
            .and(query_param("api_key", "key-b"))
            .respond_with(ResponseTemplate::new(200).set_body_string(popular))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let trending_page = client.trending_movies().await;
        let popular_page = client.popular_movies().await;

        // Assert
        assert!(trending_page.is_some());
        assert!(popular_page.is_some());
        assert_eq!(client.key_index(), 1);
    }

    #[tokio::test]
    async fn test_rotation_wraps_back_to_first_key() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string(RATE_LIMIT_BODY))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act: three failed calls, one rotation each
        for _ in 0..3 {
            let _ = client.popular_tv().await;
        }

        // Assert: 3 mod 2
        assert_eq!(client.key_index(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_429s_rotate_once() {
        // Arrange
        let mock_server = MockServer::start().await;
        let popular = include_str!("../../../../fixtures/tmdb/popular_movies.json");

        Mock::given(method("GET"))
            .and(query_param("api_key", "key-a"))
            .respond_with(ResponseTemplate::new(429).set_body_string(RATE_LIMIT_BODY))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("api_key", "key-b"))
            .respond_with(ResponseTemplate::new(200).set_body_string(popular))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act: all four are in flight on key-a before any 429 comes back
        let (a, b, c, d) = tokio::join!(
            client.popular_movies(),
            client.movies_by_genre(28),
            client.movies_by_genre(35),
            client.movies_by_genre(27),
        );

        // Assert: every retry went to key-b and the cursor rests there
        assert!(a.is_some());
        assert!(b.is_some());
        assert!(c.is_some());
        assert!(d.is_some());
        assert_eq!(client.key_index(), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let result = client.trending_movies().await;

        // Assert
        assert!(result.is_none());
        assert_eq!(client.key_index(), 0);
    }

    #[tokio::test]
    async fn test_invalid_json_returns_none() {
        // Arrange
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let result = client.movie_details(1).await;

        // Assert
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_json_reports_tmdb_error_message() {
        // Arrange
        let mock_server = MockServer::start().await;
        let error_body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let result: Result<TmdbTvDetails> = client.get_json("tv/1399", &[]).await;

        // Assert
        let err = result.unwrap_err().to_string();
        assert!(err.contains("TMDB API error"));
        assert!(err.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_network_failure_returns_none() {
        // Arrange: nothing listens on the discard port
        let client = TmdbClient::builder()
            .base_url(Url::parse("http://127.0.0.1:9/3/").unwrap())
            .api_key("key-a")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act
        let result = client.popular_movies().await;

        // Assert
        assert!(result.is_none());
    }
}
