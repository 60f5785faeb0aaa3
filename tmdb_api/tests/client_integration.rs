use tmdb_api::types::{MediaKind, SearchScope};
use tmdb_api::{Client, DiscoverQuery, Error, PageQuery, Query, SearchQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn discover_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("discover_movie_page1.json");

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("language", "fr-FR"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(query_param("with_genres", "28"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "test-key").unwrap();
    let query = DiscoverQuery::new(MediaKind::Movie).with_genre(28).with_page(2);
    let resp = client.discover(&query).await.unwrap();

    assert_eq!(resp.results.len(), 2);
    assert_eq!(resp.results[0].id, 912649);
    assert_eq!(resp.results[1].title(), Some("Le Robot Sauvage"));
}

#[tokio::test]
async fn discover_tv_uses_tv_path() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("discover_tv_page1.json");

    Mock::given(method("GET"))
        .and(path("/discover/tv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "k").unwrap();
    let resp = client
        .discover(&DiscoverQuery::new(MediaKind::Tv))
        .await
        .unwrap();
    assert_eq!(resp.results[0].title(), Some("Breaking Bad"));
}

#[tokio::test]
async fn discover_server_error_keeps_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"status_code":7,"status_message":"Invalid API key"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "bad").unwrap();
    let err = client
        .discover(&DiscoverQuery::new(MediaKind::Movie))
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn discover_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "k").unwrap();
    let result = client.discover(&DiscoverQuery::new(MediaKind::Movie)).await;
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[tokio::test]
async fn page_past_the_end_is_empty_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("empty_page.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "k").unwrap();
    let resp = client
        .discover(&DiscoverQuery::new(MediaKind::Movie).with_page(501))
        .await
        .unwrap();
    assert!(resp.results.is_empty());
}

#[tokio::test]
async fn search_multi_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/multi"))
        .and(query_param("query", "nolan"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("search_multi.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "k").unwrap();
    let resp = client
        .search(&SearchQuery::new(SearchScope::Multi, "nolan"))
        .await
        .unwrap();
    assert_eq!(resp.results.len(), 3);
    assert_eq!(resp.results[1].media_type(), Some("person"));
}

#[tokio::test]
async fn reviews_request_language_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/550/reviews"))
        .and(query_param("language", "en-US"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"page":1,"results":[{"author":"a","content":"great"}]}"#),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "k").unwrap();
    let resp = client
        .reviews(
            MediaKind::Movie,
            550,
            &PageQuery::default().with_language("en-US").with_page(1),
        )
        .await
        .unwrap();
    assert_eq!(resp.results.len(), 1);
    assert_eq!(resp.total_results, 0);
}
