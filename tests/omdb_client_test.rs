/// OmdbClient against a local one-shot HTTP fixture
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use popcorn_tui::{ApiError, MovieApi, OmdbClient};

/// Serve a single response; the handle yields the request line that was received
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/", listener.local_addr().unwrap());
    let status = status.to_string();
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header == "\r\n" || header.is_empty() {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        request_line.trim_end().to_string()
    });

    (endpoint, handle)
}

fn client(endpoint: &str) -> OmdbClient {
    OmdbClient::new(endpoint, "test-key", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_search_sends_key_and_query() {
    let body = r#"{"Search":[{"Title":"Inception","Year":"2010","imdbID":"tt1375666","Poster":"N/A"}],"totalResults":"1","Response":"True"}"#;
    let (endpoint, server) = serve_once("200 OK", body);

    let results = client(&endpoint).search("inception").await.unwrap();
    let request = server.join().unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "tt1375666");
    assert_eq!(results[0].poster_url, "");
    assert!(request.starts_with("GET /?"));
    assert!(request.contains("apikey=test-key"));
    assert!(request.contains("s=inception"));
}

#[tokio::test]
async fn test_detail_parses_runtime_and_rating() {
    let body = r#"{"Title":"Inception","Year":"2010","Released":"16 Jul 2010","Runtime":"148 min","Genre":"Action, Sci-Fi","Director":"Christopher Nolan","Actors":"Leonardo DiCaprio","Plot":"A thief...","Poster":"https://example.com/p.jpg","imdbRating":"8.8","imdbID":"tt1375666","Response":"True"}"#;
    let (endpoint, server) = serve_once("200 OK", body);

    let detail = client(&endpoint).fetch_detail("tt1375666").await.unwrap();
    let request = server.join().unwrap();

    assert!(request.contains("i=tt1375666"));
    assert_eq!(detail.runtime_minutes, 148);
    assert_eq!(detail.external_rating, 8.8);
    assert_eq!(detail.director, "Christopher Nolan");
}

#[tokio::test]
async fn test_response_false_maps_to_not_found() {
    let (endpoint, server) = serve_once("200 OK", r#"{"Response":"False","Error":"Movie not found!"}"#);

    let err = client(&endpoint).search("qwertyuiop").await.unwrap_err();
    server.join().unwrap();

    assert_eq!(err, ApiError::NotFound("Movie not found!".to_string()));
    assert_eq!(err.to_string(), "Movie not found!");
}

#[tokio::test]
async fn test_non_ok_status_maps_to_network_error() {
    let (endpoint, server) = serve_once("401 Unauthorized", r#"{"Response":"False","Error":"Invalid API key!"}"#);

    let err = client(&endpoint).search("inception").await.unwrap_err();
    server.join().unwrap();

    assert_eq!(err, ApiError::Network { status: 401 });
}

#[tokio::test]
async fn test_malformed_body_maps_to_decode_error() {
    let (endpoint, server) = serve_once("200 OK", "<html>oops</html>");

    let err = client(&endpoint).search("inception").await.unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_maps_to_transport_error() {
    // Bind then drop to get a port nothing listens on
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

    let err = client(&format!("http://{}/", addr)).search("inception").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}
