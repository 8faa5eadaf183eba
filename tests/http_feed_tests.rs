use quakemap::prelude::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const ONE_QUAKE: &str = r#"{"type": "FeatureCollection", "features": [
    {"properties": {"mag": 2.5, "place": "10km N of Somewhere", "time": 1700000000000},
     "geometry": {"coordinates": [-118.0, 34.0, 8.0]}}
]}"#;

/// Serves exactly one HTTP response on a local port and returns the feed URL
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}/earthquakes/feed/v1.0/summary/all_week.geojson", addr)
}

#[cfg(test)]
mod http_feed_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_decodes_feed() {
        let url = serve_once("200 OK", ONE_QUAKE).await;
        let feed = fetch_feed(&HttpFeedSource::new(url)).await.unwrap();

        assert_eq!(feed.len(), 1);
        assert_eq!(feed.features[0].place(), Some("10km N of Somewhere"));
        assert_eq!(feed.features[0].depth(), 8.0);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let url = serve_once("404 Not Found", "").await;
        let result = fetch_feed(&HttpFeedSource::new(url.clone())).await;

        match result {
            Err(MapError::HttpStatus { url: failed, status }) => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("expected HTTP status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_decode_error() {
        let url = serve_once("200 OK", "<html>maintenance</html>").await;
        let result = fetch_feed(&HttpFeedSource::new(url)).await;
        assert!(matches!(result, Err(MapError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = fetch_feed(&HttpFeedSource::new(format!("http://{}/feed", addr))).await;
        assert!(matches!(result, Err(MapError::Network(_))));
    }

    #[tokio::test]
    async fn test_pipeline_over_http() {
        let url = serve_once("200 OK", ONE_QUAKE).await;
        let config = QuakeMapConfig::default().with_feed_url(url);
        let source = HttpFeedSource::new(config.feed_url.clone());
        let container = MapContainer::new("map", Point::new(800.0, 600.0));

        let map = load_earthquake_map(&config, &source, &container).await.unwrap();
        let overlay = map.overlay(quakemap::compose::OVERLAY_LAYER_ID).unwrap();
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.markers()[0].radius(), 12.5);
        assert_eq!(overlay.markers()[0].fill_color(), classify(8.0));
    }
}
