use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Query, State},
    http::{Request, StatusCode, header},
    routing::get,
};
use bandtracks_web::{
    build_router, itunes::ITunesClient, search::TrackSearchService, state::AppState,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tower::ServiceExt;

pub const HOUR: Duration = Duration::from_secs(60 * 60);

pub fn song(artist: &str, track_id: i64, album: &str, track: &str) -> Value {
    json!({
        "wrapperType": "track",
        "kind": "song",
        "artistName": artist,
        "trackId": track_id,
        "collectionName": album,
        "trackName": track,
        "previewUrl": format!("https://audio.example.com/{}.m4a", track_id),
        "releaseDate": "1975-10-31T08:00:00Z",
        "trackPrice": 1.29,
        "currency": "USD"
    })
}

pub fn music_video(artist: &str, track_id: i64, track: &str) -> Value {
    json!({
        "wrapperType": "track",
        "kind": "music-video",
        "artistName": artist,
        "trackId": track_id,
        "trackName": track,
        "trackPrice": 1.99,
        "currency": "USD"
    })
}

pub fn album(artist: &str, collection_id: i64, name: &str) -> Value {
    json!({
        "wrapperType": "collection",
        "collectionType": "Album",
        "artistName": artist,
        "collectionId": collection_id,
        "collectionName": name,
        "currency": "USD"
    })
}

pub fn itunes_payload(results: Vec<Value>) -> Value {
    json!({
        "resultCount": results.len(),
        "results": results
    })
}

/// A mix of everything iTunes returns for "queen": real Queen songs, a
/// tribute band, a music video and an album record.
pub fn queen_payload() -> Value {
    itunes_payload(vec![
        song("Queen", 1, "A Night at the Opera", "Bohemian Rhapsody"),
        song("queen tribute band", 2, "Tribute Live", "Bohemian Rhapsody"),
        music_video("Queen", 3, "Bohemian Rhapsody (Video)"),
        album("Queen", 4, "A Night at the Opera"),
        song("QUEEN", 5, "News of the World", "We Will Rock You"),
        song("Queen", 6, "A Night at the Opera", "Love of My Life"),
    ])
}

#[derive(Clone)]
struct MockState {
    hits: Arc<AtomicUsize>,
    status: StatusCode,
    body: Arc<String>,
    delay: Duration,
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

async fn mock_search(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = Some(params);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body.as_ref().clone())
}

/// Stand-in for the iTunes Search API, listening on an ephemeral local port.
pub struct MockItunes {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
    _shutdown_tx: oneshot::Sender<()>,
}

impl MockItunes {
    pub async fn start(payload: Value) -> Self {
        Self::start_raw(StatusCode::OK, payload.to_string()).await
    }

    pub async fn failing(status: StatusCode) -> Self {
        Self::start_raw(status, "{\"errorMessage\":\"unavailable\"}".to_string()).await
    }

    pub async fn start_delayed(payload: Value, delay: Duration) -> Self {
        Self::spawn(StatusCode::OK, payload.to_string(), delay).await
    }

    pub async fn start_raw(status: StatusCode, body: String) -> Self {
        Self::spawn(status, body, Duration::ZERO).await
    }

    async fn spawn(status: StatusCode, body: String, delay: Duration) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let last_query = Arc::new(Mutex::new(None));

        let app = Router::new()
            .route("/search", get(mock_search))
            .with_state(MockState {
                hits: hits.clone(),
                status,
                body: Arc::new(body),
                delay,
                last_query: last_query.clone(),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
            last_query,
            _shutdown_tx: shutdown_tx,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.last_query.lock().unwrap().clone()
    }

    pub fn search_service(&self, ttl: Duration) -> TrackSearchService {
        self.search_service_with_timeout(ttl, Duration::from_secs(5))
    }

    pub fn search_service_with_timeout(&self, ttl: Duration, timeout: Duration) -> TrackSearchService {
        let client = ITunesClient::new(self.base_url.clone(), 200, timeout);
        TrackSearchService::new(client, ttl, 1_000)
    }
}

pub fn create_test_state(itunes: &MockItunes, ttl: Duration) -> Arc<AppState> {
    Arc::new(AppState::with_search(itunes.search_service(ttl)))
}

pub fn create_test_app(itunes: &MockItunes, ttl: Duration) -> (Router, Arc<AppState>) {
    let state = create_test_state(itunes, ttl);
    (build_router(state.clone()), state)
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

pub fn post_raw(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body)
}

pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub fn search_uri(name: &str) -> String {
    format!("/search_tracks?name={}", urlencoding::encode(name))
}
