use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "partner-token";

/// Behaviour of a mocked partner instance.
#[derive(Clone, Default)]
pub struct MockPartnerSetup {
    pub datasets: Vec<String>,
    /// Datasets whose SPARQL endpoint answers with a server error.
    pub failing_datasets: HashSet<String>,
    /// Replaces the generated endpoint listing when set.
    pub listing_override: Option<String>,
    /// Status of the endpoint listing.
    pub listing_status: Option<StatusCode>,
    /// List endpoints as `host:port:None/api/jena/...` and `host:port:443/api/jena/...`.
    pub malformed_listing: bool,
    /// Render the listing as a Python list with single quoted strings.
    pub single_quoted_listing: bool,
}

#[derive(Clone)]
struct MockState {
    address: String,
    setup: MockPartnerSetup,
    queried: Arc<Mutex<Vec<String>>>,
}

pub struct MockPartner {
    pub address: String,
    queried: Arc<Mutex<Vec<String>>>,
}

impl MockPartner {
    pub fn queried_datasets(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

async fn list_endpoints(State(state): State<MockState>, headers: HeaderMap) -> (StatusCode, String) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "Unauthorized".to_string());
    }
    if let Some(status) = state.setup.listing_status {
        return (status, "Listing failed".to_string());
    }
    if let Some(listing) = &state.setup.listing_override {
        return (StatusCode::OK, listing.clone());
    }
    let endpoints: Vec<String> = state
        .setup
        .datasets
        .iter()
        .enumerate()
        .map(|(i, ds)| {
            let jena_path = match (state.setup.malformed_listing, i % 2) {
                (false, _) => "/api/v1/jena",
                (true, 0) => ":None/api/jena",
                (true, _) => ":443/api/jena",
            };
            format!("{}{}/{}/query", state.address, jena_path, ds)
        })
        .collect();
    if state.setup.single_quoted_listing {
        let quoted: Vec<String> = endpoints.iter().map(|e| format!("'{}'", e)).collect();
        return (StatusCode::OK, format!("[{}]", quoted.join(", ")));
    }
    (StatusCode::OK, json!(endpoints).to_string())
}

async fn sparql(
    State(state): State<MockState>,
    Path(dataset): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "Unauthorized".to_string());
    }
    state.queried.lock().unwrap().push(dataset.clone());
    if state.setup.failing_datasets.contains(&dataset) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Boom".to_string());
    }
    let body = json!({
        "head": {"vars": ["p", "matDesVal"]},
        "results": {"bindings": [
            {"p": {"type": "uri", "value": format!("https://example.org/{}/p1", dataset)},
             "matDesVal": {"type": "literal", "value": "S355"}},
            {"p": {"type": "uri", "value": format!("https://example.org/{}/p2", dataset)},
             "matDesVal": {"type": "literal", "value": "DC04"}}
        ]}
    });
    (StatusCode::OK, body.to_string())
}

pub async fn start_mock_partner(setup: MockPartnerSetup) -> MockPartner {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    let queried = Arc::new(Mutex::new(vec![]));
    let state = MockState {
        address: address.clone(),
        setup,
        queried: queried.clone(),
    };
    let app = Router::new()
        .route("/api/v1/endpoints", get(list_endpoints))
        .route("/api/v1/jena/:dataset/query", get(sparql))
        .with_state(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    MockPartner { address, queried }
}
