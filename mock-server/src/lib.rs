//! Stand-in for the Epidata API used by integration tests.
//!
//! `GET /api.php` echoes its query parameters back as a single record, so a
//! test can check exactly what a client put on the wire. `GET /bulk` answers
//! with an envelope larger than common client body limits.

use axum::{extract::Query, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// Records in the `/bulk` envelope; serialized it exceeds 10 MB.
pub const BULK_ROWS: usize = 100_000;

/// Response envelope, mirroring what the real API returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub result: i64,
    pub message: String,
    pub epidata: Option<Vec<Value>>,
}

impl Envelope {
    fn failure(result: i64, message: &str) -> Self {
        Self {
            result,
            message: message.to_string(),
            epidata: None,
        }
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/api.php", get(api))
        .route("/not-json", get(not_json))
        .route("/bulk", get(bulk))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn api(Query(params): Query<Vec<(String, String)>>) -> Json<Envelope> {
    debug!(?params, "epidata request");

    if !params.iter().any(|(key, _)| key == "source") {
        return Json(Envelope::failure(-1, "no data source specified"));
    }
    if params.iter().any(|(_, value)| value.is_empty()) {
        return Json(Envelope::failure(-2, "no results"));
    }

    let record: Map<String, Value> = params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    Json(Envelope {
        result: 1,
        message: "success".to_string(),
        epidata: Some(vec![Value::Object(record)]),
    })
}

async fn not_json() -> &'static str {
    "<html><body>502 Bad Gateway</body></html>"
}

async fn bulk() -> Json<Envelope> {
    let padding = "x".repeat(120);
    let epidata = (0..BULK_ROWS)
        .map(|row| serde_json::json!({ "row": row, "padding": padding }))
        .collect();
    Json(Envelope {
        result: 1,
        message: "success".to_string(),
        epidata: Some(epidata),
    })
}
