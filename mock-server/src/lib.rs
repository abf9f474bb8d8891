//! Fixture server for endpoint-core integration tests.
//!
//! Exposes a small item store plus routes that exercise every response
//! shape the engine's normalizer distinguishes: JSON bodies, plain-text
//! bodies, bodiless statuses, and query/body echoes.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub name: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Item>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).delete(delete_item))
        .route("/echo", get(echo_query).put(echo_body))
        .route("/text", get(plain_text))
        .route("/status/{code}", get(fixed_status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    let items = db.read().await;
    Json(items.values().cloned().collect())
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<CreateItem>,
) -> (StatusCode, Json<Item>) {
    let item = Item {
        id: Uuid::new_v4(),
        name: input.name,
    };
    db.write().await.insert(item.id, item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn get_item(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Item>, StatusCode> {
    let items = db.read().await;
    items.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut items = db.write().await;
    items.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

/// Reflect the raw query string so tests can assert on exactly what the
/// engine put on the wire.
async fn echo_query(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({ "query": query.unwrap_or_default() }))
}

/// Reflect a JSON request body so tests can assert on payload encoding.
async fn echo_body(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "received": body }))
}

async fn plain_text() -> impl IntoResponse {
    ([("content-type", "text/plain")], "plain text response")
}

/// Respond with the requested status code and no body.
async fn fixed_status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_to_json() {
        let item = Item {
            id: Uuid::nil(),
            name: "Test".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["name"], "Test");
    }

    #[test]
    fn item_roundtrips_through_json() {
        let item = Item {
            id: Uuid::new_v4(),
            name: "Roundtrip".to_string(),
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, item.id);
        assert_eq!(back.name, item.name);
    }

    #[test]
    fn create_item_rejects_missing_name() {
        let result: Result<CreateItem, _> = serde_json::from_str(r#"{"nope":1}"#);
        assert!(result.is_err());
    }
}
