use busline_client::{BuslineClient, ClientConfig};
use busline_model::{
    Category, CategoryProvider, DeleteError, FetchError, PageRequest, RecordDeleter, RecordId,
    RecordProvider,
};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::Filter;

struct Backend {
    client: BuslineClient,
    queries: Arc<Mutex<Vec<String>>>,
    known: RecordId,
}

/// In-process stand-in for the REST backend
fn spawn_backend() -> Backend {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let known = RecordId(Uuid::new_v4());

    let buses = warp::path!("api" / "v1" / "buses")
        .and(warp::get())
        .map(|| warp::reply::json(&json!(["12", "34"])));

    let log = queries.clone();
    let items = warp::path!("api" / "v1" / "items" / "bus" / String)
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(move |line: String, query: HashMap<String, String>| {
            log.lock().push(format!(
                "{line} skip={} limit={}",
                query.get("skip").cloned().unwrap_or_default(),
                query.get("limit").cloned().unwrap_or_default(),
            ));
            let (status, body) = match line.as_str() {
                "34" => (
                    StatusCode::OK,
                    json!({
                        "data": [
                            {"id": Uuid::new_v4(), "title": "umbrella", "description": "black", "owner_id": Uuid::new_v4()},
                            {"id": Uuid::new_v4(), "title": "scarf", "description": null, "owner_id": Uuid::new_v4()}
                        ],
                        "count": 3
                    }),
                ),
                "broken" => (StatusCode::INTERNAL_SERVER_ERROR, json!({"detail": "db down"})),
                "garbled" => (StatusCode::OK, json!({"rows": []})),
                _ => (StatusCode::OK, json!({"data": [], "count": 0})),
            };
            warp::reply::with_status(warp::reply::json(&body), status)
        });

    let known_id = known.to_string();
    let delete = warp::path!("api" / "v1" / "items" / String)
        .and(warp::delete())
        .map(move |id: String| {
            if id == known_id {
                warp::reply::with_status(
                    warp::reply::json(&json!({"message": "Item deleted successfully"})),
                    StatusCode::OK,
                )
            } else {
                warp::reply::with_status(
                    warp::reply::json(&json!({"detail": "Item not found"})),
                    StatusCode::NOT_FOUND,
                )
            }
        });

    let (addr, server) = warp::serve(buses.or(items).or(delete)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let client =
        BuslineClient::new(&ClientConfig::new().with_base_url(format!("http://{addr}"))).unwrap();
    Backend {
        client,
        queries,
        known,
    }
}

#[tokio::test]
async fn lists_bus_lines() {
    let backend = spawn_backend();
    let lines = backend.client.list_categories().await.unwrap();
    assert_eq!(lines, vec![Category::new("12"), Category::new("34")]);
}

#[tokio::test]
async fn fetches_first_page_for_line() {
    let backend = spawn_backend();
    let page = backend
        .client
        .list_records_by_category(&Category::new("34"), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.has_more);
    assert_eq!(page.items[0].title, "umbrella");
    assert_eq!(page.items[1].description, None);
    assert_eq!(
        backend.queries.lock().as_slice(),
        ["34 skip=0 limit=20".to_string()]
    );
}

#[tokio::test]
async fn passes_paging_window_through() {
    let backend = spawn_backend();
    let window = PageRequest::new(40, 5).unwrap();
    let page = backend
        .client
        .list_records_by_category(&Category::new("12"), window)
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(!page.has_more);
    assert_eq!(
        backend.queries.lock().as_slice(),
        ["12 skip=40 limit=5".to_string()]
    );
}

#[tokio::test]
async fn backend_detail_becomes_status_error() {
    let backend = spawn_backend();
    let err = backend
        .client
        .list_records_by_category(&Category::new("broken"), PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FetchError::Status {
            status: 500,
            message: "db down".into()
        }
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unexpected_body_is_decode_error() {
    let backend = spawn_backend();
    let err = backend
        .client
        .list_records_by_category(&Category::new("garbled"), PageRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn delete_known_and_unknown_records() {
    let backend = spawn_backend();
    backend.client.delete_record(backend.known).await.unwrap();

    let missing = RecordId(Uuid::new_v4());
    assert_eq!(
        backend.client.delete_record(missing).await,
        Err(DeleteError::NotFound(missing))
    );
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let client = BuslineClient::new(&ClientConfig::new().with_base_url("http://127.0.0.1:1")).unwrap();
    let err = client.list_categories().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert!(matches!(
        client.delete_record(RecordId::new()).await,
        Err(DeleteError::Transport(_))
    ));
}
