use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes;
use service::{records::RecordStore, storage::FsStorage, validate::SchemaValidator};

struct TestApp {
    base_url: String,
    data_path: PathBuf,
}

fn schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["id", "name"],
        "properties": {
            "id": {"type": "integer"},
            "name": {"type": "string"}
        }
    })
}

/// Spin up the app on an ephemeral port over an isolated temp data file.
/// `seed` of `None` models a store whose data file was never written.
async fn start_server(seed: Option<serde_json::Value>) -> anyhow::Result<TestApp> {
    let dir = std::env::temp_dir().join(format!("records-e2e-{}", Uuid::new_v4()));
    tokio::fs::create_dir_all(&dir).await?;
    let data_path = dir.join("files-data.json");
    if let Some(seed) = &seed {
        tokio::fs::write(&data_path, serde_json::to_vec_pretty(seed)?).await?;
    }

    let storage = Arc::new(FsStorage::new(&data_path));
    let validator = Arc::new(SchemaValidator::new(&schema()).expect("schema compiles"));
    let store = RecordStore::new(storage, validator);

    let app: Router = routes::build_router(store, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {e}");
        }
    });

    Ok(TestApp { base_url, data_path })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server(None).await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_missing_store_is_404_everywhere() -> anyhow::Result<()> {
    let app = start_server(None).await?;
    let c = client();

    let res = c.get(format!("{}/files", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert!(res.bytes().await?.is_empty());

    let res = c.get(format!("{}/files/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c
        .post(format!("{}/files", app.base_url))
        .json(&json!({"name": "a.txt"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(format!("{}/files/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_crud_flow() -> anyhow::Result<()> {
    let app = start_server(Some(json!({"nextId": 1, "files": []}))).await?;
    let c = client();

    // create
    let res = c
        .post(format!("{}/files", app.base_url))
        .json(&json!({"name": "a.txt"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<serde_json::Value>().await?;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "a.txt");

    // the whole document is rewritten, counter bumped
    let on_disk: serde_json::Value =
        serde_json::from_slice(&tokio::fs::read(&app.data_path).await?)?;
    assert_eq!(on_disk, json!({"nextId": 2, "files": [{"name": "a.txt", "id": 1}]}));

    // list projects {id, name}
    let res = c.get(format!("{}/files", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let listed = res.json::<serde_json::Value>().await?;
    assert_eq!(listed, json!([{"id": 1, "name": "a.txt"}]));

    // read one
    let res = c.get(format!("{}/files/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // update replaces wholesale, body id loses to the path id
    let res = c
        .put(format!("{}/files/1", app.base_url))
        .json(&json!({"id": 42, "name": "b.txt", "size": 3}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated, json!({"id": 1, "name": "b.txt", "size": 3}));

    let res = c.get(format!("{}/files/1", app.base_url)).send().await?;
    assert_eq!(res.json::<serde_json::Value>().await?, updated);

    // delete returns the removed record; counter is not reset
    let res = c.delete(format!("{}/files/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let deleted = res.json::<serde_json::Value>().await?;
    assert_eq!(deleted["id"], 1);

    let on_disk: serde_json::Value =
        serde_json::from_slice(&tokio::fs::read(&app.data_path).await?)?;
    assert_eq!(on_disk, json!({"nextId": 2, "files": []}));
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_create_is_400_and_file_is_untouched() -> anyhow::Result<()> {
    let app = start_server(Some(json!({"nextId": 5, "files": [{"id": 4, "name": "d.txt"}]})))
        .await?;
    let before = tokio::fs::read(&app.data_path).await?;

    let res = client()
        .post(format!("{}/files", app.base_url))
        .json(&json!({"name": 42}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"]["dataPath"], "/name");
    assert!(body["error"]["message"].is_string());

    let after = tokio::fs::read(&app.data_path).await?;
    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_update_is_400() -> anyhow::Result<()> {
    let app = start_server(Some(json!({"nextId": 2, "files": [{"id": 1, "name": "a.txt"}]})))
        .await?;
    let res = client()
        .put(format!("{}/files/1", app.base_url))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"]["dataPath"], "");
    Ok(())
}

#[tokio::test]
async fn e2e_update_and_delete_missing_id_answer_200_with_text() -> anyhow::Result<()> {
    let app = start_server(Some(json!({"nextId": 1, "files": []}))).await?;
    let before = tokio::fs::read(&app.data_path).await?;
    let c = client();

    let res = c
        .put(format!("{}/files/9", app.base_url))
        .json(&json!({"name": "x.txt"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "no entry with id 9");

    let res = c.delete(format!("{}/files/9", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "no entry with id 9");

    let after = tokio::fs::read(&app.data_path).await?;
    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn e2e_get_unknown_id_is_404() -> anyhow::Result<()> {
    let app = start_server(Some(json!({"nextId": 2, "files": [{"id": 1, "name": "a.txt"}]})))
        .await?;
    let res = client().get(format!("{}/files/99", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert!(res.bytes().await?.is_empty());
    Ok(())
}
