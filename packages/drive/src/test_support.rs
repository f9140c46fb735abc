use std::sync::Arc;

use serde_json::{json, Value};

use drivefs_http::testing::MockExecutor;

use crate::client::DriveClient;

/// A client for drive `d1` backed by `mock`.
pub(crate) fn mock_client(mock: &MockExecutor) -> DriveClient {
    DriveClient::new(Arc::new(mock.clone()), "d1")
}

pub(crate) fn dir_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "webUrl": format!("https://drive.example/{}", name),
        "folder": {"childCount": 0}
    })
}

pub(crate) fn created_dir_json(id: &str, name: &str, parent_id: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "webUrl": format!("https://drive.example/{}", name),
        "folder": {"childCount": 0},
        "parentReference": {"id": parent_id}
    })
}

pub(crate) fn file_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "webUrl": format!("https://drive.example/{}", name),
        "size": 4,
        "file": {"mimeType": "text/plain"}
    })
}
