#![allow(dead_code)]
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use g53_api::{create_api_routes, AppState};
use g53_infrastructure::dns::{PrivateRecordStore, PublicAnswerCache};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::atomic::AtomicU32;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<PrivateRecordStore>,
    pub cache: Arc<PublicAnswerCache>,
    pub default_ttl: Arc<AtomicU32>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(PrivateRecordStore::new(128).unwrap());
        let cache = Arc::new(PublicAnswerCache::new(256 * 4).unwrap());
        let default_ttl = Arc::new(AtomicU32::new(0));

        let state = AppState::new(store.clone(), cache.clone(), Arc::clone(&default_ttl));

        Self {
            router: create_api_routes(state),
            store,
            cache,
            default_ttl,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, String) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, text) = self.send(method, uri, body).await;
        let json = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap()
        };
        (status, json)
    }
}
