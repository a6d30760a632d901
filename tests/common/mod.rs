#![allow(dead_code)]

use futures::future::BoxFuture;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use oql_core::{AppState, ClientSettings, OqlRequest, OqlTransport, QueryError};

pub const CREDENTIAL: &str = "test-credential-0123456789";

/// What the fake service does for one query
pub struct Reply {
    pub delay: Duration,
    pub result: Result<Value, QueryError>,
}

pub fn ok(body: Value) -> Reply {
    Reply {
        delay: Duration::ZERO,
        result: Ok(body),
    }
}

pub fn fail(error: QueryError) -> Reply {
    Reply {
        delay: Duration::ZERO,
        result: Err(error),
    }
}

pub fn slow(delay_ms: u64, body: Value) -> Reply {
    Reply {
        delay: Duration::from_millis(delay_ms),
        result: Ok(body),
    }
}

type Handler = dyn Fn(&str) -> Reply + Send + Sync;

/// In-memory stand-in for the OQL service
pub struct ScriptedTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedTransport {
    pub fn new(handler: impl Fn(&str) -> Reply + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// (credential, query) pairs in the order they were submitted
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl OqlTransport for ScriptedTransport {
    fn post_query<'a>(
        &'a self,
        credential: &'a str,
        request: &'a OqlRequest,
    ) -> BoxFuture<'a, Result<Value, QueryError>> {
        self.calls
            .lock()
            .unwrap()
            .push((credential.to_string(), request.query.clone()));
        let reply = (self.handler)(&request.query);
        Box::pin(async move {
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            reply.result
        })
    }
}

/// A response body holding `count` records, with a deliberately wrong
/// `count` field from the service
pub fn records_body(count: usize) -> Value {
    let mut data = serde_json::Map::new();
    for i in 0..count {
        data.insert(
            format!("key-{}", i),
            json!({
                "id": format!("rec-{}", i),
                "createdAt": "2024-05-01T12:00:00Z",
                "name": if i % 2 == 0 { json!(format!("Record {}", i)) } else { Value::Null },
                "recordTypeId": "contact",
                "data": {"index": i},
                "active": true
            }),
        );
    }
    json!({ "data": data, "count": count + 1000 })
}

pub fn test_settings() -> ClientSettings {
    ClientSettings {
        batch_delay_ms: 0,
        ..Default::default()
    }
}

pub fn state_with(transport: Arc<ScriptedTransport>, settings: ClientSettings) -> AppState {
    AppState::new(transport, settings)
}
