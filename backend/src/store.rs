use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

/// Wheel records keyed by name. Kept in memory for the life of the process.
#[derive(Clone, Default)]
pub struct RecordStore {
    records: Arc<Mutex<HashMap<String, Value>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.records.lock().await.get(key).cloned()
    }

    /// Stores `record`, returning whatever it replaced.
    pub async fn put(&self, key: &str, record: Value) -> Option<Value> {
        self.records.lock().await.insert(key.to_string(), record)
    }
}
