//! In-memory workspace double for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{PeriodRow, RowHandle};
use crate::notion::{PropertyValue, WorkspaceClient};
use crate::Result;

/// Records every call and serves pre-seeded collection contents.
#[derive(Default)]
pub(crate) struct MockWorkspace {
    rows: Mutex<HashMap<String, Vec<PeriodRow>>>,
    created: Mutex<Vec<(String, String)>>,
    properties: Mutex<Vec<(String, String, PropertyValue)>>,
    text_blocks: Mutex<Vec<(String, String)>>,
    next_id: AtomicUsize,
}

impl MockWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_rows(&self, collection_id: &str, rows: Vec<PeriodRow>) {
        self.rows
            .lock()
            .unwrap()
            .insert(collection_id.to_string(), rows);
    }

    /// `(collection_id, title)` pairs in creation order.
    pub fn created(&self) -> Vec<(String, String)> {
        self.created.lock().unwrap().clone()
    }

    /// `(name, value)` pairs written to the given row, in write order.
    pub fn properties_of(&self, row_id: &str) -> Vec<(String, PropertyValue)> {
        self.properties
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _, _)| id == row_id)
            .map(|(_, name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// `(row_id, content)` pairs in append order.
    pub fn text_blocks(&self) -> Vec<(String, String)> {
        self.text_blocks.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkspaceClient for MockWorkspace {
    async fn create_row(&self, collection_id: &str, title: &str) -> Result<RowHandle> {
        let id = format!("row-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.created
            .lock()
            .unwrap()
            .push((collection_id.to_string(), title.to_string()));
        Ok(RowHandle { id })
    }

    async fn add_child_text_block(&self, row_id: &str, content: &str) -> Result<()> {
        self.text_blocks
            .lock()
            .unwrap()
            .push((row_id.to_string(), content.to_string()));
        Ok(())
    }

    async fn set_property(&self, row_id: &str, name: &str, value: PropertyValue) -> Result<()> {
        self.properties
            .lock()
            .unwrap()
            .push((row_id.to_string(), name.to_string(), value));
        Ok(())
    }

    async fn get_rows(&self, collection_id: &str) -> Result<Vec<PeriodRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(collection_id)
            .cloned()
            .unwrap_or_default())
    }
}
