//! Testing utilities for the busline workspace
//!
//! Scripted providers whose answers are either canned fixtures or held back
//! behind a [`Gate`] until the test releases them, which is how race tests
//! control response arrival order.

#![allow(missing_docs)]

use async_trait::async_trait;
use busline_model::{
    Category, CategoryProvider, DeleteError, FetchError, PageRequest, Record, RecordDeleter,
    RecordId, RecordPage, RecordProvider,
};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use tokio::sync::oneshot;

/// Held-back response for one provider call
///
/// Dropping a gate without releasing it resolves the call as a transport error.
#[derive(Debug)]
pub struct Gate<T> {
    sender: oneshot::Sender<T>,
}

impl<T> Gate<T> {
    /// Resolve the waiting call with `value`
    pub fn release(self, value: T) {
        // receiver gone means the call was never made or was dropped; nothing to do
        let _ = self.sender.send(value);
    }
}

fn gate<T>() -> (Gate<T>, oneshot::Receiver<T>) {
    let (sender, receiver) = oneshot::channel();
    (Gate { sender }, receiver)
}

pub fn lines(names: &[&str]) -> Vec<Category> {
    names.iter().copied().map(Category::new).collect()
}

pub fn records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record::new(format!("item {i}")).with_description(format!("found on run {i}")))
        .collect()
}

pub fn page_of(count: usize) -> RecordPage {
    RecordPage::from_window(records(count), count as u64, 0)
}

type CategoryResult = Result<Vec<Category>, FetchError>;

/// Category provider answering from a fixed list or a gate
#[derive(Debug, Default)]
pub struct ScriptedCategoryProvider {
    answer: Mutex<Option<CategoryResult>>,
    gates: Mutex<VecDeque<oneshot::Receiver<CategoryResult>>>,
    calls: Mutex<usize>,
}

impl ScriptedCategoryProvider {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            answer: Mutex::new(Some(Ok(categories))),
            ..Self::default()
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            answer: Mutex::new(Some(Err(error))),
            ..Self::default()
        }
    }

    /// Hold the next call until the returned gate is released
    pub fn gate(&self) -> Gate<CategoryResult> {
        let (gate, receiver) = gate();
        self.gates.lock().push_back(receiver);
        gate
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl CategoryProvider for ScriptedCategoryProvider {
    async fn list_categories(&self) -> Result<Vec<Category>, FetchError> {
        *self.calls.lock() += 1;
        let pending = self.gates.lock().pop_front();
        if let Some(receiver) = pending {
            return receiver
                .await
                .unwrap_or_else(|_| Err(FetchError::Transport("gate dropped".into())));
        }
        self.answer.lock().clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

type RecordResult = Result<RecordPage, FetchError>;

/// Record provider answering per category from fixtures or gates
///
/// Categories without a fixture answer with an empty page.
#[derive(Debug, Default)]
pub struct ScriptedRecordProvider {
    fixtures: Mutex<HashMap<Category, RecordResult>>,
    gates: Mutex<HashMap<Category, VecDeque<oneshot::Receiver<RecordResult>>>>,
    calls: Mutex<Vec<(Category, PageRequest)>>,
}

impl ScriptedRecordProvider {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(self, category: &str, page: RecordPage) -> Self {
        self.fixtures.lock().insert(Category::new(category), Ok(page));
        self
    }

    #[must_use]
    pub fn with_failure(self, category: &str, error: FetchError) -> Self {
        self.fixtures.lock().insert(Category::new(category), Err(error));
        self
    }

    /// Hold the next call for `category` until the gate is released
    pub fn gate(&self, category: &str) -> Gate<RecordResult> {
        let (gate, receiver) = gate();
        self.gates
            .lock()
            .entry(Category::new(category))
            .or_default()
            .push_back(receiver);
        gate
    }

    pub fn calls(&self) -> Vec<(Category, PageRequest)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl RecordProvider for ScriptedRecordProvider {
    async fn list_records_by_category(
        &self,
        category: &Category,
        page: PageRequest,
    ) -> Result<RecordPage, FetchError> {
        self.calls.lock().push((category.clone(), page));
        let pending = self
            .gates
            .lock()
            .get_mut(category)
            .and_then(VecDeque::pop_front);
        if let Some(receiver) = pending {
            return receiver
                .await
                .unwrap_or_else(|_| Err(FetchError::Transport("gate dropped".into())));
        }
        self.fixtures
            .lock()
            .get(category)
            .cloned()
            .unwrap_or_else(|| Ok(RecordPage::empty()))
    }
}

type DeleteResult = Result<(), DeleteError>;

/// Deleter that succeeds unless told otherwise
#[derive(Debug, Default)]
pub struct ScriptedDeleter {
    failures: Mutex<HashMap<RecordId, DeleteError>>,
    gates: Mutex<HashMap<RecordId, oneshot::Receiver<DeleteResult>>>,
    deleted: Mutex<Vec<RecordId>>,
}

impl ScriptedDeleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, id: RecordId, error: DeleteError) {
        self.failures.lock().insert(id, error);
    }

    pub fn gate(&self, id: RecordId) -> Gate<DeleteResult> {
        let (gate, receiver) = gate();
        self.gates.lock().insert(id, receiver);
        gate
    }

    /// IDs the deleter was asked to remove, in call order
    pub fn requested(&self) -> Vec<RecordId> {
        self.deleted.lock().clone()
    }
}

#[async_trait]
impl RecordDeleter for ScriptedDeleter {
    async fn delete_record(&self, id: RecordId) -> Result<(), DeleteError> {
        self.deleted.lock().push(id);
        let pending = self.gates.lock().remove(&id);
        if let Some(receiver) = pending {
            return receiver
                .await
                .unwrap_or_else(|_| Err(DeleteError::Transport("gate dropped".into())));
        }
        match self.failures.lock().get(&id) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
