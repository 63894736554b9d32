// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Where the document is kept between sessions.
//!
//! The store never saves by itself. Front ends call [`save`] after each
//! mutation they want persisted.

use log::error;
use log::info;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::StudyStore;
use crate::types::timestamp::Timestamp;

/// A place that holds one serialized document.
pub trait Storage {
    /// The stored document, or `None` when nothing has been saved yet.
    fn read(&self) -> Fallible<Option<String>>;

    fn write(&mut self, raw: &str) -> Fallible<()>;
}

/// Open the stored document, or start an empty one.
pub fn open(storage: &impl Storage) -> Fallible<StudyStore> {
    let mut store = StudyStore::new();
    if let Some(raw) = storage.read()? {
        store.load_document(&raw)?;
    }
    Ok(store)
}

/// Like [`open`], but never fails: when the stored document cannot be read
/// or loaded, start empty and hand back the error. The stored document is
/// left as it was.
pub fn open_or_empty(storage: &impl Storage) -> (StudyStore, Option<ErrorReport>) {
    match open(storage) {
        Ok(store) => (store, None),
        Err(e) => {
            error!("Failed to open stored document, starting empty: {e}");
            (StudyStore::new(), Some(e))
        }
    }
}

/// Stamp the sync time and write the document out. If the write fails the
/// store keeps its previous sync time.
pub fn save(store: &mut StudyStore, storage: &mut impl Storage, now: Timestamp) -> Fallible<()> {
    let previous = store.settings().last_sync;
    store.mark_synced(now);
    let raw = store.serialize_document()?;
    match storage.write(&raw) {
        Ok(()) => {
            info!("Saved document ({} bytes).", raw.len());
            Ok(())
        }
        Err(e) => {
            store.set_last_sync(previous);
            Err(e)
        }
    }
}

/// Keeps the document in memory. Used by tests.
#[derive(Default)]
pub struct MemoryStorage {
    raw: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Fallible<Option<String>> {
        Ok(self.raw.clone())
    }

    fn write(&mut self, raw: &str) -> Fallible<()> {
        self.raw = Some(raw.to_string());
        Ok(())
    }
}
