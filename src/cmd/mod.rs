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

pub mod cards;
pub mod check;
pub mod orphans;
pub mod quiz;
pub mod review;
pub mod stats;

use studycards_core::error::Fallible;
use studycards_core::storage;
use studycards_core::store::StudyStore;
use studycards_core::types::timestamp::Timestamp;

use crate::config::Config;
use crate::file_storage::FileStorage;

/// One command's view of the document: opened at the start, saved at the
/// end if anything changed.
pub struct Session {
    store: StudyStore,
    storage: FileStorage,
    dirty: bool,
    pub now: Timestamp,
}

impl Session {
    pub fn open(config: &Config, now: Timestamp) -> Fallible<Self> {
        let storage = FileStorage::new(&config.data_file);
        log::debug!("Opening {}", storage.path().display());
        let mut session = Self {
            store: storage::open(&storage)?,
            storage,
            dirty: false,
            now,
        };
        let folder = &config.data_folder;
        if folder.is_some() && &session.store.settings().data_folder != folder {
            session.store_mut().set_data_folder(folder.clone());
        }
        Ok(session)
    }

    pub fn store(&self) -> &StudyStore {
        &self.store
    }

    /// Mutable access marks the session for saving.
    pub fn store_mut(&mut self) -> &mut StudyStore {
        self.dirty = true;
        &mut self.store
    }

    /// Save if anything changed.
    pub fn close(mut self) -> Fallible<()> {
        if self.dirty {
            storage::save(&mut self.store, &mut self.storage, self.now)?;
        }
        Ok(())
    }
}
