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

//! Browser localStorage backend for the study document.

use wasm_bindgen::JsValue;
use web_sys::Storage as WebStorage;

use studycards_core::error::ErrorReport;
use studycards_core::error::Fallible;
use studycards_core::storage::Storage;

/// The localStorage key holding the document.
pub const DOCUMENT_KEY: &str = "studyapp-data";

pub struct LocalStorage {
    inner: Option<WebStorage>,
    key: String,
}

impl LocalStorage {
    pub fn new() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        Self {
            inner,
            key: DOCUMENT_KEY.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_some()
    }

    pub fn remove(&self) -> Fallible<()> {
        match &self.inner {
            Some(storage) => storage.remove_item(&self.key).map_err(js_error),
            None => Ok(()),
        }
    }
}

impl Storage for LocalStorage {
    fn read(&self) -> Fallible<Option<String>> {
        match &self.inner {
            Some(storage) => storage.get_item(&self.key).map_err(js_error),
            None => Ok(None),
        }
    }

    fn write(&mut self, raw: &str) -> Fallible<()> {
        match &self.inner {
            Some(storage) => storage.set_item(&self.key, raw).map_err(js_error),
            None => Err(ErrorReport::persistence("localStorage is not available")),
        }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn js_error(value: JsValue) -> ErrorReport {
    let detail = value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"));
    ErrorReport::persistence(format!("localStorage error: {detail}"))
}
