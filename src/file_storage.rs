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

use std::fs::create_dir_all;
use std::fs::read_to_string;
use std::fs::rename;
use std::fs::write;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use studycards_core::error::ErrorReport;
use studycards_core::error::Fallible;
use studycards_core::storage::Storage;

/// Keeps the document in a JSON file on disk.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Fallible<Option<String>> {
        match read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ErrorReport::persistence(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Write to a sibling temporary file, then rename it over the document,
    /// so a failed write never leaves a truncated file behind.
    fn write(&mut self, raw: &str) -> Fallible<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        write(&tmp, raw)?;
        rename(&tmp, &self.path)?;
        Ok(())
    }
}
