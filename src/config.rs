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

//! The optional `studycards.toml` file.

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use studycards_core::error::ErrorReport;
use studycards_core::error::Fallible;
use studycards_core::selection::DEFAULT_QUIZ_LIMIT;

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "studycards.toml";

pub const DEFAULT_DATA_FILE: &str = "studyapp-data.json";

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the JSON document.
    pub data_file: PathBuf,
    /// How many cards `quiz` draws when `--limit` is not given.
    pub quiz_limit: usize,
    /// Label recorded in the document's settings.
    pub data_folder: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            quiz_limit: DEFAULT_QUIZ_LIMIT,
            data_folder: None,
        }
    }
}

impl Config {
    pub fn parse(raw: &str) -> Fallible<Self> {
        toml::from_str(raw).map_err(|e| ErrorReport::validation(format!("invalid config: {e}")))
    }

    /// Load the config at `path`, which must exist. Without a path, the
    /// default file is used if present. A relative `data_file` is resolved
    /// against the config file's directory.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };
        log::debug!("Reading config from {}", path.display());
        let raw = read_to_string(&path).map_err(|e| {
            ErrorReport::persistence(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config = Self::parse(&raw)?;
        if config.data_file.is_relative() {
            if let Some(dir) = path.parent() {
                config.data_file = dir.join(&config.data_file);
            }
        }
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        data_file: Option<PathBuf>,
        data_folder: Option<String>,
    ) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = data_file;
        }
        if data_folder.is_some() {
            self.data_folder = data_folder;
        }
        self
    }
}
