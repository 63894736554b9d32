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

//! The persisted JSON document: profile, cards, review log, cached stats
//! and settings.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::stats::Stats;
use crate::types::card::Card;
use crate::types::review::Review;
use crate::types::timestamp::Timestamp;

/// The local profile that owns the document. Only carried along; nothing in
/// the core authenticates against it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub created_at: Timestamp,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// A display label for where the document lives.
    pub data_folder: Option<String>,
    /// When the document was last written out.
    pub last_sync: Option<Timestamp>,
}

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub user: Option<UserProfile>,
    pub cards: Vec<Card>,
    pub reviews: Vec<Review>,
    pub stats: Stats,
    #[serde(default)]
    pub settings: Settings,
}

/// Parse and validate a raw document.
///
/// The top level must be an object whose `cards` and `reviews` are arrays
/// and whose `stats` is an object. Anything else is rejected as invalid
/// data before any field is decoded.
pub fn load_document(raw: &str) -> Fallible<Document> {
    let value: Value = serde_json::from_str(raw)?;
    check_structure(&value)?;
    let doc: Document = serde_json::from_value(value)
        .map_err(|e| ErrorReport::validation(format!("invalid data: {e}")))?;
    Ok(doc)
}

/// Serialize with two-space indentation.
pub fn serialize_document(doc: &Document) -> Fallible<String> {
    serde_json::to_string_pretty(doc)
        .map_err(|e| ErrorReport::persistence(format!("failed to serialize document: {e}")))
}

fn check_structure(value: &Value) -> Fallible<()> {
    let Some(obj) = value.as_object() else {
        return Err(invalid("the document is not an object"));
    };
    if !obj.get("cards").is_some_and(Value::is_array) {
        return Err(invalid("`cards` is not an array"));
    }
    if !obj.get("reviews").is_some_and(Value::is_array) {
        return Err(invalid("`reviews` is not an array"));
    }
    if !obj.get("stats").is_some_and(Value::is_object) {
        return Err(invalid("`stats` is not an object"));
    }
    Ok(())
}

fn invalid(why: &str) -> ErrorReport {
    ErrorReport::validation(format!("invalid data: {why}"))
}
