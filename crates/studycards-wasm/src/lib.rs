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

//! WASM bindings for studycards - runs the flashcard trainer in the browser.
//!
//! Everything crosses the boundary as JSON strings in the document's own
//! field format. The document is written to localStorage after every
//! mutation.

use serde::Deserialize;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::console;

use studycards_core::error::ErrorReport;
use studycards_core::error::Fallible;
use studycards_core::rng::TinyRng;
use studycards_core::selection::DEFAULT_QUIZ_LIMIT;
use studycards_core::storage;
use studycards_core::store::StudyStore;
use studycards_core::types::card::Card;
use studycards_core::types::card::CardContent;
use studycards_core::types::card::CardPatch;
use studycards_core::types::card::CardType;
use studycards_core::types::card::NewCard;
use studycards_core::types::card::QuizOption;
use studycards_core::types::id::CardId;
use studycards_core::types::quality::Quality;
use studycards_core::types::timestamp::Timestamp;

mod local_storage;

use local_storage::LocalStorage;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"studycards WASM initialized".into());
}

/// The card form as the front end submits it.
#[derive(Deserialize)]
struct CardForm {
    question: Option<String>,
    answer: Option<String>,
    #[serde(rename = "type")]
    card_type: Option<CardType>,
    #[serde(default)]
    options: Vec<QuizOption>,
}

impl CardForm {
    fn content(&self) -> Option<CardContent> {
        self.card_type.map(|t| match t {
            CardType::Flashcard => CardContent::Flashcard,
            CardType::Quiz => CardContent::Quiz(self.options.clone()),
        })
    }

    fn into_new_card(self) -> Fallible<NewCard> {
        let content = self.content().unwrap_or(CardContent::Flashcard);
        match (self.question, self.answer) {
            (Some(question), Some(answer)) => Ok(NewCard {
                question,
                answer,
                content,
            }),
            _ => Err(ErrorReport::validation("question and answer are required")),
        }
    }

    fn into_patch(self) -> CardPatch {
        let content = self.content();
        CardPatch {
            question: self.question,
            answer: self.answer,
            content,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileInfoView {
    has_storage: bool,
    data_folder: Option<String>,
    last_sync: Option<Timestamp>,
    total_cards: usize,
    total_reviews: usize,
}

/// The main application state managed from JavaScript.
#[wasm_bindgen]
pub struct StudyApp {
    store: StudyStore,
    storage: LocalStorage,
    /// The error from the most recent save, if it failed.
    last_save_error: Option<String>,
    /// Why the stored document could not be opened. Saving is held back
    /// while this is set.
    last_load_error: Option<String>,
}

#[wasm_bindgen]
impl StudyApp {
    /// Open the document saved in localStorage, or start an empty one.
    ///
    /// A stored document that fails to load is reported through
    /// [`StudyApp::last_load_error`] and left in place: nothing is saved
    /// until a document is imported or the storage is cleared.
    #[wasm_bindgen(constructor)]
    pub fn new() -> StudyApp {
        let storage = LocalStorage::new();
        if !storage.is_available() {
            console::warn_1(&"localStorage unavailable; changes will not persist".into());
        }
        let (store, load_error) = storage::open_or_empty(&storage);
        if let Some(e) = &load_error {
            console::error_1(&format!("Failed to load saved document: {e}").into());
        }
        Self {
            store,
            storage,
            last_save_error: None,
            last_load_error: load_error.map(|e| e.to_string()),
        }
    }

    /// Replace the document with an imported one. A rejected document
    /// leaves the current one untouched.
    #[wasm_bindgen]
    pub fn load_document(&mut self, json: &str) -> Result<(), JsValue> {
        self.store.load_document(json).map_err(to_js)?;
        self.last_load_error = None;
        self.autosave();
        Ok(())
    }

    /// The whole document as pretty JSON.
    #[wasm_bindgen]
    pub fn export_document(&self) -> Result<String, JsValue> {
        self.store.serialize_document().map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn cards(&self) -> Result<String, JsValue> {
        to_json(self.store.cards())
    }

    #[wasm_bindgen]
    pub fn add_card(&mut self, form_json: &str) -> Result<String, JsValue> {
        let form: CardForm = serde_json::from_str(form_json).map_err(|e| to_js(e.into()))?;
        let new = form.into_new_card().map_err(to_js)?;
        let card = self.store.add_card(new, now()).map_err(to_js)?.clone();
        self.autosave();
        to_json(&card)
    }

    #[wasm_bindgen]
    pub fn update_card(&mut self, id: &str, form_json: &str) -> Result<String, JsValue> {
        let id = card_id(id)?;
        let form: CardForm = serde_json::from_str(form_json).map_err(|e| to_js(e.into()))?;
        let card: Card = self
            .store
            .update_card(&id, form.into_patch(), now())
            .map_err(to_js)?
            .clone();
        self.autosave();
        to_json(&card)
    }

    /// Returns whether a card was removed.
    #[wasm_bindgen]
    pub fn delete_card(&mut self, id: &str) -> Result<bool, JsValue> {
        let id = card_id(id)?;
        let removed = self.store.delete_card(&id, now());
        if removed {
            self.autosave();
        }
        Ok(removed)
    }

    /// Cards due now.
    #[wasm_bindgen]
    pub fn review_cards(&self) -> Result<String, JsValue> {
        to_json(&self.store.review_cards(now()))
    }

    #[wasm_bindgen]
    pub fn quiz_cards(&self, limit: Option<usize>) -> Result<String, JsValue> {
        let mut rng = TinyRng::from_seed(js_sys::Date::now() as u64);
        let limit = limit.unwrap_or(DEFAULT_QUIZ_LIMIT);
        to_json(&self.store.quiz_cards(limit, &mut rng))
    }

    /// Grade a card. `quality` is 0 to 5; the review buttons send 1, 3
    /// and 5.
    #[wasm_bindgen]
    pub fn submit_review(&mut self, card_id_str: &str, quality: u8) -> Result<String, JsValue> {
        let id = card_id(card_id_str)?;
        let quality = Quality::try_from(quality).map_err(to_js)?;
        let review = self.store.submit_review(&id, quality, now()).map_err(to_js)?;
        self.autosave();
        to_json(&review)
    }

    #[wasm_bindgen]
    pub fn stats(&mut self) -> Result<String, JsValue> {
        to_json(&self.store.stats(now()))
    }

    #[wasm_bindgen]
    pub fn set_data_folder(&mut self, label: Option<String>) {
        self.store.set_data_folder(label);
        self.autosave();
    }

    #[wasm_bindgen]
    pub fn file_info(&self) -> Result<String, JsValue> {
        let info = self.store.file_info();
        to_json(&FileInfoView {
            has_storage: self.storage.is_available(),
            data_folder: info.data_folder,
            last_sync: info.last_sync,
            total_cards: info.total_cards,
            total_reviews: info.total_reviews,
        })
    }

    /// Number of reviews whose card has been deleted.
    #[wasm_bindgen]
    pub fn orphan_review_count(&self) -> usize {
        self.store.orphan_reviews().len()
    }

    #[wasm_bindgen]
    pub fn prune_orphan_reviews(&mut self) -> usize {
        let pruned = self.store.prune_orphan_reviews(now());
        if pruned > 0 {
            self.autosave();
        }
        pruned
    }

    /// Forget the saved document. The in-memory one stays until reload.
    #[wasm_bindgen]
    pub fn clear_storage(&mut self) -> Result<(), JsValue> {
        self.storage.remove().map_err(to_js)?;
        self.last_load_error = None;
        Ok(())
    }

    /// Why the saved document could not be opened, if it could not.
    #[wasm_bindgen]
    pub fn last_load_error(&self) -> Option<String> {
        self.last_load_error.clone()
    }

    /// Why the last save failed, if it did. Mutations still apply in memory
    /// when saving fails.
    #[wasm_bindgen]
    pub fn last_save_error(&self) -> Option<String> {
        self.last_save_error.clone()
    }

    // Private helper methods

    fn autosave(&mut self) {
        if self.last_load_error.is_some() {
            self.last_save_error = Some(UNSAVED_AFTER_LOAD_ERROR.to_string());
            return;
        }
        match storage::save(&mut self.store, &mut self.storage, now()) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                console::error_1(&format!("Autosave failed: {e}").into());
                self.last_save_error = Some(e.to_string());
            }
        }
    }
}

impl Default for StudyApp {
    fn default() -> Self {
        Self::new()
    }
}

const UNSAVED_AFTER_LOAD_ERROR: &str =
    "not saved: the stored document could not be loaded; import a document or clear storage first";

fn now() -> Timestamp {
    let millis = js_sys::Date::now() as i64;
    Timestamp::from_millis(millis).unwrap_or_else(|| Timestamp::new(Default::default()))
}

fn card_id(s: &str) -> Result<CardId, JsValue> {
    CardId::try_from(s).map_err(to_js)
}

fn to_js(e: ErrorReport) -> JsValue {
    JsValue::from_str(&format!("{}: {}", e.kind().as_str(), e.message()))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Failed to serialize: {e}")))
}
