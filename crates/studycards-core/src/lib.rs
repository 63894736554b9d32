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

//! studycards-core: Core library for the studycards flashcard trainer.
//!
//! This library provides WASM-compatible types and algorithms for:
//! - SM-2 spaced repetition scheduling
//! - The card store and append-only review log
//! - Due-card and quiz-card selection
//! - Derived study statistics
//! - Loading and saving the JSON document

pub mod document;
pub mod error;
pub mod rng;
pub mod selection;
pub mod sm2;
pub mod stats;
pub mod storage;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-exports for convenience
pub use document::{Document, load_document, serialize_document};
pub use error::{ErrorKind, ErrorReport, Fallible, fail};
pub use stats::Stats;
pub use storage::Storage;
pub use store::StudyStore;
pub use types::card::{Card, CardContent, CardPatch, CardType, NewCard, QuizOption};
pub use types::id::{CardId, ReviewId};
pub use types::quality::Quality;
pub use types::review::Review;
pub use types::timestamp::Timestamp;
