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

//! Integrity audit of a loaded document.

use std::collections::HashSet;
use std::io::Write;

use studycards_core::error::Fallible;
use studycards_core::error::fail;
use studycards_core::store::StudyStore;

/// Every problem found in the document, one line each.
pub fn find_problems(store: &StudyStore) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen = HashSet::new();
    for card in store.cards() {
        if !seen.insert(&card.id) {
            problems.push(format!("card {}: duplicate id", card.id));
        }
        for problem in card.problems() {
            problems.push(format!("card {}: {problem}", card.id));
        }
    }
    for review in store.orphan_reviews() {
        problems.push(format!(
            "review {}: card {} does not exist",
            review.id, review.card_id
        ));
    }
    problems
}

/// Print the problems and fail if there are any.
pub fn check_document(store: &StudyStore, out: &mut impl Write) -> Fallible<()> {
    let problems = find_problems(store);
    if problems.is_empty() {
        writeln!(out, "No problems found.")?;
        return Ok(());
    }
    for problem in &problems {
        writeln!(out, "{problem}")?;
    }
    fail(format!("found {} problems", problems.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::helper::output;
    use studycards_core::document::load_document;

    const BROKEN: &str = r#"{
        "cards": [
            {
                "id": "a",
                "question": "Q",
                "answer": "A",
                "type": "quiz",
                "options": [
                    {"text": "x", "is_correct": true},
                    {"text": "y", "is_correct": true}
                ],
                "created_at": "2024-01-01T00:00:00.000Z",
                "next_review": "2024-01-01T00:00:00.000Z",
                "interval": 1,
                "ease_factor": 2.5,
                "repetitions": 0
            },
            {
                "id": "a",
                "question": "Q",
                "answer": "A",
                "type": "flashcard",
                "created_at": "2024-01-01T00:00:00.000Z",
                "next_review": "2024-01-01T00:00:00.000Z",
                "interval": 1,
                "ease_factor": 1.0,
                "repetitions": 0
            }
        ],
        "reviews": [
            {
                "id": "r1",
                "card_id": "gone",
                "quality": 4,
                "reviewed_at": "2024-01-01T00:00:00.000Z"
            }
        ],
        "stats": {}
    }"#;

    #[test]
    fn test_clean_document() -> Fallible<()> {
        let store = StudyStore::new();
        let mut buf = Vec::new();
        check_document(&store, &mut buf)?;
        assert_eq!(output(buf), "No problems found.\n");
        Ok(())
    }

    #[test]
    fn test_broken_document() -> Fallible<()> {
        let store = StudyStore::from_document(load_document(BROKEN)?);
        let problems = find_problems(&store);
        assert_eq!(problems.len(), 4);
        assert!(problems.iter().any(|p| p == "card a: duplicate id"));
        assert!(problems.iter().any(|p| p.starts_with("card a: ease factor 1")));
        assert!(problems.iter().any(|p| p == "review r1: card gone does not exist"));

        let mut buf = Vec::new();
        let err = check_document(&store, &mut buf).unwrap_err();
        assert_eq!(err.message(), "found 4 problems");
        assert_eq!(output(buf).lines().count(), 4);
        Ok(())
    }
}
