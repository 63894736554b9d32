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

//! The card store and review log over a single in-memory document.
//!
//! `StudyStore` never performs I/O. Every mutation takes the current time
//! explicitly and refreshes the cached stats before returning; writing the
//! document out is left to the caller (see [`crate::storage`]).

use std::collections::HashSet;

use log::debug;
use log::info;
use log::warn;

use crate::document::Document;
use crate::document::Settings;
use crate::document::UserProfile;
use crate::document::load_document;
use crate::document::serialize_document;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::rng::TinyRng;
use crate::selection;
use crate::sm2::schedule;
use crate::stats::Stats;
use crate::stats::compute_stats;
use crate::types::card::Card;
use crate::types::card::CardPatch;
use crate::types::card::NewCard;
use crate::types::id::CardId;
use crate::types::quality::Quality;
use crate::types::review::Review;
use crate::types::timestamp::Timestamp;

/// A summary of the document for a settings screen.
#[derive(Clone, PartialEq, Debug)]
pub struct FileInfo {
    pub total_cards: usize,
    pub total_reviews: usize,
    pub data_folder: Option<String>,
    pub last_sync: Option<Timestamp>,
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct StudyStore {
    doc: Document,
}

impl StudyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(doc: Document) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    /// Replace the document with a parsed one. On failure the current
    /// document is kept as it was.
    pub fn load_document(&mut self, raw: &str) -> Fallible<()> {
        match load_document(raw) {
            Ok(doc) => {
                info!(
                    "Loaded document with {} cards and {} reviews.",
                    doc.cards.len(),
                    doc.reviews.len()
                );
                self.doc = doc;
                Ok(())
            }
            Err(e) => {
                warn!("Rejected document: {e}");
                Err(e)
            }
        }
    }

    pub fn serialize_document(&self) -> Fallible<String> {
        serialize_document(&self.doc)
    }

    // Cards

    pub fn cards(&self) -> &[Card] {
        &self.doc.cards
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.doc.cards.iter().find(|card| &card.id == id)
    }

    fn card_mut(&mut self, id: &CardId) -> Fallible<&mut Card> {
        self.doc
            .cards
            .iter_mut()
            .find(|card| &card.id == id)
            .ok_or_else(|| ErrorReport::not_found(format!("no card with id {id}")))
    }

    /// Validate and append a new card. It is due immediately.
    pub fn add_card(&mut self, new: NewCard, now: Timestamp) -> Fallible<&Card> {
        let NewCard {
            question,
            answer,
            content,
        } = new.validate()?;
        let card = Card::new(CardId::generate(), question, answer, content, now);
        debug!("Adding {} card {}.", card.card_type, card.id);
        self.doc.cards.push(card);
        self.refresh_stats(now);
        Ok(&self.doc.cards[self.doc.cards.len() - 1])
    }

    /// Merge a patch into an existing card's content.
    pub fn update_card(
        &mut self,
        id: &CardId,
        patch: CardPatch,
        now: Timestamp,
    ) -> Fallible<&Card> {
        patch.apply(self.card_mut(id)?)?;
        debug!("Updated card {id}.");
        self.refresh_stats(now);
        self.card(id)
            .ok_or_else(|| ErrorReport::not_found(format!("no card with id {id}")))
    }

    /// Remove a card. Deleting an unknown id is a no-op. The card's reviews
    /// stay in the log; see [`StudyStore::orphan_reviews`].
    pub fn delete_card(&mut self, id: &CardId, now: Timestamp) -> bool {
        let before = self.doc.cards.len();
        self.doc.cards.retain(|card| &card.id != id);
        let removed = self.doc.cards.len() != before;
        if removed {
            debug!("Deleted card {id}.");
        }
        self.refresh_stats(now);
        removed
    }

    // Reviews

    pub fn reviews(&self) -> &[Review] {
        &self.doc.reviews
    }

    pub fn reviews_for<'a>(&'a self, card_id: &'a CardId) -> impl Iterator<Item = &'a Review> {
        self.doc
            .reviews
            .iter()
            .filter(move |review| &review.card_id == card_id)
    }

    /// Grade a card: reschedule it and append to the review log. An unknown
    /// card leaves both the cards and the log untouched.
    pub fn submit_review(
        &mut self,
        card_id: &CardId,
        quality: Quality,
        now: Timestamp,
    ) -> Fallible<Review> {
        let card = self.card_mut(card_id)?;
        schedule(card, quality, now);
        debug!(
            "Reviewed card {card_id} with quality {quality}: next review in {} days.",
            card.interval
        );
        let review = Review::new(card_id.clone(), quality, now);
        self.doc.reviews.push(review.clone());
        self.refresh_stats(now);
        Ok(review)
    }

    /// Reviews whose card no longer exists.
    pub fn orphan_reviews(&self) -> Vec<&Review> {
        let ids: HashSet<&CardId> = self.doc.cards.iter().map(|card| &card.id).collect();
        self.doc
            .reviews
            .iter()
            .filter(|review| !ids.contains(&review.card_id))
            .collect()
    }

    /// Drop the reviews of deleted cards. Returns how many were removed.
    pub fn prune_orphan_reviews(&mut self, now: Timestamp) -> usize {
        let ids: HashSet<CardId> = self.doc.cards.iter().map(|card| card.id.clone()).collect();
        let before = self.doc.reviews.len();
        self.doc.reviews.retain(|review| ids.contains(&review.card_id));
        let pruned = before - self.doc.reviews.len();
        if pruned > 0 {
            warn!("Pruned {pruned} orphan reviews.");
        }
        self.refresh_stats(now);
        pruned
    }

    // Selection

    pub fn review_cards(&self, now: Timestamp) -> Vec<&Card> {
        selection::due_cards(&self.doc.cards, now)
    }

    pub fn quiz_cards(&self, limit: usize, rng: &mut TinyRng) -> Vec<&Card> {
        selection::quiz_cards(&self.doc.cards, limit, rng)
    }

    // Stats

    /// Recompute, cache and return the stats.
    pub fn stats(&mut self, now: Timestamp) -> Stats {
        self.refresh_stats(now);
        self.doc.stats
    }

    /// The stats as of the last mutation.
    pub fn cached_stats(&self) -> Stats {
        self.doc.stats
    }

    fn refresh_stats(&mut self, now: Timestamp) {
        self.doc.stats = compute_stats(&self.doc.cards, &self.doc.reviews, now);
    }

    // Profile and settings

    pub fn user(&self) -> Option<&UserProfile> {
        self.doc.user.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.doc.settings
    }

    pub fn set_data_folder(&mut self, label: Option<String>) {
        self.doc.settings.data_folder = label;
    }

    pub fn mark_synced(&mut self, now: Timestamp) {
        self.set_last_sync(Some(now));
    }

    pub fn set_last_sync(&mut self, ts: Option<Timestamp>) {
        self.doc.settings.last_sync = ts;
    }

    pub fn file_info(&self) -> FileInfo {
        FileInfo {
            total_cards: self.doc.cards.len(),
            total_reviews: self.doc.reviews.len(),
            data_folder: self.doc.settings.data_folder.clone(),
            last_sync: self.doc.settings.last_sync,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_utils::at;
    use crate::types::card::CardType;
    use crate::types::card::QuizOption;

    fn t0() -> Timestamp {
        at("2024-01-01T12:00:00.000Z")
    }

    fn store_with(n: usize) -> StudyStore {
        let mut store = StudyStore::new();
        for i in 0..n {
            store
                .add_card(NewCard::flashcard(format!("Q{i}"), format!("A{i}")), t0())
                .unwrap();
        }
        store
    }

    fn first_id(store: &StudyStore) -> CardId {
        store.cards()[0].id.clone()
    }

    #[test]
    fn test_add_card() -> Fallible<()> {
        let mut store = StudyStore::new();
        let card = store.add_card(NewCard::flashcard("Q", "A"), t0())?.clone();
        assert_eq!(card.created_at, t0());
        assert_eq!(card.next_review, t0());
        assert_eq!(card.interval, 1);
        assert_eq!(card.ease_factor, 2.5);
        assert_eq!(card.repetitions, 0);
        assert_eq!(store.cards(), &[card]);
        assert_eq!(store.cached_stats().total_cards, 1);
        assert_eq!(store.cached_stats().review_today, 1);
        Ok(())
    }

    #[test]
    fn test_add_many_ids_unique() {
        let store = store_with(500);
        let ids: HashSet<&CardId> = store.cards().iter().map(|c| &c.id).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_add_invalid_card_rejected() {
        let mut store = StudyStore::new();
        let quiz = NewCard::quiz(
            "Q",
            "A",
            vec![QuizOption::new("x", false), QuizOption::new("y", false)],
        );
        let err = store.add_card(quiz, t0()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(store.cards().is_empty());
    }

    #[test]
    fn test_insertion_order() {
        let store = store_with(5);
        let questions: Vec<&str> = store.cards().iter().map(|c| c.question.as_str()).collect();
        assert_eq!(questions, vec!["Q0", "Q1", "Q2", "Q3", "Q4"]);
    }

    #[test]
    fn test_update_card() -> Fallible<()> {
        let mut store = store_with(2);
        let id = first_id(&store);
        let patch = CardPatch {
            question: Some("New question".into()),
            ..Default::default()
        };
        let card = store.update_card(&id, patch, t0())?;
        assert_eq!(card.question, "New question");
        assert_eq!(card.answer, "A0");
        Ok(())
    }

    #[test]
    fn test_update_unknown_card() {
        let mut store = store_with(1);
        let before = store.clone();
        let id = CardId::try_from("nope").unwrap();
        let err = store.update_card(&id, CardPatch::default(), t0()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(store, before);
    }

    #[test]
    fn test_delete_card_idempotent() {
        let mut store = store_with(3);
        let id = first_id(&store);
        assert!(store.delete_card(&id, t0()));
        assert!(!store.delete_card(&id, t0()));
        assert_eq!(store.cards().len(), 2);
        assert_eq!(store.cached_stats().total_cards, 2);
    }

    /// Fresh card, easy, easy, then failed.
    #[test]
    fn test_review_scenario() -> Fallible<()> {
        let mut store = store_with(1);
        let id = first_id(&store);

        let review = store.submit_review(&id, Quality::EASY, t0())?;
        assert_eq!(review.card_id, id);
        assert_eq!(review.reviewed_at, t0());
        let card = store.card(&id).unwrap();
        assert_eq!((card.repetitions, card.interval), (1, 1));
        assert!((card.ease_factor - 2.6).abs() < 1e-9);

        store.submit_review(&id, Quality::EASY, at("2024-01-02T12:00:00.000Z"))?;
        let card = store.card(&id).unwrap();
        assert_eq!((card.repetitions, card.interval), (2, 6));

        store.submit_review(&id, Quality::FAILED, at("2024-01-08T12:00:00.000Z"))?;
        let card = store.card(&id).unwrap();
        assert_eq!((card.repetitions, card.interval), (0, 1));
        assert!((card.ease_factor - 2.16).abs() < 1e-9);

        assert_eq!(store.reviews().len(), 3);
        assert_eq!(store.reviews_for(&id).count(), 3);
        Ok(())
    }

    #[test]
    fn test_review_unknown_card() {
        let mut store = store_with(2);
        let before = store.clone();
        let id = CardId::try_from("missing").unwrap();
        let err = store.submit_review(&id, Quality::EASY, t0()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(store.reviews().is_empty());
        assert_eq!(store, before);
    }

    #[test]
    fn test_review_ids_unique() -> Fallible<()> {
        let mut store = store_with(1);
        let id = first_id(&store);
        let a = store.submit_review(&id, Quality::HARD, t0())?;
        let b = store.submit_review(&id, Quality::HARD, t0())?;
        assert_ne!(a.id, b.id);
        Ok(())
    }

    #[test]
    fn test_reviewed_cards_leave_due_list() -> Fallible<()> {
        let mut store = store_with(3);
        let id = first_id(&store);
        assert_eq!(store.review_cards(t0()).len(), 3);
        store.submit_review(&id, Quality::EASY, t0())?;
        assert_eq!(store.review_cards(t0()).len(), 2);
        assert_eq!(store.review_cards(at("2024-01-02T12:00:00.000Z")).len(), 3);
        let stats = store.stats(t0());
        assert_eq!(stats.review_today, 2);
        assert_eq!(stats.reviewed_this_week, 1);
        Ok(())
    }

    #[test]
    fn test_orphans() -> Fallible<()> {
        let mut store = store_with(2);
        let gone = first_id(&store);
        let kept = store.cards()[1].id.clone();
        store.submit_review(&gone, Quality::EASY, t0())?;
        store.submit_review(&kept, Quality::EASY, t0())?;
        store.delete_card(&gone, t0());

        assert_eq!(store.reviews().len(), 2);
        let orphans = store.orphan_reviews();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].card_id, gone);
        // Orphans still count towards this week's reviews until pruned.
        assert_eq!(store.cached_stats().reviewed_this_week, 2);

        assert_eq!(store.prune_orphan_reviews(t0()), 1);
        assert_eq!(store.prune_orphan_reviews(t0()), 0);
        assert_eq!(store.reviews().len(), 1);
        assert_eq!(store.cached_stats().reviewed_this_week, 1);
        Ok(())
    }

    #[test]
    fn test_quiz_cards_ignore_due_date() -> Fallible<()> {
        let mut store = store_with(4);
        let ids: Vec<CardId> = store.cards().iter().map(|c| c.id.clone()).collect();
        for id in &ids {
            store.submit_review(id, Quality::EASY, t0())?;
        }
        assert!(store.review_cards(t0()).is_empty());
        let mut rng = TinyRng::from_seed(11);
        assert_eq!(store.quiz_cards(10, &mut rng).len(), 4);
        Ok(())
    }

    #[test]
    fn test_failed_load_keeps_document() {
        let mut store = store_with(2);
        let before = store.clone();
        let err = store.load_document(r#"{"cards": "not-an-array"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(store, before);
    }

    #[test]
    fn test_round_trip_through_store() -> Fallible<()> {
        let mut store = store_with(2);
        let id = first_id(&store);
        store.submit_review(&id, Quality::HARD, t0())?;
        store.add_card(
            NewCard::quiz(
                "Pick one",
                "b",
                vec![QuizOption::new("a", false), QuizOption::new("b", true)],
            ),
            t0(),
        )?;
        let raw = store.serialize_document()?;
        let mut other = StudyStore::new();
        other.load_document(&raw)?;
        assert_eq!(other, store);
        assert_eq!(other.cards()[2].card_type, CardType::Quiz);
        Ok(())
    }

    /// A long streak of easy reviews pushes the next review to the end of
    /// year 9999; the document must still load afterwards.
    #[test]
    fn test_long_easy_streak_still_loads() -> Fallible<()> {
        let mut store = store_with(1);
        let id = first_id(&store);
        for _ in 0..30 {
            store.submit_review(&id, Quality::EASY, t0())?;
            let raw = store.serialize_document()?;
            let mut other = StudyStore::new();
            other.load_document(&raw)?;
            assert_eq!(other, store);
        }
        let card = store.card(&id).unwrap();
        assert_eq!(card.next_review, Timestamp::latest());
        assert_eq!(card.next_review.to_string(), "9999-12-31T23:59:59.999Z");
        Ok(())
    }

    #[test]
    fn test_file_info() {
        let mut store = store_with(3);
        store.set_data_folder(Some("Study".into()));
        store.mark_synced(t0());
        let info = store.file_info();
        assert_eq!(info.total_cards, 3);
        assert_eq!(info.total_reviews, 0);
        assert_eq!(info.data_folder.as_deref(), Some("Study"));
        assert_eq!(info.last_sync, Some(t0()));
        assert_eq!(store.settings().last_sync, Some(t0()));
        assert!(store.user().is_none());
    }
}
