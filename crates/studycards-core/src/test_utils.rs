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

//! Strategies and fixtures shared by the unit and property tests.

use proptest::prelude::*;

use crate::types::card::Card;
use crate::types::card::CardType;
use crate::types::card::QuizOption;
use crate::types::id::CardId;
use crate::types::id::ReviewId;
use crate::types::quality::Quality;
use crate::types::review::Review;
use crate::types::timestamp::MAX_MILLIS;
use crate::types::timestamp::MIN_MILLIS;
use crate::types::timestamp::Timestamp;

/// 2000-01-01 to 2100-01-01, in milliseconds.
const MIN_RECENT_MILLIS: i64 = 946_684_800_000;
const MAX_RECENT_MILLIS: i64 = 4_102_444_800_000;

pub fn at(s: &str) -> Timestamp {
    Timestamp::try_from(s.to_string()).unwrap()
}

/// Mostly this century, with the edges of the representable range mixed in.
pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    prop_oneof![
        8 => MIN_RECENT_MILLIS..MAX_RECENT_MILLIS,
        1 => MIN_MILLIS..=MAX_MILLIS,
        1 => Just(MIN_MILLIS),
        1 => Just(MAX_MILLIS),
    ]
    .prop_map(|ms| Timestamp::from_millis(ms).unwrap())
}

/// A day count, occasionally huge.
fn arb_days(typical: u32) -> impl Strategy<Value = u32> {
    prop_oneof![
        8 => 1..typical,
        1 => 1..=u32::MAX,
        1 => Just(u32::MAX),
    ]
}

pub fn arb_quality() -> impl Strategy<Value = Quality> {
    (0u8..=5).prop_map(|q| Quality::try_from(q).unwrap())
}

pub fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ?]{1,40}"
}

fn arb_options() -> impl Strategy<Value = Option<Vec<QuizOption>>> {
    prop::option::of(prop::collection::vec(
        (arb_text(), any::<bool>()).prop_map(|(text, c)| QuizOption::new(text, c)),
        0..5,
    ))
}

/// Any card a document could hold: scheduling fields inside their
/// invariants, content not necessarily valid for data entry.
pub fn arb_card() -> impl Strategy<Value = Card> {
    (
        "[a-z0-9-]{1,36}",
        arb_text(),
        arb_text(),
        arb_options(),
        arb_timestamp(),
        prop_oneof![Just(0u32), arb_days(400)],
        arb_days(3650),
        1300u32..4000,
        0u32..1000,
    )
        .prop_map(
            |(id, question, answer, options, created_at, offset, interval, ef, repetitions)| {
                let card_type = if options.is_some() {
                    CardType::Quiz
                } else {
                    CardType::Flashcard
                };
                Card {
                    id: CardId::try_from(id).unwrap(),
                    question,
                    answer,
                    card_type,
                    options,
                    created_at,
                    next_review: created_at.plus_days(offset),
                    interval,
                    ease_factor: ef as f64 / 1000.0,
                    repetitions,
                }
            },
        )
}

pub fn arb_review() -> impl Strategy<Value = Review> {
    ("[a-z0-9-]{1,36}", "[a-z0-9-]{1,36}", arb_quality(), arb_timestamp()).prop_map(
        |(id, card_id, quality, reviewed_at)| Review {
            id: ReviewId::try_from(id).unwrap(),
            card_id: CardId::try_from(card_id).unwrap(),
            quality,
            reviewed_at,
        },
    )
}

/// Cards with distinct ids.
pub fn arb_cards(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(arb_card(), 0..max).prop_map(|cards| {
        cards
            .into_iter()
            .enumerate()
            .map(|(i, mut card)| {
                card.id = CardId::try_from(format!("card-{i}")).unwrap();
                card
            })
            .collect()
    })
}
