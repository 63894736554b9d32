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

//! A variant of the SM-2 scheduling algorithm.
//!
//! Successful reviews (quality 3 and up) grow the interval 1 → 6 → previous
//! interval times the ease factor. A failed review resets the streak and the
//! interval to one day. The ease factor is adjusted after every review and
//! never drops below 1.3.

use crate::types::card::Card;
use crate::types::quality::MAX_QUALITY;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

pub const INITIAL_EASE_FACTOR: f64 = 2.5;

pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Interval in days of a new card and of the first successful review.
pub const INITIAL_INTERVAL: u32 = 1;

/// Interval in days after the second consecutive success.
pub const SECOND_INTERVAL: u32 = 6;

pub type EaseFactor = f64;

/// How much a review of quality `q` moves the ease factor.
pub fn ease_delta(q: Quality) -> f64 {
    let miss = f64::from(MAX_QUALITY) - f64::from(q);
    0.1 - miss * (0.08 + miss * 0.02)
}

pub fn new_ease_factor(ef: EaseFactor, q: Quality) -> EaseFactor {
    f64::max(MIN_EASE_FACTOR, ef + ease_delta(q))
}

/// The next interval in days. `ef` is the ease factor before this review.
pub fn new_interval(interval: u32, ef: EaseFactor, repetitions: u32, q: Quality) -> u32 {
    if !q.is_success() {
        return INITIAL_INTERVAL;
    }
    match repetitions {
        0 => INITIAL_INTERVAL,
        1 => SECOND_INTERVAL,
        _ => {
            let grown = (interval as f64 * ef).round();
            // `as` saturates on overflow and maps NaN to 0.
            u32::max(grown as u32, INITIAL_INTERVAL)
        }
    }
}

/// Apply a review to the scheduling fields of `card`. The question, answer
/// and options are never touched.
pub fn schedule(card: &mut Card, q: Quality, now: Timestamp) {
    let ef = card.ease_factor;
    card.interval = new_interval(card.interval, ef, card.repetitions, q);
    card.repetitions = if q.is_success() {
        card.repetitions.saturating_add(1)
    } else {
        0
    };
    card.ease_factor = new_ease_factor(ef, q);
    card.next_review = now.plus_days(card.interval);
}

/// What `card` would look like after a review of quality `q`, without
/// changing it.
pub fn preview(card: &Card, q: Quality, now: Timestamp) -> Card {
    let mut card = card.clone();
    schedule(&mut card, q, now);
    card
}
