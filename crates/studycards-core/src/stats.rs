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

use serde::Deserialize;
use serde::Serialize;

use crate::selection::due_cards;
use crate::types::card::Card;
use crate::types::review::Review;
use crate::types::timestamp::Timestamp;

/// How far back "this week" reaches, in days.
pub const WEEK_DAYS: u32 = 7;

/// Counts derived from the cards and the review log. The document caches
/// the last computed value; it is never the source of truth.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub total_cards: usize,
    /// Cards due right now.
    pub review_today: usize,
    /// Reviews logged in the trailing seven days.
    pub reviewed_this_week: usize,
}

pub fn compute_stats(cards: &[Card], reviews: &[Review], now: Timestamp) -> Stats {
    let week_ago = now.minus_days(WEEK_DAYS);
    Stats {
        total_cards: cards.len(),
        review_today: due_cards(cards, now).len(),
        reviewed_this_week: reviews
            .iter()
            .filter(|review| review.reviewed_at >= week_ago)
            .count(),
    }
}
