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

//! Which cards a study session shows.

use crate::rng::TinyRng;
use crate::rng::sample;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// The number of cards a quiz draws when the caller doesn't say.
pub const DEFAULT_QUIZ_LIMIT: usize = 10;

/// Cards whose next review is at or before `now`, in collection order.
pub fn due_cards(cards: &[Card], now: Timestamp) -> Vec<&Card> {
    cards.iter().filter(|card| card.is_due(now)).collect()
}

/// A uniformly random sample of up to `limit` cards, due or not.
pub fn quiz_cards<'a>(cards: &'a [Card], limit: usize, rng: &mut TinyRng) -> Vec<&'a Card> {
    sample(cards.iter().collect(), limit, rng)
}
