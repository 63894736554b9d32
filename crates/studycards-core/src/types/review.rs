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

use crate::types::id::CardId;
use crate::types::id::ReviewId;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// One entry of the append-only review log.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    /// The reviewed card. The card may since have been deleted.
    pub card_id: CardId,
    pub quality: Quality,
    pub reviewed_at: Timestamp,
}

impl Review {
    pub fn new(card_id: CardId, quality: Quality, reviewed_at: Timestamp) -> Self {
        Self {
            id: ReviewId::generate(),
            card_id,
            quality,
            reviewed_at,
        }
    }
}
