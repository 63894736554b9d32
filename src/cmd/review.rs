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

use std::io::Write;

use studycards_core::error::Fallible;
use studycards_core::types::id::CardId;
use studycards_core::types::quality::Quality;

use crate::cmd::Session;
use crate::cmd::cards::write_card;

/// Print the cards due now, answers hidden.
pub fn list_due(session: &Session, out: &mut impl Write) -> Fallible<()> {
    let due = session.store().review_cards(session.now);
    if due.is_empty() {
        writeln!(out, "No cards due.")?;
        return Ok(());
    }
    writeln!(out, "{} cards due.", due.len())?;
    for card in due {
        write_card(card, false, out)?;
    }
    Ok(())
}

pub fn review_card(
    session: &mut Session,
    id: &CardId,
    quality: Quality,
    out: &mut impl Write,
) -> Fallible<()> {
    let now = session.now;
    session.store_mut().submit_review(id, quality, now)?;
    if let Some(card) = session.store().card(id) {
        writeln!(
            out,
            "Next review in {} days ({}).",
            card.interval, card.next_review
        )?;
    }
    Ok(())
}
