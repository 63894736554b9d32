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
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use studycards_core::error::Fallible;
use studycards_core::rng::TinyRng;

use crate::cmd::Session;
use crate::cmd::cards::write_card;

/// Seed from the clock so each run draws a different quiz.
pub fn clock_rng() -> TinyRng {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    TinyRng::from_seed(seed)
}

/// Print up to `limit` cards in random order, regardless of due date.
pub fn print_quiz(
    session: &Session,
    limit: usize,
    reveal: bool,
    rng: &mut TinyRng,
    out: &mut impl Write,
) -> Fallible<()> {
    let cards = session.store().quiz_cards(limit, rng);
    if cards.is_empty() {
        writeln!(out, "No cards.")?;
        return Ok(());
    }
    for card in cards {
        write_card(card, reveal, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::helper::now;
    use crate::cmd::helper::output;
    use crate::cmd::helper::tmp_config;
    use studycards_core::types::card::NewCard;

    #[test]
    fn test_quiz_respects_limit() -> Fallible<()> {
        let (_dir, config) = tmp_config()?;
        let mut session = Session::open(&config, now())?;
        for i in 0..5 {
            session
                .store_mut()
                .add_card(NewCard::flashcard(format!("Q{i}"), "A"), now())?;
        }
        let mut buf = Vec::new();
        print_quiz(&session, 3, false, &mut TinyRng::from_seed(7), &mut buf)?;
        assert_eq!(output(buf).matches("  Q: ").count(), 3);
        Ok(())
    }

    #[test]
    fn test_quiz_on_empty_document() -> Fallible<()> {
        let (_dir, config) = tmp_config()?;
        let session = Session::open(&config, now())?;
        let mut buf = Vec::new();
        print_quiz(&session, 10, true, &mut clock_rng(), &mut buf)?;
        assert_eq!(output(buf), "No cards.\n");
        Ok(())
    }
}
