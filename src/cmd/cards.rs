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

//! Adding, listing, editing and deleting cards.

use std::io::Write;

use studycards_core::error::Fallible;
use studycards_core::error::fail;
use studycards_core::types::card::Card;
use studycards_core::types::card::CardContent;
use studycards_core::types::card::CardPatch;
use studycards_core::types::card::NewCard;
use studycards_core::types::card::QuizOption;
use studycards_core::types::id::CardId;

use crate::cmd::Session;

/// Build quiz options from their texts and the 1-based position of the
/// correct one.
pub fn quiz_options(texts: Vec<String>, correct: Option<usize>) -> Fallible<Vec<QuizOption>> {
    if let Some(n) = correct {
        if n == 0 || n > texts.len() {
            return fail(format!(
                "--correct must be between 1 and {}, got {n}",
                texts.len()
            ));
        }
    }
    Ok(texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| QuizOption::new(text, correct == Some(i + 1)))
        .collect())
}

pub fn add_card(session: &mut Session, new: NewCard, out: &mut impl Write) -> Fallible<()> {
    let now = session.now;
    let card = session.store_mut().add_card(new, now)?;
    writeln!(out, "Added card {}.", card.id)?;
    Ok(())
}

pub fn list_cards(session: &Session, out: &mut impl Write) -> Fallible<()> {
    let cards = session.store().cards();
    if cards.is_empty() {
        writeln!(out, "No cards.")?;
        return Ok(());
    }
    for card in cards {
        write_card(card, true, out)?;
    }
    Ok(())
}

pub fn edit_card(
    session: &mut Session,
    id: &CardId,
    patch: CardPatch,
    out: &mut impl Write,
) -> Fallible<()> {
    if patch.is_empty() {
        return fail("nothing to change");
    }
    let now = session.now;
    let card = session.store_mut().update_card(id, patch, now)?;
    writeln!(out, "Updated card {}.", card.id)?;
    Ok(())
}

pub fn delete_card(session: &mut Session, id: &CardId, out: &mut impl Write) -> Fallible<()> {
    if session.store().card(id).is_none() {
        writeln!(out, "No card with id {id}.")?;
        return Ok(());
    }
    let now = session.now;
    session.store_mut().delete_card(id, now);
    writeln!(out, "Deleted card {id}.")?;
    Ok(())
}

/// Print a card. The answer and the correct option are only shown when
/// `reveal` is set.
pub fn write_card(card: &Card, reveal: bool, out: &mut impl Write) -> Fallible<()> {
    writeln!(
        out,
        "{} [{}] due {}",
        card.id,
        card.card_type.as_str(),
        card.next_review
    )?;
    writeln!(out, "  Q: {}", card.question)?;
    if let CardContent::Quiz(options) = card.content() {
        for (i, option) in options.iter().enumerate() {
            let mark = if reveal && option.is_correct { "*" } else { " " };
            writeln!(out, "  {mark}{}. {}", i + 1, option.text)?;
        }
    }
    if reveal {
        writeln!(out, "  A: {}", card.answer)?;
    }
    Ok(())
}
