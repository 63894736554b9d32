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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::sm2::INITIAL_EASE_FACTOR;
use crate::sm2::INITIAL_INTERVAL;
use crate::types::id::CardId;
use crate::types::timestamp::Timestamp;

/// The minimum number of options a quiz card keeps after blank ones are
/// dropped.
pub const MIN_QUIZ_OPTIONS: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Flashcard,
    Quiz,
}

impl CardType {
    pub fn as_str(&self) -> &str {
        match self {
            CardType::Flashcard => "flashcard",
            CardType::Quiz => "quiz",
        }
    }
}

impl Display for CardType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One answer choice of a quiz card.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    pub is_correct: bool,
}

impl QuizOption {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }
}

/// What kind of card this is, with the quiz options when it is a quiz.
#[derive(Clone, PartialEq, Debug)]
pub enum CardContent {
    Flashcard,
    Quiz(Vec<QuizOption>),
}

impl CardContent {
    pub fn card_type(&self) -> CardType {
        match self {
            CardContent::Flashcard => CardType::Flashcard,
            CardContent::Quiz(_) => CardType::Quiz,
        }
    }

    /// Drop blank options and check that a quiz has enough options with
    /// exactly one marked correct.
    fn normalize(self) -> Fallible<Self> {
        match self {
            CardContent::Flashcard => Ok(CardContent::Flashcard),
            CardContent::Quiz(options) => {
                let options: Vec<QuizOption> = options
                    .into_iter()
                    .filter(|opt| !opt.text.trim().is_empty())
                    .collect();
                if options.len() < MIN_QUIZ_OPTIONS {
                    return fail(format!(
                        "a quiz card needs at least {MIN_QUIZ_OPTIONS} non-blank options"
                    ));
                }
                let correct = options.iter().filter(|opt| opt.is_correct).count();
                if correct != 1 {
                    return fail(format!(
                        "a quiz card needs exactly one correct option, found {correct}"
                    ));
                }
                Ok(CardContent::Quiz(options))
            }
        }
    }
}

/// A question/answer card together with its scheduling state.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuizOption>>,
    pub created_at: Timestamp,
    pub next_review: Timestamp,
    /// Days until the next scheduled review.
    pub interval: u32,
    pub ease_factor: f64,
    /// Consecutive successful reviews since the last failure.
    pub repetitions: u32,
}

impl Card {
    /// A fresh card, due immediately.
    pub fn new(
        id: CardId,
        question: String,
        answer: String,
        content: CardContent,
        now: Timestamp,
    ) -> Self {
        let mut card = Card {
            id,
            question,
            answer,
            card_type: CardType::Flashcard,
            options: None,
            created_at: now,
            next_review: now,
            interval: INITIAL_INTERVAL,
            ease_factor: INITIAL_EASE_FACTOR,
            repetitions: 0,
        };
        card.set_content(content);
        card
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review <= now
    }

    pub fn content(&self) -> CardContent {
        match self.card_type {
            CardType::Flashcard => CardContent::Flashcard,
            CardType::Quiz => CardContent::Quiz(self.options.clone().unwrap_or_default()),
        }
    }

    fn set_content(&mut self, content: CardContent) {
        self.card_type = content.card_type();
        self.options = match content {
            CardContent::Flashcard => None,
            CardContent::Quiz(options) => Some(options),
        };
    }

    /// The correct option of a quiz card, if there is exactly one.
    pub fn correct_option(&self) -> Option<&QuizOption> {
        let options = self.options.as_ref()?;
        let mut correct = options.iter().filter(|opt| opt.is_correct);
        match (correct.next(), correct.next()) {
            (Some(opt), None) => Some(opt),
            _ => None,
        }
    }

    /// Describe every way this card breaks the data-entry rules or the
    /// scheduling invariants. Loaded documents are not held to the entry
    /// rules, so this is how they get audited.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.question.trim().is_empty() {
            problems.push("question is blank".to_string());
        }
        if self.answer.trim().is_empty() {
            problems.push("answer is blank".to_string());
        }
        match (self.card_type, &self.options) {
            (CardType::Flashcard, Some(_)) => {
                problems.push("flashcard carries quiz options".to_string());
            }
            (CardType::Quiz, _) => {
                if let Err(e) = self.content().normalize() {
                    problems.push(e.message().to_string());
                }
            }
            (CardType::Flashcard, None) => {}
        }
        if self.interval < INITIAL_INTERVAL {
            problems.push(format!("interval {} is below 1 day", self.interval));
        }
        if self.ease_factor < crate::sm2::MIN_EASE_FACTOR || !self.ease_factor.is_finite() {
            problems.push(format!("ease factor {} is below the minimum", self.ease_factor));
        }
        if self.next_review < self.created_at {
            problems.push("next review is before creation".to_string());
        }
        problems
    }
}

/// The user-entered part of a new card.
#[derive(Clone, PartialEq, Debug)]
pub struct NewCard {
    pub question: String,
    pub answer: String,
    pub content: CardContent,
}

impl NewCard {
    pub fn flashcard(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            content: CardContent::Flashcard,
        }
    }

    pub fn quiz(
        question: impl Into<String>,
        answer: impl Into<String>,
        options: Vec<QuizOption>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            content: CardContent::Quiz(options),
        }
    }

    /// Check the entry rules and normalize the quiz options.
    pub fn validate(self) -> Fallible<Self> {
        check_text("question", &self.question)?;
        check_text("answer", &self.answer)?;
        Ok(Self {
            question: self.question,
            answer: self.answer,
            content: self.content.normalize()?,
        })
    }
}

/// A partial edit of a card's content. Scheduling fields cannot be
/// patched.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct CardPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub content: Option<CardContent>,
}

impl CardPatch {
    pub fn is_empty(&self) -> bool {
        self.question.is_none() && self.answer.is_none() && self.content.is_none()
    }

    /// Merge this patch into `card`. The card is only modified when the
    /// merged result passes the entry rules.
    pub fn apply(self, card: &mut Card) -> Fallible<()> {
        let merged = NewCard {
            question: self.question.unwrap_or_else(|| card.question.clone()),
            answer: self.answer.unwrap_or_else(|| card.answer.clone()),
            content: self.content.unwrap_or_else(|| card.content()),
        }
        .validate()?;
        card.question = merged.question;
        card.answer = merged.answer;
        card.set_content(merged.content);
        Ok(())
    }
}

fn check_text(field: &str, value: &str) -> Fallible<()> {
    if value.trim().is_empty() {
        return fail(format!("{field} must not be blank"));
    }
    Ok(())
}
