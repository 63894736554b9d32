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

use crate::error::ErrorReport;
use crate::error::fail;

/// The highest quality grade.
pub const MAX_QUALITY: u8 = 5;

/// The lowest grade that counts as a successful recall.
pub const PASSING_QUALITY: u8 = 3;

/// A self-assessed review grade in `0..=5`.
///
/// Out-of-range values are rejected on construction rather than clamped.
/// The review buttons only ever submit [`Quality::FAILED`],
/// [`Quality::HARD`] and [`Quality::EASY`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const FAILED: Quality = Quality(1);
    pub const HARD: Quality = Quality(3);
    pub const EASY: Quality = Quality(5);

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 >= PASSING_QUALITY
    }

    /// Parse either a digit (`"0"`..`"5"`) or one of the button names.
    pub fn parse(s: &str) -> Result<Self, ErrorReport> {
        match s.trim() {
            "failed" => Ok(Quality::FAILED),
            "hard" => Ok(Quality::HARD),
            "easy" => Ok(Quality::EASY),
            other => match other.parse::<u8>() {
                Ok(n) => Quality::try_from(n),
                Err(_) => fail(format!("invalid quality: '{other}'")),
            },
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > MAX_QUALITY {
            return fail(format!(
                "quality must be between 0 and {MAX_QUALITY}, got {value}"
            ));
        }
        Ok(Quality(value))
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> u8 {
        q.0
    }
}

impl From<Quality> for f64 {
    fn from(q: Quality) -> f64 {
        q.0 as f64
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
