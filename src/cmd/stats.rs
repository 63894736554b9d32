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
use std::io::Write;

use clap::ValueEnum;
use studycards_core::error::Fallible;
use studycards_core::stats::compute_stats;

use crate::cmd::Session;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum StatsFormat {
    Text,
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

/// Print freshly computed stats. A stale cached copy in the document is
/// refreshed, which saves it.
pub fn print_stats(
    session: &mut Session,
    format: StatsFormat,
    out: &mut impl Write,
) -> Fallible<()> {
    let now = session.now;
    let store = session.store();
    let stats = compute_stats(store.cards(), store.reviews(), now);
    if stats != store.cached_stats() {
        session.store_mut().stats(now);
    }
    match format {
        StatsFormat::Text => {
            let info = session.store().file_info();
            writeln!(out, "Total cards:         {}", stats.total_cards)?;
            writeln!(out, "Due now:             {}", stats.review_today)?;
            writeln!(out, "Reviewed this week:  {}", stats.reviewed_this_week)?;
            writeln!(out, "Total reviews:       {}", info.total_reviews)?;
            match info.last_sync {
                Some(ts) => writeln!(out, "Last saved:          {ts}")?,
                None => writeln!(out, "Last saved:          never")?,
            }
        }
        StatsFormat::Json => {
            let json = serde_json::to_string_pretty(&stats)?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}
