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

//! Reviews left behind by deleted cards.

use std::io::Write;

use studycards_core::error::Fallible;

use crate::cmd::Session;

pub fn list_orphans(session: &Session, out: &mut impl Write) -> Fallible<()> {
    for review in session.store().orphan_reviews() {
        writeln!(
            out,
            "{} {} {}",
            review.id, review.card_id, review.reviewed_at
        )?;
    }
    Ok(())
}

pub fn delete_orphans(session: &mut Session, out: &mut impl Write) -> Fallible<()> {
    if session.store().orphan_reviews().is_empty() {
        writeln!(out, "No orphan reviews.")?;
        return Ok(());
    }
    let now = session.now;
    let pruned = session.store_mut().prune_orphan_reviews(now);
    writeln!(out, "Deleted {pruned} orphan reviews.")?;
    Ok(())
}
