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
use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use studycards_core::error::Fallible;
use studycards_core::types::card::CardContent;
use studycards_core::types::card::CardPatch;
use studycards_core::types::card::NewCard;
use studycards_core::types::id::CardId;
use studycards_core::types::quality::Quality;
use studycards_core::types::timestamp::Timestamp;

use crate::cmd::Session;
use crate::cmd::cards::add_card;
use crate::cmd::cards::delete_card;
use crate::cmd::cards::edit_card;
use crate::cmd::cards::list_cards;
use crate::cmd::cards::quiz_options;
use crate::cmd::check::check_document;
use crate::cmd::orphans::delete_orphans;
use crate::cmd::orphans::list_orphans;
use crate::cmd::quiz::clock_rng;
use crate::cmd::quiz::print_quiz;
use crate::cmd::review::list_due;
use crate::cmd::review::review_card;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::config::Config;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the config file. By default, `studycards.toml` in the current directory is used if it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to the JSON data file. Overrides the config file.
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    /// Label for where the data file lives. Overrides the config file.
    #[arg(long, global = true)]
    data_folder: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a card.
    Add {
        question: String,
        answer: String,
        /// Make a multiple-choice card. Requires at least two `--option`s.
        #[arg(long)]
        quiz: bool,
        /// A quiz option. Repeat for each option.
        #[arg(long = "option", requires = "quiz")]
        options: Vec<String>,
        /// Position of the correct option, starting from 1.
        #[arg(long, requires = "quiz")]
        correct: Option<usize>,
    },
    /// List all cards.
    List,
    /// Change a card's text or options. Scheduling is left alone.
    Edit {
        #[arg(value_parser = parse_card_id)]
        id: CardId,
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
        /// Turn the card into a plain flashcard.
        #[arg(long, conflicts_with_all = ["options", "correct"])]
        flashcard: bool,
        /// Replace the quiz options. Repeat for each option.
        #[arg(long = "option")]
        options: Vec<String>,
        /// Position of the correct option, starting from 1.
        #[arg(long, requires = "options")]
        correct: Option<usize>,
    },
    /// Delete a card. Its reviews are kept as orphans.
    Delete {
        #[arg(value_parser = parse_card_id)]
        id: CardId,
    },
    /// List the cards due for review.
    Due,
    /// Grade a card.
    Review {
        #[arg(value_parser = parse_card_id)]
        id: CardId,
        /// A number from 0 to 5, or one of `failed`, `hard`, `easy`.
        #[arg(value_parser = parse_quality)]
        quality: Quality,
    },
    /// Draw random cards, due or not.
    Quiz {
        /// Maximum number of cards. Default is the config's `quiz_limit`.
        #[arg(long)]
        limit: Option<usize>,
        /// Show answers and mark the correct options.
        #[arg(long)]
        reveal: bool,
    },
    /// Print study statistics.
    Stats {
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Check the integrity of the data file.
    Check,
    /// Commands relating to reviews of deleted cards.
    Orphans {
        #[command(subcommand)]
        command: OrphanCommand,
    },
}

#[derive(Subcommand)]
enum OrphanCommand {
    /// List reviews whose card no longer exists.
    List,
    /// Remove those reviews from the data file.
    Delete,
}

fn parse_card_id(s: &str) -> Result<CardId, String> {
    CardId::try_from(s).map_err(|e| e.message().to_string())
}

fn parse_quality(s: &str) -> Result<Quality, String> {
    Quality::parse(s).map_err(|e| e.message().to_string())
}

pub fn entrypoint() -> Fallible<()> {
    let cli = Cli::parse();
    let config =
        Config::load(cli.config.as_deref())?.with_overrides(cli.data_file, cli.data_folder);
    let mut out = stdout().lock();
    run(cli.command, &config, Timestamp::now(), &mut out)
}

fn run(command: Command, config: &Config, now: Timestamp, out: &mut impl Write) -> Fallible<()> {
    let mut session = Session::open(config, now)?;
    match command {
        Command::Add {
            question,
            answer,
            quiz,
            options,
            correct,
        } => {
            let new = if quiz {
                NewCard::quiz(question, answer, quiz_options(options, correct)?)
            } else {
                NewCard::flashcard(question, answer)
            };
            add_card(&mut session, new, out)?;
        }
        Command::List => list_cards(&session, out)?,
        Command::Edit {
            id,
            question,
            answer,
            flashcard,
            options,
            correct,
        } => {
            let content = if flashcard {
                Some(CardContent::Flashcard)
            } else if !options.is_empty() {
                Some(CardContent::Quiz(quiz_options(options, correct)?))
            } else {
                None
            };
            let patch = CardPatch {
                question,
                answer,
                content,
            };
            edit_card(&mut session, &id, patch, out)?;
        }
        Command::Delete { id } => delete_card(&mut session, &id, out)?,
        Command::Due => list_due(&session, out)?,
        Command::Review { id, quality } => review_card(&mut session, &id, quality, out)?,
        Command::Quiz { limit, reveal } => {
            let limit = limit.unwrap_or(config.quiz_limit);
            print_quiz(&session, limit, reveal, &mut clock_rng(), out)?;
        }
        Command::Stats { format } => print_stats(&mut session, format, out)?,
        Command::Check => check_document(session.store(), out)?,
        Command::Orphans { command } => match command {
            OrphanCommand::List => list_orphans(&session, out)?,
            OrphanCommand::Delete => delete_orphans(&mut session, out)?,
        },
    }
    session.close()
}
