use clap::{Parser, Subcommand};
use quicknote_core::{NoteId, StoreConfig, UpgradePolicy};
use std::path::PathBuf;

pub const DEFAULT_DB_FILE: &str = "quicknote.sqlite3";

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, author, about = "single-screen local notes")]
pub struct CliConfig {
    /// SQLite file holding the notes table
    #[arg(long, env = "QUICKNOTE_DB_PATH", default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// Directory for rolling log files; logging is off when omitted
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Drop and rebuild the notes table when its schema is outdated (loses data)
    #[arg(long, default_value_t = false)]
    pub recreate_on_upgrade: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum Command {
    /// Create a note
    Add { text: String },
    /// Print one note
    Show { id: NoteId },
    /// Print all notes, newest first
    List {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the number of notes
    Count,
    /// Replace the text of a note
    Edit { id: NoteId, text: String },
    /// Delete a note
    Rm { id: NoteId },
    /// Interactive list screen
    Shell,
    /// Print core version
    Version,
}

impl CliConfig {
    pub fn store_config(&self) -> StoreConfig {
        let policy = if self.recreate_on_upgrade {
            UpgradePolicy::Recreate
        } else {
            UpgradePolicy::Migrate
        };
        StoreConfig::new(self.db.clone()).with_upgrade_policy(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, Command};
    use clap::Parser;
    use quicknote_core::UpgradePolicy;

    #[test]
    fn parses_edit_with_global_flags() {
        let config = CliConfig::try_parse_from([
            "quicknote",
            "--db",
            "/tmp/x.sqlite3",
            "--recreate-on-upgrade",
            "edit",
            "4",
            "new text",
        ])
        .unwrap();

        assert_eq!(
            config.command,
            Command::Edit {
                id: 4,
                text: "new text".to_string()
            }
        );
        assert_eq!(
            config.store_config().upgrade_policy,
            UpgradePolicy::Recreate
        );
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(CliConfig::try_parse_from(["quicknote", "show", "abc"]).is_err());
    }
}
