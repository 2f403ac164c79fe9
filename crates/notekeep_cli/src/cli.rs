use clap::{Args, Parser, Subcommand};
use notekeep_core::NoteId;
use std::path::PathBuf;

/// Create, read, edit, archive and delete notes on a notes API server.
#[derive(Parser, Debug)]
#[command(name = "notekeep", version)]
pub struct Cli {
    /// SQLite file remembering which notes this client owns
    #[arg(long, env = "NOTEKEEP_STATE_DB")]
    pub state_db: Option<PathBuf>,

    /// Absolute directory for rotating log files; logging is off when unset
    #[arg(long, env = "NOTEKEEP_LOG_DIR")]
    pub log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "NOTEKEEP_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a note and remember it as owned
    Create(NoteFields),
    /// Show a note and remember it as owned
    Show { id: NoteId },
    /// Replace a note's title, body and tags
    Update {
        id: NoteId,
        #[command(flatten)]
        fields: NoteFields,
        /// Mark the note archived
        #[arg(long, conflicts_with = "unarchive")]
        archive: bool,
        /// Mark the note active again
        #[arg(long)]
        unarchive: bool,
    },
    /// Archive a note, keeping its content
    Archive { id: NoteId },
    /// Unarchive a note, keeping its content
    Unarchive { id: NoteId },
    /// Delete a note on the server and forget it locally
    Delete { id: NoteId },
    /// List ids of notes owned by this client
    List,
    /// Forget a note locally without touching the server
    Forget { id: NoteId },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub body: String,
    /// Comma-separated tags, e.g. "work, ideas"
    #[arg(long, default_value = "")]
    pub tags: String,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn update_parses_archive_flag() {
        let cli = Cli::try_parse_from([
            "notekeep", "update", "3", "--title", "T", "--body", "B", "--archive",
        ])
        .unwrap();
        match cli.command {
            Command::Update {
                id,
                fields,
                archive,
                unarchive,
            } => {
                assert_eq!(id, 3);
                assert_eq!(fields.tags, "");
                assert!(archive);
                assert!(!unarchive);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn archive_and_unarchive_conflict() {
        let result = Cli::try_parse_from([
            "notekeep",
            "update",
            "3",
            "--title",
            "T",
            "--body",
            "B",
            "--archive",
            "--unarchive",
        ]);
        assert!(result.is_err());
    }
}
