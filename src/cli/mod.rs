//! CLI command handling for accgen.

mod commands;
mod session;
mod workspace;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::source::{DEFAULT_ENCODING, DEFAULT_SOURCE};
use crate::utilities::DEFAULT_PASSWORD_LEN;

pub use commands::{
    check, clip_get, clip_set, features, features_set, generate, password, report, scroll_speed,
    update,
};
pub use session::run as session;
pub use workspace::Workspace;

#[derive(Parser)]
#[command(name = "accgen")]
#[command(about = "Account generator - random account activity from a spreadsheet")]
#[command(version)]
pub struct Cli {
    /// Semicolon-separated data file
    #[arg(long, global = true, default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,

    /// Configuration directory (default: `config/` next to the executable)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Seed for reproducible generation
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Encoding of the data file
    #[arg(long, global = true, default_value = DEFAULT_ENCODING)]
    pub encoding: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactive session (default)
    Session,
    /// Generate every section once and print it
    Generate,
    /// Check the data file, columns and configuration
    Check,
    /// Show feature switches (or change one)
    Features {
        #[command(subcommand)]
        action: Option<FeaturesAction>,
    },
    /// Show or set the scroll speed
    ScrollSpeed { speed: Option<u32> },
    /// Check for a newer release
    Update,
    /// Generate a password
    Password {
        #[arg(long, default_value_t = DEFAULT_PASSWORD_LEN)]
        length: usize,
        /// Letters and digits only
        #[arg(long)]
        no_symbols: bool,
        /// Also copy it to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Read or write the clipboard
    Clip {
        #[command(subcommand)]
        action: ClipAction,
    },
    /// Today's copy activity
    Report,
}

#[derive(Subcommand)]
pub enum FeaturesAction {
    /// Turn a feature on or off
    Set {
        category: String,
        feature: String,
        state: Switch,
    },
}

#[derive(Subcommand)]
pub enum ClipAction {
    /// Print the clipboard contents
    Get,
    /// Replace the clipboard contents
    Set { text: String },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_arguments() {
        let cli = Cli::try_parse_from(["accgen"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.source, PathBuf::from(DEFAULT_SOURCE));
        assert_eq!(cli.encoding, DEFAULT_ENCODING);
        assert!(cli.seed.is_none());
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["accgen", "generate", "--seed", "7", "--source", "x.csv"])
            .unwrap();
        assert!(matches!(cli.command, Some(Command::Generate)));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.source, PathBuf::from("x.csv"));
    }

    #[test]
    fn features_set_parses_switch() {
        let cli =
            Cli::try_parse_from(["accgen", "features", "set", "generators", "weirdo", "off"])
                .unwrap();
        let Some(Command::Features {
            action: Some(FeaturesAction::Set { category, feature, state }),
        }) = cli.command
        else {
            panic!("expected features set");
        };
        assert_eq!(category, "generators");
        assert_eq!(feature, "weirdo");
        assert!(!state.is_on());
    }

    #[test]
    fn password_flags() {
        let cli = Cli::try_parse_from(["accgen", "password", "--length", "24", "--no-symbols"])
            .unwrap();
        let Some(Command::Password { length, no_symbols, copy }) = cli.command else {
            panic!("expected password");
        };
        assert_eq!(length, 24);
        assert!(no_symbols);
        assert!(!copy);
    }
}
