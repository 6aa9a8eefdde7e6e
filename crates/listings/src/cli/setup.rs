use clap::{Parser, Subcommand, ValueEnum};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "listings",
    bin_name = "listings",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Browse and filter real-estate listings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $LISTINGS_DATA, then the OS data dir)
    #[arg(long, global = true, help_heading = "Options")]
    pub data: Option<String>,

    /// Page URL to start from; its filter_* parameters are the applied filters
    #[arg(long, global = true, help_heading = "Options")]
    pub url: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Text, help_heading = "Options")]
    pub output: OutputMode,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed the data directory with the bundled sample dataset
    #[command(display_order = 1)]
    Init {
        /// Replace an existing dataset
        #[arg(long)]
        force: bool,
    },

    /// Apply filters and list matching listings
    #[command(alias = "s", display_order = 2)]
    Search {
        /// Filter as code=value, value encoded like a URL parameter
        /// (e.g. price=[50000,150000], district=["Yunusabad"], is_furnished=true)
        #[arg(short, long = "filter", value_name = "CODE=VALUE")]
        filters: Vec<String>,

        /// Drop an applied filter by attribute code
        #[arg(short, long = "remove", value_name = "CODE")]
        remove: Vec<String>,

        /// Clear all applied filters first
        #[arg(long)]
        clear: bool,

        /// Result page (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show the filter panel: attributes, widgets and what is still available
    #[command(alias = "attrs", display_order = 3)]
    Attributes,

    /// View one listing with its contact info
    #[command(alias = "v", display_order = 4)]
    View { id: i64 },

    /// Edit the contact info of a listing
    #[command(display_order = 5)]
    Contact {
        id: i64,

        /// Author name (empty string clears it)
        #[arg(long)]
        name: Option<String>,

        /// Author phone (empty string clears it)
        #[arg(long)]
        phone: Option<String>,

        /// Notes (empty string clears them)
        #[arg(long)]
        notes: Option<String>,
    },

    /// Print the page URL, optionally in another locale
    #[command(display_order = 6)]
    Url {
        /// Locale segment to switch to (e.g. ru, uz)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Show the effective configuration
    #[command(display_order = 7)]
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_filters() {
        let cli = Cli::try_parse_from([
            "listings",
            "search",
            "--filter",
            "price=[1,2]",
            "-f",
            "ad_type=Rent",
            "--page",
            "2",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Search { filters, page, .. }) => {
                assert_eq!(filters, vec!["price=[1,2]", "ad_type=Rent"]);
                assert_eq!(page, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["listings", "view", "1001", "--output", "json"]).unwrap();
        assert_eq!(cli.output, OutputMode::Json);
        assert!(matches!(cli.command, Some(Commands::View { id: 1001 })));
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["listings"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output, OutputMode::Text);
    }
}
