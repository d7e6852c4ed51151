use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use deadmanssnitch::{AlertType, DesiredState, Interval, TagState};

#[derive(Parser)]
#[command(name = "snitchctl")]
#[command(version)]
#[command(about = "Manage Dead Man's Snitch monitors declaratively", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Dead Man's Snitch API key
    #[arg(long, env = "DMS_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Emit results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile a snitch against a desired state
    Apply(ApplyArgs),

    /// Reconcile the tags on an existing snitch
    Tags(TagsArgs),

    /// List snitches, optionally filtered by name, id, or tags
    List(ListArgs),

    /// Pause alerting for a snitch
    Pause(SelectArgs),

    /// Resume alerting for a snitch
    Unpause(SelectArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Apply
// ============================================================================

#[derive(Args)]
pub struct ApplyArgs {
    /// Name of the snitch, or its new name when updating by id.
    /// Required when creating
    #[arg(long)]
    pub name: Option<String>,

    /// Upstream id (token) of the snitch
    #[arg(long)]
    pub id: Option<String>,

    /// Desired lifecycle state: present or absent
    #[arg(long, default_value = "present")]
    pub state: DesiredState,

    /// Expected check-in cadence (e.g. hourly, daily, 15_minute).
    /// Required when creating
    #[arg(long)]
    pub interval: Option<Interval>,

    /// Alert type: basic or smart
    #[arg(long)]
    pub alert_type: Option<AlertType>,

    /// Alert email address; repeatable. Replaces the full list on the snitch
    #[arg(long = "alert-email")]
    pub alert_email: Option<Vec<String>>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Tag to set; repeatable. Forwarded verbatim to the create/update call —
    /// use the tags subcommand for additive or subtractive changes
    #[arg(long = "tag")]
    pub tags: Option<Vec<String>>,
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Args)]
pub struct TagsArgs {
    /// Name of the snitch to modify
    #[arg(long)]
    pub name: Option<String>,

    /// Upstream id (token) of the snitch to modify
    #[arg(long)]
    pub id: Option<String>,

    /// Desired tag state: present, absent, or absolute
    #[arg(long, default_value = "present")]
    pub state: TagState,

    /// Tags to reconcile. May be empty with --state absolute to clear
    /// all tags
    pub tags: Vec<String>,
}

// ============================================================================
// List
// ============================================================================

#[derive(Args)]
pub struct ListArgs {
    /// Exact name to look up (first match in listing order)
    #[arg(long, group = "selector")]
    pub name: Option<String>,

    /// Upstream id (token) to look up
    #[arg(long, group = "selector")]
    pub id: Option<String>,

    /// Filter by tag; repeatable
    #[arg(long = "tag", group = "selector")]
    pub tags: Vec<String>,
}

// ============================================================================
// Pause / Unpause
// ============================================================================

#[derive(Args)]
pub struct SelectArgs {
    /// Name of the snitch
    #[arg(long)]
    pub name: Option<String>,

    /// Upstream id (token) of the snitch
    #[arg(long)]
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_assertions() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_apply() {
        let cli = Cli::try_parse_from([
            "snitchctl",
            "apply",
            "--name",
            "backup-job",
            "--interval",
            "daily",
            "--tag",
            "prod",
            "--tag",
            "backups",
        ])
        .unwrap();

        match cli.command {
            Command::Apply(args) => {
                assert_eq!(args.name.as_deref(), Some("backup-job"));
                assert_eq!(args.interval, Some(Interval::Daily));
                assert_eq!(args.state, DesiredState::Present);
                assert_eq!(
                    args.tags,
                    Some(vec!["prod".to_string(), "backups".to_string()])
                );
            }
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn test_parse_apply_rejects_bad_interval() {
        let result = Cli::try_parse_from(["snitchctl", "apply", "--interval", "fortnightly"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_tags_defaults_to_present() {
        let cli = Cli::try_parse_from(["snitchctl", "tags", "--id", "abc", "one", "two"]).unwrap();
        match cli.command {
            Command::Tags(args) => {
                assert_eq!(args.state, TagState::Present);
                assert_eq!(args.tags, vec!["one", "two"]);
            }
            _ => panic!("expected tags"),
        }
    }

    #[test]
    fn test_parse_tags_allows_empty_list_for_absolute() {
        let cli = Cli::try_parse_from(["snitchctl", "tags", "--id", "abc", "--state", "absolute"])
            .unwrap();
        match cli.command {
            Command::Tags(args) => {
                assert_eq!(args.state, TagState::Absolute);
                assert!(args.tags.is_empty());
            }
            _ => panic!("expected tags"),
        }
    }

    #[test]
    fn test_list_selectors_are_exclusive() {
        let result = Cli::try_parse_from(["snitchctl", "list", "--name", "foo", "--id", "abc"]);
        assert!(result.is_err());
    }
}
