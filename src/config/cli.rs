use crate::app::render::OutputFormat;
use crate::config::toml_config::SearchConfig;
use crate::domain::model::Category;
use crate::domain::query::Query;
use crate::utils::error::Result;
use crate::utils::validation::validate_search_input;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "playfinder")]
#[command(about = "Find fun games for kids by age and available time")]
pub struct CliConfig {
    /// Path to a TOML configuration file (defaults to ./playfinder.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// API key for AI ranking; overrides the saved key
    #[arg(long, global = true, env = "PLAYFINDER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the credential file location
    #[arg(long, global = true)]
    pub key_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find games for a child's age and available time
    Find(FindArgs),

    /// Show the game of the day
    Featured {
        /// Rank with AI (a no-op without a key)
        #[arg(long)]
        ai: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Manage the saved AI API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Chat with Pi, the friendly companion
    Chat {
        /// Answer a single message instead of starting an interactive session
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List bedtime story videos
    Stories {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Subcommand)]
pub enum KeyAction {
    /// Save (or overwrite) the API key
    Set { value: String },
    /// Show whether a key is saved
    Show,
    /// Remove the saved key
    Clear,
}

#[derive(Debug, Clone, Args)]
pub struct FindArgs {
    /// Child's age (1-12)
    #[arg(long, conflicts_with = "query")]
    pub age: Option<i64>,

    /// Available time in minutes (5-60)
    #[arg(long, conflicts_with = "query")]
    pub time: Option<i64>,

    /// Category: all, indoor, outdoor, active, quiet, learning, creative, group
    #[arg(long, conflicts_with = "query")]
    pub category: Option<String>,

    /// Show a single game by id
    #[arg(long, conflicts_with = "query")]
    pub featured: Option<String>,

    /// Raw query string, e.g. "age=6&time=15&category=creative"
    #[arg(long)]
    pub query: Option<String>,

    /// Rank results with AI (a no-op without a key)
    #[arg(long)]
    pub ai: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl FindArgs {
    /// 旗標模式比照搜尋表單檢查範圍；查詢字串模式不檢查，無效值只會得到空結果
    pub fn to_query(&self, defaults: &SearchConfig) -> Result<Query> {
        if let Some(raw) = &self.query {
            return Ok(Query::from_query_string_with_defaults(
                raw,
                defaults.default_age,
                defaults.default_minutes,
            ));
        }

        let age = self.age.unwrap_or(defaults.default_age);
        let minutes = self.time.unwrap_or(defaults.default_minutes);

        let featured = self.featured.clone().filter(|id| !id.trim().is_empty());
        if featured.is_none() {
            validate_search_input(age, minutes)?;
        }

        Ok(Query::new(age, minutes)
            .with_category(self.category.as_deref().and_then(Category::parse))
            .with_featured_id(featured))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::InputNumber;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(args).unwrap()
    }

    fn find_args(cli: CliConfig) -> FindArgs {
        match cli.command {
            Command::Find(args) => args,
            other => panic!("expected find, got {:?}", other),
        }
    }

    #[test]
    fn test_find_flags_build_query() {
        let cli = parse(&["playfinder", "find", "--age", "6", "--time", "20", "--category", "creative"]);
        let query = find_args(cli).to_query(&SearchConfig::default()).unwrap();

        assert_eq!(query.age, InputNumber::Value(6));
        assert_eq!(query.available_minutes, InputNumber::Value(20));
        assert_eq!(query.category, Some(Category::Creative));
    }

    #[test]
    fn test_find_defaults_come_from_config() {
        let cli = parse(&["playfinder", "find"]);
        let defaults = SearchConfig {
            default_age: 8,
            default_minutes: 30,
            featured_id: "5".to_string(),
        };
        let query = find_args(cli).to_query(&defaults).unwrap();

        assert_eq!(query.age, InputNumber::Value(8));
        assert_eq!(query.available_minutes, InputNumber::Value(30));
    }

    #[test]
    fn test_find_flags_are_range_checked() {
        let cli = parse(&["playfinder", "find", "--age", "15"]);
        assert!(find_args(cli).to_query(&SearchConfig::default()).is_err());

        let cli = parse(&["playfinder", "find", "--time", "90"]);
        assert!(find_args(cli).to_query(&SearchConfig::default()).is_err());
    }

    #[test]
    fn test_featured_skips_range_check() {
        let cli = parse(&["playfinder", "find", "--age", "40", "--featured", "3"]);
        let query = find_args(cli).to_query(&SearchConfig::default()).unwrap();
        assert_eq!(query.featured_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_query_string_is_not_range_checked() {
        let cli = parse(&["playfinder", "find", "--query", "age=abc&time=15"]);
        let query = find_args(cli).to_query(&SearchConfig::default()).unwrap();
        assert_eq!(query.age, InputNumber::Malformed);
    }

    #[test]
    fn test_query_conflicts_with_flags() {
        assert!(CliConfig::try_parse_from(["playfinder", "find", "--age", "5", "--query", "age=6"]).is_err());
    }

    #[test]
    fn test_key_subcommands() {
        let cli = parse(&["playfinder", "key", "set", "abc123"]);
        assert!(matches!(
            cli.command,
            Command::Key { action: KeyAction::Set { ref value } } if value == "abc123"
        ));

        let cli = parse(&["playfinder", "--key-file", "/tmp/k.toml", "key", "clear"]);
        assert_eq!(cli.key_file, Some(PathBuf::from("/tmp/k.toml")));
    }

    #[test]
    fn test_format_flag() {
        let cli = parse(&["playfinder", "stories", "--format", "json"]);
        assert!(matches!(cli.command, Command::Stories { format: OutputFormat::Json }));
    }
}
