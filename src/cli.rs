use crate::model::Interval;
use crate::util::parse_max_count;
use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "git-visualize")]
#[command(about = "Visualize Git repository commit activity as charts or raw JSON")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug, Default)]
pub struct CommonArgs {
    #[arg(long = "ref", global = true, help = "Branch or tag to check out when cloning a URL")]
    pub reference: Option<String>,

    #[arg(long, global = true, help = "Only count commits that changed this file or directory")]
    pub path: Option<String>,

    #[arg(short = 'y', long, global = true, help = "Overwrite an existing output file without asking")]
    pub yes: bool,

    #[arg(short, long, global = true, help = "Hide clone progress bars")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "See the commits per author in a repository")]
    AuthorCommits {
        #[arg(help = "Repository URL or path")]
        repo: String,

        #[arg(short, long, default_value = "./commits-per-author.png", help = "Output PNG/JPEG/WEBP file")]
        output: PathBuf,

        #[arg(short, long, default_value = "50", value_parser = parse_max_count, help = "Maximum number of authors displayed in the graph")]
        max: usize,

        #[arg(long, help = "Count authors sharing a name or email as one person")]
        merge_identities: bool,

        #[arg(long, help = "Print the aggregated rows as JSON instead of rendering a chart")]
        json: bool,
    },
    #[command(about = "Compare author activity over time for a repository")]
    AuthorActivity {
        #[arg(help = "Repository URL or path")]
        repo: String,

        #[arg(short, long, default_value = "./author-activity.png", help = "Output PNG/JPEG/WEBP file")]
        output: PathBuf,

        #[arg(short, long, default_value = "10", value_parser = parse_max_count, help = "Maximum number of authors displayed in the graph")]
        max: usize,

        #[arg(short, long, default_value = "month", value_parser = Interval::from_str, help = "Aggregation interval: \"day\", \"month\", or \"year\"")]
        interval: Interval,

        #[arg(long, help = "Count authors sharing a name or email as one person")]
        merge_identities: bool,

        #[arg(long, help = "Print the aggregated rows as JSON instead of rendering a chart")]
        json: bool,
    },
    #[command(about = "Compare commit activity over time across multiple repositories")]
    CommitActivity {
        #[arg(required = true, num_args = 1.., help = "Repository URL(s) or path(s)")]
        repos: Vec<String>,

        #[arg(short, long, default_value = "./commit-activity.png", help = "Output PNG/JPEG/WEBP file")]
        output: PathBuf,

        #[arg(short, long, default_value = "month", value_parser = Interval::from_str, help = "Aggregation interval: \"day\", \"month\", or \"year\"")]
        interval: Interval,

        #[arg(long, help = "Print the aggregated rows as JSON instead of rendering a chart")]
        json: bool,
    },
    #[command(about = "Get raw JSON commit log for a repository")]
    RawLog {
        #[arg(help = "Repository URL or path")]
        repo: String,

        #[arg(short, long, default_value = "./repo-log.json", help = "Output JSON file")]
        output: PathBuf,

        #[arg(long, help = "Pretty print JSON output")]
        pretty: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::logging::init(self.common.verbose);

        match self.command {
            Commands::AuthorCommits { repo, output, max, merge_identities, json } => {
                crate::commands::author_commits::exec(self.common, repo, output, max, merge_identities, json)
            }
            Commands::AuthorActivity { repo, output, max, interval, merge_identities, json } => {
                crate::commands::author_activity::exec(
                    self.common,
                    repo,
                    output,
                    max,
                    interval,
                    merge_identities,
                    json,
                )
            }
            Commands::CommitActivity { repos, output, interval, json } => {
                crate::commands::commit_activity::exec(self.common, repos, output, interval, json)
            }
            Commands::RawLog { repo, output, pretty } => {
                crate::commands::raw_log::exec(self.common, repo, output, pretty)
            }
        }
    }
}
