use clap::{Args as ClapArgs, Parser, Subcommand};
use miette::IntoDiagnostic;
use reacji::{
    AddReactionParams, GetReactionParams, ItemRef, ListReactionParams, PagingInfo,
    ReactionService, RemoveReactionParams,
};
use reacji_common::WebApi;
use reacji_common::executor::DEFAULT_BASE;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about = "reacji - add, remove and list Slack reactions")]
struct Args {
    /// API token
    #[arg(short, long, env = "SLACK_TOKEN", hide_env_values = true)]
    token: String,

    /// Web API base URL
    #[arg(long, default_value = DEFAULT_BASE)]
    base_url: Url,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a reaction to an item
    Add {
        /// Emoji name, without colons
        name: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Remove a reaction from an item
    Remove {
        /// Emoji name, without colons
        name: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Show the reactions on an item
    Get {
        #[command(flatten)]
        target: TargetArgs,
        /// Return every user for each reaction
        #[arg(long)]
        full: bool,
    },
    /// List the items a user has reacted to
    List {
        /// User ID (defaults to the token's user)
        #[arg(short, long, default_value = "")]
        user: String,
        /// Items per page
        #[arg(long, default_value_t = 0)]
        count: u32,
        /// Page number
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Return every user for each reaction
        #[arg(long)]
        full: bool,
    },
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = true)]
struct TargetArgs {
    /// Channel of the message (with --timestamp)
    #[arg(long, requires = "timestamp", conflicts_with_all = ["file", "file_comment"])]
    channel: Option<String>,
    /// Timestamp of the message (with --channel)
    #[arg(long, requires = "channel")]
    timestamp: Option<String>,
    /// File ID
    #[arg(long, conflicts_with = "file_comment")]
    file: Option<String>,
    /// File comment ID
    #[arg(long)]
    file_comment: Option<String>,
}

impl TargetArgs {
    fn into_ref(self) -> miette::Result<ItemRef> {
        let item = match (self.channel, self.timestamp, self.file, self.file_comment) {
            (Some(channel), Some(ts), None, None) => ItemRef::message(channel, ts)?,
            (None, None, Some(file), None) => ItemRef::file(file)?,
            (None, None, None, Some(comment)) => ItemRef::file_comment(comment)?,
            _ => miette::bail!("give exactly one of --channel/--timestamp, --file, --file-comment"),
        };
        Ok(item)
    }
}

fn print_json(value: &impl Serialize) -> miette::Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let api = WebApi::builder()
        .client(reqwest::Client::new())
        .base(args.base_url)
        .token(args.token)
        .build();
    let reactions = ReactionService::new(api);

    match args.command {
        Command::Add { name, target } => {
            let item = target.into_ref()?;
            reactions
                .add_reaction(&AddReactionParams::new(name, item.clone()))
                .await?;
            println!("reacted to {item}");
        }
        Command::Remove { name, target } => {
            let item = target.into_ref()?;
            reactions
                .remove_reaction(&RemoveReactionParams::new(name, item.clone()))
                .await?;
            println!("removed reaction from {item}");
        }
        Command::Get { target, full } => {
            let params = GetReactionParams::new(target.into_ref()?).full(full);
            print_json(&reactions.get_reactions(&params).await?)?;
        }
        Command::List {
            user,
            count,
            page,
            full,
        } => {
            let params = ListReactionParams::new(user)
                .count(count)
                .page(page)
                .full(full);
            let page = reactions.list_reactions(&params).await?;
            print_json(&page)?;
            if let Some(paging) = page.paging.filter(PagingInfo::has_more) {
                eprintln!(
                    "page {} of {}, pass --page {} for more",
                    paging.page,
                    paging.pages,
                    paging.page + 1
                );
            }
        }
    }

    Ok(())
}
