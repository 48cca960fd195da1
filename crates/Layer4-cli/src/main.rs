//! ecssh CLI - Main entry point

mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use ecssh_foundation::strings::ENV_LOG;
use ecssh_foundation::EcsshConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ecssh - open a shell in a running Amazon ECS container
#[derive(Parser, Debug)]
#[command(name = "ecssh")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = AFTER_HELP)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// ECS cluster name or ARN
    cluster: Option<String>,

    /// Task definition name pattern
    task: Option<String>,

    /// Connect to the first available container
    #[arg(short, long)]
    force: bool,

    /// Show progress and debug logging
    #[arg(short, long)]
    verbose: bool,

    /// AWS region (overrides AWS_REGION)
    #[arg(long)]
    region: Option<String>,

    /// AWS named profile (overrides AWS_PROFILE)
    #[arg(long)]
    profile: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List clusters (default) or the running tasks of one cluster
    List {
        #[command(subcommand)]
        what: Option<ListCommand>,
    },
}

#[derive(Subcommand, Debug)]
enum ListCommand {
    /// List all clusters with their running tasks
    Clusters,
    /// List running tasks in a cluster
    Tasks {
        /// ECS cluster name or ARN
        cluster: String,
    },
}

const AFTER_HELP: &str = "\
With no arguments ecssh starts interactive mode (select cluster, task and container),
unless both ECSSH_CLUSTER_ID and ECSSH_TASK_NAME are set.

Environment variables:
  ECSSH_CLUSTER_ID    ECS cluster name or ARN
  ECSSH_TASK_NAME     Task definition name pattern to search for
  ECSSH_PLUGIN        Session Manager plugin executable
  ECSSH_SHELL         Command started in the container (default /bin/bash)
  ECSSH_LOG           Log filter (falls back to RUST_LOG)

Examples:
  ecssh                               # Interactive mode
  ecssh list                          # List all clusters
  ecssh list tasks my-cluster         # List tasks in cluster
  ecssh my-cluster web-app            # Connect to container
  ecssh -f my-cluster web-app         # Force mode";

impl Args {
    /// CLI values as the highest-priority config layer
    fn overrides(&self) -> EcsshConfig {
        EcsshConfig {
            cluster: self.cluster.clone(),
            task_name: self.task.clone(),
            region: self.region.clone(),
            profile: self.profile.clone(),
            ..EcsshConfig::default()
        }
    }

    fn has_positionals(&self) -> bool {
        self.cluster.is_some() || self.task.is_some()
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args).await {
        eprintln!("Error: {:#}", err);
        let code = err
            .downcast_ref::<ecssh_foundation::Error>()
            .map(|e| e.exit_code())
            .unwrap_or(1);
        std::process::exit(code);
    }
}

/// Stderr logging; `ECSSH_LOG` or `RUST_LOG` wins over the verbosity flag
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env(ENV_LOG)
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = EcsshConfig::load()?;
    config.merge(args.overrides());

    // A partial target on the command line is an error; an incomplete
    // environment falls back to interactive mode.
    let target = config
        .connect_target()
        .map(|(cluster, task)| (cluster.to_string(), task.to_string()));
    if args.command.is_none() && args.has_positionals() && target.is_none() {
        eprintln!("Error: Both CLUSTER_ID and TASK_NAME are required\n");
        Args::command().print_help()?;
        std::process::exit(1);
    }

    let plane = commands::client(&config).await?;

    match args.command {
        Some(Command::List { what }) => match what {
            None | Some(ListCommand::Clusters) => commands::list::clusters(&plane).await,
            Some(ListCommand::Tasks { cluster }) => commands::list::tasks(&plane, &cluster).await,
        },
        None => match target {
            Some((cluster, task)) => {
                let options = commands::connect::ConnectOptions {
                    force: args.force,
                    verbose: args.verbose,
                };
                commands::connect::run(&plane, &config, &cluster, &task, options).await
            }
            None => commands::interactive::run(&plane, &config).await,
        },
    }
}
