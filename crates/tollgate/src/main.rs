use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tollgate_core::{Node, Task};
use tollgate_scheduler::{
    filter_nodes, no_suitable_nodes, FilterResult, PolicyConfig, PredicateSet,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "tollgate", about = "Tollgate task admission control")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which nodes may run a task
    Match {
        /// Task document (JSON if the extension is .json, YAML otherwise)
        #[arg(long)]
        task: PathBuf,
        /// Node snapshot list
        #[arg(long)]
        nodes: PathBuf,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Print the verdict for every node, not only the eligible ones
        #[arg(long)]
        explain: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the active predicates in evaluation order
    Predicates {
        #[command(flatten)]
        policy: PolicyArgs,
    },
}

#[derive(clap::Args)]
struct PolicyArgs {
    /// Policy file; the default predicates are used when omitted
    #[arg(long, env = "TOLLGATE_POLICY")]
    policy: Option<PathBuf>,
    /// Require nodes to carry this tag (repeatable)
    #[arg(long = "require-tag")]
    require_tags: Vec<String>,
}

impl PolicyArgs {
    fn predicate_set(&self) -> miette::Result<PredicateSet> {
        let mut config = match &self.policy {
            Some(path) => PolicyConfig::from_file(path)?,
            None => PolicyConfig::default(),
        };
        config.required_tags.extend(self.require_tags.iter().cloned());
        Ok(config.build()?)
    }
}

fn main() -> miette::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            task,
            nodes,
            policy,
            explain,
            json,
        } => run_match(&task, &nodes, &policy, explain, json),
        Commands::Predicates { policy } => {
            for name in policy.predicate_set()?.names() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

/// Load inputs, evaluate every node and print the result
fn run_match(
    task_path: &Path,
    nodes_path: &Path,
    policy: &PolicyArgs,
    explain: bool,
    json: bool,
) -> miette::Result<()> {
    let predicates = policy.predicate_set()?;
    let task: Task = load(task_path)?;
    let nodes: Vec<Node> = load(nodes_path)?;

    if let Err(e) = task.validate() {
        warn!("{}", e);
    }
    for node in &nodes {
        if let Err(e) = node.validate() {
            warn!("{}", e);
        }
    }

    info!(
        "Matching task {} against {} nodes with {:?}",
        task.display_name(),
        nodes.len(),
        predicates
    );

    let results = filter_nodes(&task, &nodes, &predicates);
    print_results(&results, explain, json)?;

    let eligible = results.iter().filter(|r| r.passed).count();
    if eligible == 0 {
        return Err(no_suitable_nodes(&task, &results).into());
    }
    info!("{} of {} nodes eligible", eligible, nodes.len());

    Ok(())
}

fn print_results(results: &[FilterResult], explain: bool, json: bool) -> miette::Result<()> {
    let shown: Vec<&FilterResult> = results.iter().filter(|r| explain || r.passed).collect();

    if json {
        println!("{}", tollgate_core::to_json_pretty(&shown)?);
    } else if explain {
        for result in shown {
            println!("{}", result);
        }
    } else {
        for result in shown {
            println!("{}", result.node_name);
        }
    }
    Ok(())
}

/// Read a JSON or YAML document, chosen by file extension
fn load<T: for<'de> serde::Deserialize<'de>>(path: &Path) -> miette::Result<T> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;

    let value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => tollgate_core::from_json(&data)?,
        _ => tollgate_core::from_yaml(&data)?,
    };
    Ok(value)
}
