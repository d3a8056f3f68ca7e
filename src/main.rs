mod error;
mod format;
mod git;
mod heat;
mod model;
mod navigate;
mod session;
mod store;
mod tree;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::error::HeatError;
use crate::model::Metric;
use crate::session::Session;
use crate::store::Store;

/// Per-file git metrics rendered as a drillable heat tree.
#[derive(Parser)]
#[command(name = "repoheat")]
#[command(about = "Analyze a git repo's per-file metrics and drill through them as a heat tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the dataset directory (default: platform data dir).
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect per-file metrics from a local git repo and save them.
    Analyze {
        /// Path to the repository worktree.
        #[arg(long)]
        repo: PathBuf,

        /// Dataset name (default: the repository directory name).
        #[arg(long)]
        name: Option<String>,

        /// Comma-separated exclude regexes applied to repo-relative paths.
        #[arg(long, default_value = "")]
        exclude: String,
    },
    /// List saved datasets.
    List,
    /// Print one level of the heat tree.
    Show {
        #[arg(long)]
        name: String,

        /// Color axis: changes | authors.
        #[arg(long, default_value = "changes")]
        metric: String,

        /// Drill path to start at, e.g. src/components.
        #[arg(long)]
        path: Option<String>,
    },
    /// Drill through a dataset interactively.
    Explore {
        #[arg(long)]
        name: String,

        /// Color axis: changes | authors.
        #[arg(long, default_value = "changes")]
        metric: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let store = match cli.data_dir {
        Some(dir) => Store::open(dir)?,
        None => Store::open_default()?,
    };

    match cli.command {
        Commands::Analyze {
            repo,
            name,
            exclude,
        } => cmd_analyze(&store, &repo, name, &exclude),
        Commands::List => cmd_list(&store),
        Commands::Show { name, metric, path } => cmd_show(&store, &name, &metric, path.as_deref()),
        Commands::Explore { name, metric } => cmd_explore(&store, &name, &metric),
    }
}

fn cmd_analyze(store: &Store, repo: &Path, name: Option<String>, exclude: &str) -> Result<()> {
    let compiled = git::compile_excludes(&format::parse_excludes(exclude))?;
    let name = name.unwrap_or_else(|| {
        repo.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("repo")
            .to_string()
    });

    let records = git::collect(repo, &compiled)?;
    if records.is_empty() {
        warn!(dataset = %name, "repository has no tracked files");
    }

    let path = store.save(&name, repo, &records)?;
    println!("analyzed {} files -> {}", records.len(), path.display());
    Ok(())
}

fn cmd_list(store: &Store) -> Result<()> {
    let infos = store.list()?;
    if infos.is_empty() {
        println!("no datasets saved yet (run `repoheat analyze` first)");
        return Ok(());
    }
    for info in infos {
        println!("{}  {}  {} files", info.name, info.saved_at, info.file_count);
    }
    Ok(())
}

fn load_session(store: &Store, name: &str, metric: &str) -> Result<Session> {
    let metric: Metric = metric.parse()?;
    let data = store.load(name)?;
    if data.files.is_empty() {
        return Err(HeatError::EmptyDataset(name.to_string()).into());
    }

    let mut session = Session::new();
    session.set_metric(metric);
    let token = session.begin_load();
    session.finish_load(token, name, Ok(data.files));
    Ok(session)
}

fn cmd_show(store: &Store, name: &str, metric: &str, path: Option<&str>) -> Result<()> {
    let mut session = load_session(store, name, metric)?;

    if let Some(p) = path {
        for seg in p.split('/').filter(|s| !s.is_empty()) {
            if !session.drill_down(seg)? {
                warn!(segment = seg, "not a directory here, stopping the drill");
                break;
            }
        }
    }

    if let Some(ds) = session.dataset() {
        println!("{}", format::summary_line(ds));
    }
    let view = session.view()?;
    print!("{}", format::render_view(&view, session.metric()));
    Ok(())
}

fn cmd_explore(store: &Store, name: &str, metric: &str) -> Result<()> {
    let mut session = load_session(store, name, metric)?;

    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        let view = session.view()?;
        print!("{}", format::render_view(&view, session.metric()));
        print!("> ");
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (cmd, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => {}
            "enter" if !arg.is_empty() => {
                if !session.drill_down(arg)? {
                    println!("'{}' is not a directory here", arg);
                }
            }
            "up" => {
                session.drill_up()?;
            }
            "top" => {
                session.jump_to(0)?;
            }
            "jump" => match arg.parse::<usize>() {
                Ok(depth) => session.jump_to(depth)?,
                Err(_) => println!("usage: jump <depth>"),
            },
            "metric" => match arg.parse::<Metric>() {
                Ok(m) => session.set_metric(m),
                Err(e) => println!("{}", e),
            },
            "quit" | "q" | "exit" => break,
            _ => println!(
                "commands: enter <name> | up | top | jump <depth> | metric <changes|authors> | quit"
            ),
        }
    }
    Ok(())
}
