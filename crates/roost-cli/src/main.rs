use std::io::Read;
use std::path::Path;

use roost_core::{PatchOptions, collect_embeds, patch};
use roost_graph::{Element, ElementGraph};
use serde::Serialize;
use tracing::info;

mod vault;

use vault::Vault;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Graph(roost_graph::Error),
    Patch(roost_core::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) => write!(f, "{err}"),
            CliError::Patch(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<roost_graph::Error> for CliError {
    fn from(value: roost_graph::Error) -> Self {
        Self::Graph(value)
    }
}

impl From<roost_core::Error> for CliError {
    fn from(value: roost_core::Error) -> Self {
        Self::Patch(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Embeds,
    Graph,
    #[default]
    Patch,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    vault: Option<String>,
    graph_input: Option<String>,
    pretty: bool,
    strict: bool,
    verbose: bool,
    out: Option<String>,
}

fn usage() -> &'static str {
    "roost-cli\n\
\n\
USAGE:\n\
  roost-cli [patch] [--pretty] [--strict] [--graph <elements.json>|-] [--out <path>] [--verbose] <vault-dir>\n\
  roost-cli graph [--pretty] [--out <path>] [--verbose] <vault-dir>\n\
  roost-cli embeds [--pretty] [--out <path>] [--verbose] <vault-dir>\n\
\n\
NOTES:\n\
  - patch rewrites the vault's link graph so embedded documents become child nodes nested under each embedding document.\n\
  - Without --graph, patch builds the flat link graph from the vault first (same as the graph command).\n\
  - --graph reads a cytoscape-style element list from a file, or from stdin with '-'.\n\
  - Output is JSON on stdout; --out writes it to a file instead.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "embeds" => args.command = Command::Embeds,
            "graph" => args.command = Command::Graph,
            "patch" => args.command = Command::Patch,
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--verbose" => args.verbose = true,
            "--graph" => {
                let Some(input) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.graph_input = Some(input.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.vault.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.vault = Some(rest.clone());
                }
                while it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.vault.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.vault = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: &str) -> Result<String, CliError> {
    match input {
        "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        path => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            if pretty {
                serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
            } else {
                serde_json::to_writer(std::io::stdout().lock(), value)?;
            }
            Ok(())
        }
        Some(path) => {
            let text = if pretty {
                serde_json::to_string_pretty(value)?
            } else {
                serde_json::to_string(value)?
            };
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(vault_dir) = args.vault.as_deref() else {
        return Err(CliError::Usage(usage()));
    };
    let vault = Vault::scan(Path::new(vault_dir))?;

    match args.command {
        Command::Embeds => {
            let embeds = collect_embeds(vault.metadata());
            write_json(&embeds, args.pretty, args.out.as_deref())
        }
        Command::Graph => {
            let graph = vault.flat_graph()?;
            write_json(&graph.to_elements(), args.pretty, args.out.as_deref())
        }
        Command::Patch => {
            let mut graph = match args.graph_input.as_deref() {
                Some(input) => {
                    let text = read_input(input)?;
                    let elements: Vec<Element> = serde_json::from_str(&text)?;
                    ElementGraph::from_elements(elements)?
                }
                None => vault.flat_graph()?,
            };

            let embeds = collect_embeds(vault.metadata());
            let options = if args.strict {
                PatchOptions::strict()
            } else {
                PatchOptions::lenient()
            };
            let report = patch::run(&mut graph, &embeds, &options)?;
            info!(
                removed_nodes = report.removed_nodes,
                added_nodes = report.added_nodes,
                added_edges = report.added_edges,
                warnings = report.warnings.len(),
                "patched graph"
            );

            write_json(&graph.to_elements(), args.pretty, args.out.as_deref())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
