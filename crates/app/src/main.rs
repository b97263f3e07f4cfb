use std::path::{Path, PathBuf};
use std::process;

use neurograph_core::{generate, ClusterParams, Graph, GraphParams};
use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// One generation run: a seed plus the variant parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GenerationRequest {
    seed: f64,
    params: GraphParams,
}

struct CliArgs {
    request_path: Option<PathBuf>,
    seed: Option<f64>,
    save_path: Option<PathBuf>,
    print: bool,
}

fn main() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_ansi(false);
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::info!("neurograph starting");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let parsed = parse_args(args)?;

    let mut request = match &parsed.request_path {
        Some(path) => load_request(path)?,
        None => default_request(),
    };
    if let Some(seed) = parsed.seed {
        request.seed = seed;
    }

    let graph = generate(&request.params, request.seed).map_err(|err| err.to_string())?;
    tracing::info!(
        seed = request.seed,
        nodes = graph.node_count(),
        branches = graph.branches.len(),
        connections = graph.connections.len(),
        "generation complete"
    );

    if let Some(path) = &parsed.save_path {
        save_graph_json(&graph, path)?;
        tracing::info!("saved graph to {:?}", path);
    }

    if parsed.print {
        let json = serde_json::to_string_pretty(&graph).map_err(|err| err.to_string())?;
        println!("{json}");
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut request_path = None;
    let mut seed = None;
    let mut save_path = None;
    let mut print = false;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--request" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--request requires a path".to_string())?;
                request_path = Some(PathBuf::from(value));
            }
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                let parsed: f64 = value
                    .parse()
                    .map_err(|_| format!("invalid seed: {value}"))?;
                seed = Some(parsed);
            }
            "--save" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--save requires a path".to_string())?;
                save_path = Some(PathBuf::from(value));
            }
            "--print" => {
                print = true;
            }
            "--help" => {
                print_help();
                process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(CliArgs {
        request_path,
        seed,
        save_path,
        print,
    })
}

fn print_help() {
    println!(
        "Options:\n  --request <path>  generation request JSON\n  --seed <value>    override the request seed\n  --save <path>     write the generated graph as JSON\n  --print           print the generated graph as JSON"
    );
}

fn load_request(path: &Path) -> Result<GenerationRequest, String> {
    let data = std::fs::read(path).map_err(|err| err.to_string())?;
    serde_json::from_slice(&data).map_err(|err| err.to_string())
}

fn default_request() -> GenerationRequest {
    GenerationRequest {
        seed: 0.0,
        params: GraphParams::Cluster(ClusterParams::default()),
    }
}

fn save_graph_json(graph: &Graph, path: &Path) -> Result<(), String> {
    let data = serde_json::to_vec_pretty(graph).map_err(|err| err.to_string())?;
    std::fs::write(path, data).map_err(|err| err.to_string())
}
