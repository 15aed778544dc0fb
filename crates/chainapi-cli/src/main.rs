//! chainapi CLI entrypoint
//! Parses command-line arguments and dispatches to the generator or the chain client.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use chainapi_core::{
    BodyParamPolicy, ChainClient, Config, RefPolicy, RpcMethod, chains,
    client::{placeholders, render_endpoint},
    generate::generate_from_config,
};
use clap::Parser;
use serde_json::{Map, Value as JsonValue};
use tracing_subscriber::EnvFilter;

/// Config file picked up when `--config` is not given
const DEFAULT_CONFIG: &str = "chainapi.yaml";
const DEFAULT_INPUT_DIR: &str = "inputs/swagger_info";
const DEFAULT_OUTPUT: &str = "src/types/methods/rest.ts";

#[derive(Parser)]
#[command(name = "chainapi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate the TypeScript REST catalogue from per-chain Swagger documents
    Generate {
        /// YAML config file (default: ./chainapi.yaml when present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory with one Swagger document per chain
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Output TypeScript file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Where body parameters are listed (query, body)
        #[arg(long)]
        body_params: Option<BodyParamPolicy>,
        /// How resolvable references are rendered (legacy, substitute)
        #[arg(long)]
        refs: Option<RefPolicy>,
        /// Only include these chains (repeatable)
        #[arg(long = "chain")]
        chains: Vec<String>,
    },
    /// Call an RPC endpoint of a built-in chain
    Rpc {
        /// Chain name, e.g. kyve
        #[arg(long)]
        chain: String,
        /// Named RPC method, e.g. netInfo or net_info
        #[arg(long, conflicts_with = "endpoint")]
        method: Option<RpcMethod>,
        /// Raw RPC endpoint, e.g. /status
        #[arg(long, required_unless_present = "method")]
        endpoint: Option<String>,
        /// Query parameter as key=value (repeatable)
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
    /// Call a REST endpoint of a built-in chain
    Rest {
        /// Chain name, e.g. evmos
        #[arg(long)]
        chain: String,
        /// REST endpoint; `{name}` placeholders are filled from matching params
        #[arg(long)]
        endpoint: String,
        /// Path or query parameter as key=value (repeatable)
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
        /// JSON body; sends a POST instead of a GET
        #[arg(long)]
        body: Option<String>,
    },
    /// List the built-in chains
    Chains,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

fn to_params(pairs: &[(String, String)]) -> Map<String, JsonValue> {
    pairs
        .iter()
        .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
        .collect()
}

async fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let default_path = PathBuf::from(DEFAULT_CONFIG);
    let path = match path {
        Some(path) => path,
        None if default_path.exists() => &default_path,
        None => return Ok(Config::new(DEFAULT_INPUT_DIR, DEFAULT_OUTPUT)),
    };
    tracing::debug!("Loading config from {}", path.display());
    Config::from_file(path)
        .await
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

fn print_json(value: &JsonValue) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout stays reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            config,
            input_dir,
            output,
            body_params,
            refs,
            chains,
        } => {
            let mut config = load_config(config.as_ref()).await?;

            // Flags override file values
            if let Some(input_dir) = input_dir {
                config.input_dir = input_dir;
            }
            if let Some(output) = output {
                config.output_path = output;
            }
            if let Some(body_params) = body_params {
                config.body_params = body_params;
            }
            if let Some(refs) = refs {
                config.refs = refs;
            }
            if !chains.is_empty() {
                config.chains = chains;
            }

            tracing::info!(
                "Swagger extraction starting from {}",
                config.input_dir.display()
            );
            let catalogue = generate_from_config(&config)
                .await
                .context("Failed to generate REST catalogue")?;
            tracing::info!(
                "Wrote {} operations for {} chains to {}",
                catalogue.len(),
                catalogue.chain_names().len(),
                config.output_path.display()
            );
        }
        Commands::Rpc {
            chain,
            method,
            endpoint,
            params,
        } => {
            let info = chains::find(&chain)?.clone();
            let client = ChainClient::new(info)?;
            let params = JsonValue::Object(to_params(&params));
            let (label, result) = match (method, endpoint) {
                (Some(method), _) => (method.to_string(), client.rpc_call(method, &params).await),
                (None, Some(endpoint)) => {
                    let result = client.rpc_request(&endpoint, &params).await;
                    (endpoint, result)
                }
                (None, None) => anyhow::bail!("either --method or --endpoint is required"),
            };
            let result =
                result.with_context(|| format!("RPC request {} on {} failed", label, chain))?;
            print_json(&result)?;
        }
        Commands::Rest {
            chain,
            endpoint,
            params,
            body,
        } => {
            let info = chains::find(&chain)?.clone();
            let client = ChainClient::new(info)?;

            let mut query = to_params(&params);
            let mut path_params = Map::new();
            for name in placeholders(&endpoint) {
                if let Some(value) = query.remove(name) {
                    path_params.insert(name.to_string(), value);
                }
            }
            let path = render_endpoint(&endpoint, &path_params)?;
            let query = JsonValue::Object(query);

            let response = match body {
                Some(body) => {
                    let body: JsonValue =
                        serde_json::from_str(&body).context("--body is not valid JSON")?;
                    client.rest_post(&path, &query, &body).await
                }
                None => client.rest_get(&path, &query).await,
            }
            .with_context(|| format!("REST request {} on {} failed", path, chain))?;
            print_json(&response)?;
        }
        Commands::Chains => {
            for info in chains::all() {
                println!(
                    "{}\trpc={}\trest={}\tprefix={}\tdecimals={}",
                    info.name, info.urls.rpc, info.urls.rest, info.prefixes.prefix, info.decimals
                );
            }
        }
    }
    Ok(())
}
