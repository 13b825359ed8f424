use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use transit_router::config::load_config;
use transit_router::location::{Location, Scope};
use transit_router::observability;
use transit_router::routing::RouteTable;

#[derive(Parser)]
#[command(name = "route-check")]
#[command(about = "Resolve URLs against a route table", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the route, params and rest a URL resolves to
    Match {
        /// URL or path, e.g. /profile/42?tab=posts
        url: String,
    },
    /// List declared routes in match order
    Routes,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    observability::init(&config.observability);

    let table = RouteTable::from_config(&config.routes);

    let output = match cli.command {
        Commands::Match { url } => {
            let scope = Scope::from_config(&config.location)?;
            resolve(&table, scope.as_ref(), &url)
        }
        Commands::Routes => {
            let routes: Vec<Value> = table
                .routes()
                .iter()
                .map(|r| {
                    json!({
                        "pattern": r.pattern().as_str(),
                        "component": r.component(),
                        "default": r.is_default(),
                        "params": r.pattern().param_names().collect::<Vec<_>>(),
                    })
                })
                .collect();
            json!({ "routes": routes })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn resolve(table: &RouteTable<String>, scope: Option<&Scope>, url: &str) -> Value {
    let location = Location::parse(url);
    let in_scope = scope.map_or(true, |s| s.allows(url));

    match table.select(location.path()) {
        Some(m) => json!({
            "url": location.url(),
            "path": location.path(),
            "in_scope": in_scope,
            "route": m.route.pattern().as_str(),
            "component": m.route.component(),
            "fallback": m.fallback,
            "params": m.result.params,
            "rest": m.result.rest,
            "query": location.query(),
        }),
        None => json!({
            "url": location.url(),
            "path": location.path(),
            "in_scope": in_scope,
            "route": Value::Null,
        }),
    }
}
