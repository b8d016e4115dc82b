//! Pokedex Moveset MCP Server
//!
//! A Model Context Protocol server using the official Rust SDK (rmcp)
//! that exposes the moveset legality search for LLM interaction.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use pokedex_movesets::movesets::request::DEFAULT_LEVEL;
use pokedex_movesets::report;
use pokedex_movesets::{CostTable, MovesetError, MovesetSearch, Pokedex, SearchRequest};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};

const DEFAULT_DATA_PATH: &str = "data/pokedex.ron";

#[derive(Debug, Clone)]
pub struct MovesetService {
    tool_router: ToolRouter<MovesetService>,
    pokedex: Arc<Pokedex>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CheckMovesetRequest {
    #[schemars(description = "Pokemon identifier, e.g. 'pikachu'")]
    pub pokemon: String,
    #[schemars(description = "One to four move identifiers, e.g. ['volt-tackle']")]
    pub moves: Vec<String>,
    #[schemars(description = "Version the moveset is wanted in, e.g. 'black' (default)")]
    pub version: Option<String>,
    #[schemars(description = "Level the Pokemon must be at or below (default 100)")]
    pub level: Option<u8>,
    #[schemars(description = "Versions that may not be used along the way")]
    #[serde(default)]
    pub exclude_versions: Vec<String>,
    #[schemars(description = "Pokemon whose families may not be used along the way")]
    #[serde(default)]
    pub exclude_pokemon: Vec<String>,
    #[schemars(description = "Cost overrides as KIND=VALUE, e.g. 'breed=250'")]
    #[serde(default)]
    pub costs: Vec<String>,
    #[schemars(description = "How many paths to return, cheapest first (default 1)")]
    pub alternatives: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LookupPokemonRequest {
    #[schemars(description = "Identifier of the Pokemon species to look up")]
    pub species_name: String,
}

fn internal_error(message: String) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(message),
        data: None,
    }
}

fn run_check(pokedex: &Pokedex, request: CheckMovesetRequest) -> Result<String, MovesetError> {
    let mut costs = CostTable::default();
    for entry in &request.costs {
        costs.apply_override_str(entry)?;
    }
    let version = request.version.as_deref().unwrap_or("black");
    let search_request =
        SearchRequest::from_identifiers(pokedex, &request.pokemon, version, &request.moves)?
            .excluding_identifiers(pokedex, &request.exclude_versions, &request.exclude_pokemon)?
            .with_level(request.level.unwrap_or(DEFAULT_LEVEL))
            .with_costs(costs);
    let search = MovesetSearch::new(pokedex, &search_request)?;
    let paths: Vec<_> = search
        .paths()
        .take(request.alternatives.unwrap_or(1).max(1))
        .collect();
    Ok(report::render_outcome(pokedex, &search_request, &paths))
}

#[tool_router]
impl MovesetService {
    pub fn new(pokedex: Pokedex) -> Self {
        Self {
            tool_router: Self::tool_router(),
            pokedex: Arc::new(pokedex),
        }
    }

    #[tool(description = "Check whether a Pokemon can know a set of moves in a game, and the cheapest way to get it")]
    async fn check_moveset(
        &self,
        Parameters(request): Parameters<CheckMovesetRequest>,
    ) -> Result<CallToolResult, McpError> {
        let pokedex = Arc::clone(&self.pokedex);
        let outcome = tokio::task::spawn_blocking(move || run_check(&pokedex, request))
            .await
            .map_err(|e| internal_error(format!("Search task failed: {}", e)))?;
        let text = match outcome {
            Ok(text) => text,
            Err(e) => format!("Error: {}", e),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Look up a Pokemon's family, egg groups and the games it appears in")]
    async fn lookup_pokemon(
        &self,
        Parameters(request): Parameters<LookupPokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = report::lookup_pokemon(&self.pokedex, &request.species_name);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "List every game version the search knows about")]
    async fn list_versions(&self) -> Result<CallToolResult, McpError> {
        let text = report::list_versions(&self.pokedex);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for MovesetService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    eprintln!("Pokedex Moveset MCP Server starting...");

    let data_path = std::env::var("MOVESETS_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));
    let pokedex = Pokedex::load(&data_path)?;
    log::info!("Loaded Pokedex data from {}", data_path.display());

    let service = MovesetService::new(pokedex);
    let transport = (stdin(), stdout());

    eprintln!("Starting MCP server with transport...");
    let server = service.serve(transport).await?;

    eprintln!("Server running, waiting for shutdown...");
    let quit_reason = server.waiting().await?;

    eprintln!("Pokedex Moveset MCP Server exiting: {:?}", quit_reason);
    Ok(())
}
