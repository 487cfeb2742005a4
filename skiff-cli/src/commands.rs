//! CLI command implementations

use clap::Subcommand;
use skiff_core::SkiffConfig;
use skiff_core::probe;
use skiff_core::qbittorrent::QbClient;
use skiff_search::{Provider, SearchPayload, TorApiClient, flatten_results};
use skiff_web::handlers::utils::{format_bytes, format_eta, format_speed};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the aggregation server and browser UI
    Server {
        /// Port to bind to (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Start the torrent-file download proxy
    DlProxy {
        /// Port to bind to (overrides DL_PROXY_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Probe both egress routes once and print the result lines
    Check,
    /// Search TorAPI and print a result table
    Search {
        /// Title to search for
        query: String,
        /// Tracker to search (default: all)
        #[arg(short, long, default_value = "all")]
        provider: String,
    },
    /// List qBittorrent downloads
    Downloads,
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let mut config = SkiffConfig::from_env();

    match command {
        Commands::Server { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            println!("skiff web on http://0.0.0.0:{}", config.server.port);
            skiff_web::run_server(config).await?;
            Ok(())
        }
        Commands::DlProxy { port } => {
            if let Some(port) = port {
                config.server.proxy_port = port;
            }
            println!("dl-proxy on http://0.0.0.0:{}", config.server.proxy_port);
            skiff_proxy::run_server(config.proxy, config.server.proxy_port).await?;
            Ok(())
        }
        Commands::Check => run_check(&config).await,
        Commands::Search { query, provider } => run_search(&config, &query, &provider).await,
        Commands::Downloads => list_downloads(&config).await,
    }
}

/// Probe both egress routes once, as `/api/test` does.
async fn run_check(config: &SkiffConfig) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let result = probe::dual_check(&client, &config.probe).await;

    println!("{}", probe::format_line("VPN", &result.vpn));
    println!("{}", probe::format_line("NORMAL", &result.normal));
    Ok(())
}

/// Search TorAPI and print the flattened result table.
async fn run_search(config: &SkiffConfig, query: &str, provider: &str) -> anyhow::Result<()> {
    let provider: Provider = provider.parse()?;
    let client = TorApiClient::new(config.search.torapi_base.clone(), config.search.timeout);

    match client.search_title(query, provider).await? {
        SearchPayload::Json(data) => {
            let items = flatten_results(&data);
            if items.is_empty() {
                println!("No results for '{query}'.");
                return Ok(());
            }
            println!("{:<12} {:<60} {:>10} {:>6}", "Provider", "Name", "Size", "Seeds");
            println!("{:-<92}", "");
            for item in items {
                let name: String = item.name.chars().take(60).collect();
                println!(
                    "{:<12} {:<60} {:>10} {:>6}",
                    item.provider, name, item.size, item.seeds
                );
            }
        }
        SearchPayload::Raw(text) => {
            // TorAPI answered something that is not JSON; show it as-is
            println!("{text}");
        }
    }
    Ok(())
}

/// List qBittorrent downloads the way the UI table shows them.
async fn list_downloads(config: &SkiffConfig) -> anyhow::Result<()> {
    let client = QbClient::new(config.qbittorrent.clone());
    let torrents = client.torrents(None).await?;

    if torrents.is_empty() {
        println!("No active downloads");
        return Ok(());
    }

    for t in torrents {
        println!(
            "{:<44} {:>9} {:>6.1}% ↓{:>10} ↑{:>10} {:>8} {}",
            t.name.chars().take(44).collect::<String>(),
            format_bytes(t.total_size),
            t.progress * 100.0,
            format_speed(t.dlspeed),
            format_speed(t.upspeed),
            format_eta(t.eta),
            t.state,
        );
    }
    Ok(())
}
