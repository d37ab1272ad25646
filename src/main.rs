// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to a file by default, so the terminal stays readable)
// 3. Dispatch to the appropriate subcommand handler, or open the menu
// 4. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod menu; // src/menu.rs - interactive menu

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use std::fs::OpenOptions;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ScanArgs};
use nlink::config::CrawlConfig;
use nlink::crawl::{crawl_with, fetch_disallowed, Fetcher};
use nlink::net::{resolve_host, scan_ports, PortSpec, DEFAULT_SCAN_CONCURRENCY};
use nlink::store::{export_csv, LinkStore};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    match cli.command {
        None => menu::run().await?,
        Some(Commands::Scan(args)) => handle_scan(&args).await?,
        Some(Commands::Ports {
            ip,
            ports,
            timeout_ms,
            json,
        }) => handle_ports(&ip, &ports, Duration::from_millis(timeout_ms), json).await?,
        Some(Commands::Resolve { domain }) => handle_resolve(&domain).await,
        Some(Commands::Info) => show_info(),
    }

    Ok(0)
}

fn init_logging(log_file: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nlink=info"));

    if log_file == "-" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("failed to open log file {}", log_file))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    Ok(())
}

// JSON shape of a finished scan
#[derive(Serialize)]
struct ScanOutput<'a> {
    origin: &'a str,
    disallowed: &'a [String],
    links: Vec<&'a str>,
    pages_visited: usize,
    waves: usize,
    failures: usize,
}

// Handles the 'scan' subcommand (and menu option 1)
//
// The database handle is opened here and lives exactly as long as this
// crawl-and-report operation.
pub(crate) async fn handle_scan(args: &ScanArgs) -> Result<()> {
    let config = CrawlConfig::new(&args.url, args.max_depth, args.max_links)?
        .with_concurrency(args.concurrency)?
        .with_timeout(Duration::from_secs(args.timeout));

    let store = LinkStore::open(&args.db)
        .with_context(|| format!("failed to open database {}", args.db.display()))?;
    let fetcher = Fetcher::new(&config).context("failed to build HTTP client")?;

    if !args.json {
        println!(
            "{}",
            format!("🔍 Initiating scan at: {}", config.origin).yellow().bold()
        );
    }

    let disallowed = fetch_disallowed(&fetcher, &config.origin).await;
    if !args.json {
        println!("Disallowed paths from robots.txt: {:?}", disallowed);
        println!("{}", "🔗 Extracting links...".cyan().bold());
    }

    info!(
        origin = %config.origin,
        max_depth = config.max_depth,
        max_links = config.max_links,
        "starting crawl"
    );
    let report = crawl_with(&config, &fetcher, &store).await;
    info!(
        links = report.links.len(),
        visited = report.visited.len(),
        failures = report.failures,
        "crawl finished"
    );

    if args.json {
        let output = ScanOutput {
            origin: config.origin_str(),
            disallowed: &disallowed,
            links: report.sorted_links(),
            pages_visited: report.visited.len(),
            waves: report.waves,
            failures: report.failures,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        if report.links.is_empty() {
            println!("{}", "❌ No links found.".yellow().bold());
        } else {
            println!("{}", "✅ Links extracted successfully!".green().bold());
        }

        println!("{}", "🔗 All links:".cyan().bold());
        for (i, link) in report.sorted_links().iter().enumerate() {
            println!("{}. {}", i + 1, link);
        }

        println!();
        println!("📊 Summary:");
        println!("   🔗 Links found: {}", report.links.len());
        println!("   📄 Pages visited: {}", report.visited.len());
        println!("   🌊 Depth levels: {}", report.waves);
        println!("   ⚠️  Failed fetches: {}", report.failures);
    }

    if let Some(path) = &args.export {
        let records = store.read_all().context("failed to read stored links")?;
        let rows = export_csv(&records, path)
            .with_context(|| format!("failed to export to {}", path.display()))?;
        if !args.json {
            println!(
                "{}",
                format!("📥 Exported {} record(s) to {}", rows, path.display())
                    .green()
                    .bold()
            );
        }
    }

    Ok(())
}

// JSON shape of a port scan
#[derive(Serialize)]
struct PortOutput {
    port: u16,
    state: nlink::net::PortState,
}

// Handles the 'ports' subcommand (and menu option 3)
pub(crate) async fn handle_ports(
    ip: &str,
    ports: &str,
    connect_timeout: Duration,
    json: bool,
) -> Result<()> {
    let ip: IpAddr = ip
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not an IP address", ip))?;
    let spec = PortSpec::parse(ports)?;

    info!(%ip, ports = spec.ports().len(), "starting port scan");
    let results = scan_ports(ip, &spec, connect_timeout, DEFAULT_SCAN_CONCURRENCY).await;

    if json {
        let output: Vec<PortOutput> = results
            .into_iter()
            .map(|(port, state)| PortOutput { port, state })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", "Port Scan Results:".cyan().bold());
        for (port, state) in &results {
            println!("Port {}: {}", port, state);
        }
    }

    Ok(())
}

// Handles the 'resolve' subcommand (and menu option 4)
pub(crate) async fn handle_resolve(domain: &str) {
    match resolve_host(domain).await {
        Some(ip) => println!("The IP address for domain {} is {}", domain, ip),
        None => println!("Could not resolve IP address for domain {}", domain),
    }
}

pub(crate) fn show_info() {
    println!("Tool Information:");
    println!("nlink is a link extraction tool for a specific website.");
    println!("You can specify the scan depth and the number of links you want to extract.");
    println!("Results are stored in an SQLite database and can be exported to a CSV file.");
    println!("Additionally, you can scan ports and resolve IP addresses.");
}
