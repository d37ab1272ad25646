// src/menu.rs
// =============================================================================
// Interactive menu, shown when nlink is started without a subcommand.
//
// Every option asks for its inputs with dialoguer prompts and then calls
// the same handler the matching subcommand uses, so the menu and the CLI
// always behave the same.
//
// A failed action (bad URL, unreachable host, ...) prints the error and
// returns to the menu instead of quitting.
// =============================================================================

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::path::PathBuf;

use crate::cli::{ScanArgs, DEFAULT_CSV_PATH, DEFAULT_DB_PATH};
use nlink::config::{DEFAULT_CONCURRENCY, DEFAULT_MAX_DEPTH, DEFAULT_MAX_LINKS, DEFAULT_TIMEOUT_SECS};
use nlink::net::DEFAULT_CONNECT_TIMEOUT;

const OPTIONS: [&str; 6] = [
    "🔗 Start scan",
    "ℹ️  Tool information",
    "🚪 Port scanning",
    "🌐 Get IP address",
    "❓ How to use",
    "👋 Exit",
];

pub async fn run() -> Result<()> {
    print_banner();
    let theme = ColorfulTheme::default();

    loop {
        println!();
        let selection = Select::with_theme(&theme)
            .with_prompt("Choose an option")
            .items(&OPTIONS)
            .default(0)
            .interact()?;

        let outcome = match selection {
            0 => start_scan(&theme).await,
            1 => {
                crate::show_info();
                Ok(())
            }
            2 => port_scan(&theme).await,
            3 => lookup(&theme).await,
            4 => {
                show_help();
                Ok(())
            }
            _ => {
                println!("{}", "👋 Goodbye!".bright_blue());
                break;
            }
        };

        if let Err(e) = outcome {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
        }
    }

    Ok(())
}

async fn start_scan(theme: &ColorfulTheme) -> Result<()> {
    let url: String = Input::with_theme(theme)
        .with_prompt("Base URL to start extraction")
        .interact_text()?;
    let max_links: usize = Input::with_theme(theme)
        .with_prompt("Maximum number of links to extract")
        .default(DEFAULT_MAX_LINKS)
        .interact_text()?;
    let max_depth: usize = Input::with_theme(theme)
        .with_prompt("Depth of scan")
        .default(DEFAULT_MAX_DEPTH)
        .interact_text()?;
    let export = Confirm::with_theme(theme)
        .with_prompt("Export the results to CSV?")
        .default(false)
        .interact()?;

    let args = ScanArgs {
        url,
        max_links,
        max_depth,
        concurrency: DEFAULT_CONCURRENCY,
        timeout: DEFAULT_TIMEOUT_SECS,
        db: PathBuf::from(DEFAULT_DB_PATH),
        export: export.then(|| PathBuf::from(DEFAULT_CSV_PATH)),
        json: false,
    };

    crate::handle_scan(&args).await
}

async fn port_scan(theme: &ColorfulTheme) -> Result<()> {
    let ip: String = Input::with_theme(theme)
        .with_prompt("IP address to scan for open ports")
        .interact_text()?;
    let ports: String = Input::with_theme(theme)
        .with_prompt("Ports to scan (comma-separated) or 'all'")
        .default("all".to_string())
        .interact_text()?;

    crate::handle_ports(&ip, &ports, DEFAULT_CONNECT_TIMEOUT, false).await
}

async fn lookup(theme: &ColorfulTheme) -> Result<()> {
    let domain: String = Input::with_theme(theme)
        .with_prompt("Domain to resolve (without http:// or https://)")
        .interact_text()?;

    crate::handle_resolve(&domain).await;
    Ok(())
}

fn print_banner() {
    println!("{}", "*************************************************".red());
    println!("{}", "*              Welcome to nlink                 *".white().bold());
    println!("{}", "*        Internal link extraction, made simple  *".yellow().bold());
    println!("{}", "*************************************************".green());
}

fn show_help() {
    println!("How to use the tool:");
    println!("1. Choose 'Start scan' and provide the base URL, the number of links to extract, and the scan depth.");
    println!("2. After the scan is complete, the results can be exported to a CSV file.");
    println!("3. 'Port scanning' checks the given IP address for open TCP ports.");
    println!("4. 'Get IP address' resolves a domain to its IP address.");
    println!("5. Every option is also available as a subcommand: run 'nlink --help'.");
}
