use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dhcpmgmt::helpers::to_hex_string_with_separator;
use dhcpmgmt::{Config, DhcpServer, Result};

#[derive(Parser)]
#[command(name = "dhcpmgmt")]
#[command(author, version, about = "Query a Windows DHCP server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Overrides `server_ip` from the configuration file.
    #[arg(short, long)]
    server: Option<Ipv4Addr>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    ListBindings,
    ShowConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let mut config = Config::load_or_create(&cli.config)?;
    if let Some(server) = cli.server {
        config.server_ip = server;
        config.validate()?;
    }

    match cli.command.unwrap_or(Commands::ListBindings) {
        Commands::ListBindings => {
            info!("Querying bindings with config: {:?}", cli.config);
            let server = DhcpServer::connect(&config)?;
            let bindings = server.bindings()?;

            if bindings.len() == 0 {
                println!("No bindings reported by {}.", server.address());
                return Ok(());
            }

            println!(
                "{:<32} {:<16} {:<16} {:<6} {:<9} {}",
                "Interface", "IP Address", "Subnet Mask", "Bound", "Read-only", "Interface ID"
            );
            println!("{}", "-".repeat(120));

            for binding in bindings {
                let guid = binding.interface_guid_id();
                let interface_id = if guid.is_nil() {
                    to_hex_string_with_separator(&binding.interface_id(), ':')
                } else {
                    guid.braced().to_string()
                };

                println!(
                    "{:<32} {:<16} {:<16} {:<6} {:<9} {}",
                    binding.interface_description().unwrap_or("-"),
                    binding.adapter_primary_ip_address().to_string(),
                    binding.adapter_subnet_address().to_string(),
                    binding.is_bound(),
                    binding.cant_modify(),
                    interface_id
                );
            }

            Ok(())
        }
        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
