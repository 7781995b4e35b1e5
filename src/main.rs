use anyhow::Context;
use clap::{Parser, Subcommand};
use influxdb3_dedicated::infra::http_client::ReqwestHttp;
use influxdb3_dedicated::{logging, Config, Database, DedicatedClient, PartitionTemplate};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "influxdb3-dedicated")]
#[command(about = "InfluxDB Cloud Dedicated administration")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML file with [client] and [dedicated] tables; environment is used when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for rolling JSON log files
    #[arg(long, global = true, default_value = "logs")]
    log_dir: String,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the configured database (INFLUX_DATABASE) in the cluster
    CreateDatabase {
        /// Maximum number of tables (0 = default of 500)
        #[arg(long, default_value_t = 0)]
        max_tables: u64,
        /// Maximum columns per table (0 = default of 250)
        #[arg(long, default_value_t = 0)]
        max_columns_per_table: u64,
        /// Retention period in nanoseconds (0 = infinite)
        #[arg(long, default_value_t = 0)]
        retention_period: u64,
        /// Partition rule, as tag:NAME or bucket:NAME=COUNT (repeatable, order is kept)
        #[arg(long = "partition", value_parser = parse_partition)]
        partitions: Vec<PartitionTemplate>,
    },
}

fn parse_partition(raw: &str) -> Result<PartitionTemplate, String> {
    let (kind, rest) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected tag:NAME or bucket:NAME=COUNT, got '{}'", raw))?;
    match kind.trim() {
        "tag" => Ok(PartitionTemplate::tag(rest.trim())),
        "bucket" => {
            let (tag, count) = rest
                .split_once('=')
                .ok_or_else(|| format!("expected bucket:NAME=COUNT, got '{}'", raw))?;
            let count: u64 = count
                .trim()
                .parse()
                .map_err(|e| format!("invalid bucket count in '{}': {}", raw, e))?;
            Ok(PartitionTemplate::tag_bucket(tag.trim(), count))
        }
        other => Err(format!("unknown partition kind '{}' in '{}'", other, raw)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    let _guard = logging::init_logging(&cli.log_dir);

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::from_env().context("loading config from environment")?,
    };
    info!(dedicated = ?config.dedicated, "Configuration loaded");

    let http = reqwest::Client::builder()
        .user_agent(concat!("influxdb3-dedicated/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")?;
    let mut client =
        DedicatedClient::with_http(config.client.clone(), Arc::new(ReqwestHttp::with_client(http)));
    if let Some(secs) = cli.timeout_secs {
        client = client.with_timeout(Duration::from_secs(secs));
    }

    match cli.command {
        Commands::CreateDatabase {
            max_tables,
            max_columns_per_table,
            retention_period,
            partitions,
        } => {
            let mut db = Database::new()
                .max_tables(max_tables)
                .max_columns_per_table(max_columns_per_table)
                .retention_period(retention_period);
            for entry in partitions {
                db = db.partition(entry);
            }

            match client.create_database(&config.dedicated, Some(db)).await {
                Ok(created) => {
                    println!("Database '{}' created successfully", created.name);
                    println!("   Max tables: {}", created.max_tables);
                    println!("   Max columns per table: {}", created.max_columns_per_table);
                    println!("   Retention period (ns): {}", created.retention_period);
                    println!("   Partition template entries: {}", created.partition_template.len());
                }
                Err(e) => {
                    error!("Database creation failed: {}", e);
                    return Err(anyhow::Error::new(e).context("failed to create database"));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partition() {
        assert_eq!(parse_partition("tag:region").unwrap(), PartitionTemplate::tag("region"));
        assert_eq!(
            parse_partition("bucket: host = 10").unwrap(),
            PartitionTemplate::tag_bucket("host", 10)
        );
        assert!(parse_partition("region").is_err());
        assert!(parse_partition("bucket:host").is_err());
        assert!(parse_partition("bucket:host=many").is_err());
        assert!(parse_partition("range:host").is_err());
    }

    #[test]
    fn test_cli_keeps_partition_order() {
        let cli = Cli::try_parse_from([
            "influxdb3-dedicated",
            "create-database",
            "--max-tables",
            "1000",
            "--partition",
            "bucket:host=4",
            "--partition",
            "tag:region",
            "--partition",
            "bucket:rack=2",
        ])
        .unwrap();
        match cli.command {
            Commands::CreateDatabase { max_tables, partitions, .. } => {
                assert_eq!(max_tables, 1000);
                assert_eq!(
                    partitions,
                    vec![
                        PartitionTemplate::tag_bucket("host", 4),
                        PartitionTemplate::tag("region"),
                        PartitionTemplate::tag_bucket("rack", 2),
                    ]
                );
            }
        }
    }
}
