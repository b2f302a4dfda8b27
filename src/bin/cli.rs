//! SnapKV CLI
//!
//! Opens a store directory, runs one command, and closes it again so every
//! mutation lands in the snapshot.

use clap::{Parser, Subcommand};
use snapkv::{Config, KvStore, Record, SnapshotStore};
use tracing_subscriber::{fmt, EnvFilter};

/// SnapKV CLI
#[derive(Parser, Debug)]
#[command(name = "snapkv")]
#[command(about = "CLI for the SnapKV snapshot key-value store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./snapkv_data")]
    data_dir: String,

    /// Snapshot file name inside the data directory
    #[arg(long, default_value = snapkv::config::DEFAULT_SNAPSHOT_FILE)]
    snapshot_file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Put {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// List entries in ascending key order
    Scan {
        /// Inclusive lower bound
        #[arg(long, conflicts_with = "prefix")]
        from: Option<String>,

        /// Exclusive upper bound
        #[arg(long, conflicts_with = "prefix")]
        to: Option<String>,

        /// Only keys starting with this prefix
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Print entry count and approximate size
    Stats,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,snapkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .snapshot_file(&args.snapshot_file)
        .build();

    let store = match snapkv::open(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    run(&store, args.command);

    if let Err(e) = store.close() {
        tracing::error!("Failed to write snapshot: {}", e);
        std::process::exit(1);
    }
}

fn run(store: &SnapshotStore, command: Commands) {
    match command {
        Commands::Get { key } => match store.get(key.as_bytes()) {
            Some(value) => println!("{}", String::from_utf8_lossy(&value)),
            None => println!("(nil)"),
        },
        Commands::Put { key, value } => {
            store.upsert(Record::of(key, value));
            println!("OK");
        }
        Commands::Del { key } => {
            store.upsert(Record::tombstone(key));
            println!("OK");
        }
        Commands::Scan { from, to, prefix } => {
            let records: Vec<Record> = match prefix {
                Some(p) => store.scan_prefix(p.as_bytes()).collect(),
                None => store
                    .range(from.as_deref().map(str::as_bytes), to.as_deref().map(str::as_bytes))
                    .collect(),
            };
            for record in records {
                let (key, value) = record.into_parts();
                println!(
                    "{}\t{}",
                    String::from_utf8_lossy(&key),
                    String::from_utf8_lossy(value.as_deref().unwrap_or_default())
                );
            }
        }
        Commands::Stats => {
            println!("entries: {}", store.len());
            println!("bytes:   {}", store.size());
        }
    }
}
