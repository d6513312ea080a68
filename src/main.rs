//! SHAREBLOOM - Interactive Shell
//! Opens the shared filter described by the configuration and
//! serves add/check commands read from stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use sharebloom::config::Config;
use sharebloom::store::{BitStore, MemoryBitStore};
use sharebloom::{Result, SharedBloomFilter};

type Filter = SharedBloomFilter<Box<dyn BitStore>>;

#[derive(Parser)]
#[command(name = "sharebloom", about = "Bloom filter shared through a bit store")]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep the bit array in process memory instead of Redis.
    #[arg(long, default_value_t = false)]
    memory: bool,

    /// Override the bit array key.
    #[arg(long)]
    key: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("{}", err);
        eprintln!("[ERROR] {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(key) = cli.key {
        config = config.with_key(key);
    }
    let params = config.validate()?;

    let store = open_store(&config, cli.memory)?;
    let filter = SharedBloomFilter::with_params(store, config.store.key.clone(), params)?;

    println!();
    println!("  SHAREBLOOM shared Bloom filter");
    println!("  key '{}': {} bits, {} hashes", filter.key(), filter.num_bits(), filter.num_hashes());
    println!();
    println!("  Commands:");
    println!("    add <item>              - Add an item");
    println!("    check <item>            - Check whether an item may be present");
    println!("    batch-add <items...>    - Add several items");
    println!("    batch-check <items...>  - Check several items");
    println!("    info                    - Show filter parameters");
    println!("    stats                   - Show operation metrics");
    println!("    exit                    - Quit");
    println!();

    shell(&filter)
}

fn open_store(config: &Config, memory: bool) -> Result<Box<dyn BitStore>> {
    if memory {
        log::info!("Using in-memory bit store");
        return Ok(Box::new(MemoryBitStore::new()));
    }
    open_redis(config)
}

#[cfg(feature = "redis")]
fn open_redis(config: &Config) -> Result<Box<dyn BitStore>> {
    let store = sharebloom::store::RedisBitStore::connect(config.connection_info()?)?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "redis"))]
fn open_redis(_config: &Config) -> Result<Box<dyn BitStore>> {
    Err(sharebloom::BloomError::Config(
        "built without the `redis` feature; run with --memory".to_string(),
    ))
}

/// Everything after the command word, spacing inside the item preserved.
fn argument(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
        .trim_start()
        .split_once(char::is_whitespace)
        .map_or("", |(_, rest)| rest.trim_start())
}

fn shell(filter: &Filter) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("sharebloom> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "add" => {
                let item = argument(&line);
                if item.is_empty() {
                    println!("  Usage: add <item>");
                    continue;
                }
                match filter.add(item.as_bytes()) {
                    Ok(()) => println!("  OK"),
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "check" | "contains" => {
                let item = argument(&line);
                if item.is_empty() {
                    println!("  Usage: check <item>");
                    continue;
                }
                match filter.contains(item.as_bytes()) {
                    Ok(true) => println!("  possibly present"),
                    Ok(false) => println!("  absent"),
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "batch-add" => {
                if parts.len() < 2 {
                    println!("  Usage: batch-add <items...>");
                    continue;
                }
                match filter.add_all(&parts[1..]) {
                    Ok(()) => println!("  OK ({} items)", parts.len() - 1),
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "batch-check" | "batch-contains" => {
                if parts.len() < 2 {
                    println!("  Usage: batch-check <items...>");
                    continue;
                }
                match filter.contains_all(&parts[1..]) {
                    Ok(results) => {
                        for (item, present) in parts[1..].iter().zip(results) {
                            println!("  {} -> {}", item, present);
                        }
                    }
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "info" => {
                let params = filter.params();
                println!("  Key:              {}", filter.key());
                println!("  Expected items:   {}", params.expected_items);
                println!("  Target FP rate:   {}", params.false_positive_rate);
                println!("  Bits:             {}", params.num_bits);
                println!("  Hash functions:   {}", params.num_hashes);
            }
            "stats" => {
                println!("{}", filter.metrics().report());
            }
            "exit" | "quit" | "q" => {
                println!("  Bye.");
                break;
            }
            _ => {
                println!("  Unknown command: '{}'. Type 'exit' to quit.", parts[0]);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_keeps_inner_spacing() {
        assert_eq!(argument("add a  b\n"), "a  b");
        assert_eq!(argument("  check   tab\there \r\n"), "tab\there ");
    }

    #[test]
    fn test_argument_missing() {
        assert_eq!(argument("add\n"), "");
        assert_eq!(argument("add   \n"), "");
    }
}
