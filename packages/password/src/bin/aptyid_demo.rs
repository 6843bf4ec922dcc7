//! Demo: hash a password, print the record, then verify a right and a wrong guess.
//!
//! Stage timings are logged; run with `RUST_LOG=info` to see them.

use anyhow::{Context, Result};
use aptyid_common::{LoggingTransformer, Stopwatch};
use aptyid_password::{HashConfig, SaltedHasher, check};
use clap::Parser;

#[derive(Parser)]
#[command(name = "aptyid-demo")]
#[command(about = "Hash and verify a password with AptyID records")]
struct Cli {
    /// Password to hash
    #[arg(long, default_value = "correct horse")]
    password: String,

    /// Guess that should be rejected
    #[arg(long, default_value = "wrong horse")]
    wrong_password: String,

    /// Number of passes
    #[arg(long, default_value_t = aptyid_password::config::DEFAULT_TIME_COST)]
    time_cost: u32,

    /// Memory cost in KiB
    #[arg(long, default_value_t = aptyid_password::config::DEFAULT_MEMORY_COST)]
    memory_cost: u32,

    /// Number of lanes
    #[arg(long, default_value_t = aptyid_password::config::DEFAULT_PARALLELISM)]
    parallelism: u32,
}

fn main() -> Result<()> {
    LoggingTransformer::init();
    let cli = Cli::parse();

    let config = HashConfig::default()
        .with_time_cost(cli.time_cost)
        .with_memory_cost(cli.memory_cost)
        .with_parallelism(cli.parallelism);
    let hasher = SaltedHasher::new(config);

    LoggingTransformer::log_host_info(num_cpus::get(), config.parallelism);

    let total = Stopwatch::start("total");

    let (salt, _) = Stopwatch::time("generate_salt", || hasher.generate_salt());
    let salt = salt.inspect_err(|e| LoggingTransformer::log_password_error("generate_salt", e))?;

    let (record, _) = Stopwatch::time("encode", || hasher.encode(&cli.password, &salt));
    let record = record
        .inspect_err(|e| LoggingTransformer::log_password_error("encode", e))?
        .to_string();
    println!("{record}");

    let (matched, _) = Stopwatch::time("verify", || check(&record, &cli.password));
    let matched = matched.context("verifying the original password")?;
    LoggingTransformer::log_verification(&record, matched);
    println!("password verified: {matched}");

    total.finish(true);

    let rejected = !check(&record, &cli.wrong_password).context("verifying the wrong password")?;
    LoggingTransformer::log_verification(&record, !rejected);
    println!("wrong password rejected: {rejected}");

    Ok(())
}
