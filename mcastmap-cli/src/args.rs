//! CLI argument parsing

use clap::Parser;
use std::net::Ipv4Addr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mcastmap")]
#[command(version, about = "Maps a multicast distribution tree across a router fleet", long_about = None)]
pub struct Cli {
    /// Seed router the topology crawl starts from (e.g. SEA-CORE)
    #[arg(short = 'i', long)]
    pub initial_router: String,

    /// Multicast source IP (e.g. 1.1.1.1)
    #[arg(short = 's', long)]
    pub source_ip: Ipv4Addr,

    /// Multicast group IP (e.g. 239.1.1.1)
    #[arg(short = 'g', long)]
    pub group_ip: Ipv4Addr,

    /// SSH username for the device fleet
    #[arg(short = 'u', long)]
    pub username: String,

    /// SSH password for the device fleet
    #[arg(short = 'p', long)]
    pub password: String,

    /// SSH port
    #[arg(long, default_value = "22")]
    pub port: u16,

    /// Per-device TCP connect timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value = "30")]
    pub connect_timeout: u64,

    /// Delay between the two traffic counter samples, in seconds
    #[arg(short = 't', long, value_name = "SECONDS", default_value = "5")]
    pub interval: u64,

    /// Maximum in-flight device sessions per stage
    #[arg(short = 'c', long, default_value = "8")]
    pub concurrency: usize,

    /// Directory the JSON map artifact is written to
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Verbose output (-v, -vv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
