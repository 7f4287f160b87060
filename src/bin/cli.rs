//! sectorfs CLI
//!
//! Session front-end for the driver: copies local files onto the remote
//! disk and reports cache metrics. All failures surface here; the driver
//! itself only returns them.

use std::fs;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use sectorfs::{Config, Driver};

/// sectorfs CLI
#[derive(Parser, Debug)]
#[command(name = "sectorfs-cli")]
#[command(about = "Client session for the sectorfs remote storage driver")]
struct Args {
    /// Storage server address
    #[arg(short, long, default_value = sectorfs::config::DEFAULT_SERVER_ADDR)]
    server: String,

    /// Storage server port
    #[arg(short, long, default_value_t = sectorfs::config::DEFAULT_SERVER_PORT)]
    port: u16,

    /// Number of sector cache lines
    #[arg(long, default_value_t = sectorfs::config::DEFAULT_CACHE_LINES)]
    cache_lines: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy a local file onto the remote disk
    Put {
        /// Local file to copy from
        local: String,

        /// Remote path to create
        remote: String,

        /// Read the file back afterwards and compare
        #[arg(long)]
        verify: bool,
    },

    /// Copy a remote file into a local file
    Get {
        /// Remote path to read
        remote: String,

        /// Local file to write
        local: String,
    },

    /// Print a remote file's length and sector count
    Stat {
        /// Remote path to inspect
        remote: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sectorfs-cli: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> sectorfs::Result<()> {
    let config = Config::builder()
        .server_addr(args.server)
        .server_port(args.port)
        .cache_lines(args.cache_lines)
        .build();

    let mut driver = Driver::new(config);

    match args.command {
        Commands::Put {
            local,
            remote,
            verify,
        } => {
            let data = fs::read(&local)?;

            driver.mount()?;
            let handle = driver.open(&remote)?;

            let mut written = 0;
            while written < data.len() {
                written += driver.write(handle, &data[written..])?;
            }
            println!("wrote {} bytes to {}", written, remote);

            if verify {
                driver.seek(handle, 0)?;
                let mut readback = vec![0u8; data.len()];
                let mut copied = 0;
                while copied < readback.len() {
                    let n = driver.read(handle, &mut readback[copied..])?;
                    if n == 0 {
                        break;
                    }
                    copied += n;
                }
                if readback[..copied] == data[..] {
                    println!("verify ok ({} bytes)", copied);
                } else {
                    eprintln!("verify FAILED: read-back differs from source");
                }
            }

            driver.close(handle)?;
            driver.unmount()?;

            println!("cache: {}", driver.cache_stats());
            println!("sectors used: {}", driver.sectors_used());
        }

        Commands::Get { remote, local } => {
            driver.mount()?;
            let handle = driver.open(&remote)?;

            driver.seek(handle, 0)?;
            let len = driver.file_len(handle)? as usize;
            let mut data = vec![0u8; len];
            let mut copied = 0;
            while copied < len {
                let n = driver.read(handle, &mut data[copied..])?;
                if n == 0 {
                    break;
                }
                copied += n;
            }
            data.truncate(copied);
            fs::write(&local, &data)?;
            println!("read {} bytes from {} into {}", copied, remote, local);

            driver.close(handle)?;
            driver.unmount()?;

            println!("cache: {}", driver.cache_stats());
        }

        Commands::Stat { remote } => {
            driver.mount()?;
            let handle = driver.open(&remote)?;

            println!("{}:", remote);
            println!("  length:  {} bytes", driver.file_len(handle)?);
            println!("  sectors: {}", driver.file_sector_count(handle)?);

            driver.close(handle)?;
            driver.unmount()?;
        }
    }

    Ok(())
}
