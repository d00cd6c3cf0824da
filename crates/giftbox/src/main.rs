use clap::{Parser, Subcommand};
use giftbox::config;
use giftbox::gui::app::AppModel;
use giftbox::sys::{runtime, server};
use relm4::prelude::*;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "giftbox", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Write the default config file (if missing) and print its path
    #[arg(long)]
    write_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Open the gift in a running instance
    Open,
    /// Close the gift again in a running instance
    Reset,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    match cli.command {
        Some(Commands::Open) => send_command("open"),
        Some(Commands::Reset) => send_command("reset"),
        None => {
            run_app();
            Ok(())
        }
    }
}

fn run_app() {
    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.giftbox").with_args(Vec::new());

    app.run::<AppModel>((config, rx));
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let path = server::socket_path();
    let mut stream = UnixStream::connect(&path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to giftbox at {}: {}. Is giftbox running?",
            path.display(),
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
