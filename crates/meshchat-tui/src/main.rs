mod commands;
mod input;
mod pipeline;
mod render;
mod runtime;
mod scrollback;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;

use meshchat_core::directory::Directory;
use meshchat_core::logging;
use meshchat_core::transport::{self, ConnectionTarget};

use crate::render::CHROME_ROWS;
use crate::runtime::run_app;
use crate::ui::App;

/// Terminal chat client for a packet-radio mesh network.
#[derive(Parser)]
#[command(name = "meshchat", version, about)]
struct Cli {
    /// IPv4 address of a radio gateway, or a serial device path.
    target: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let target: ConnectionTarget = match cli.target.parse() {
        Ok(target) => target,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    logging::init();

    // Restore the terminal before any panic message prints.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ui::restore_terminal();
        original_hook(panic_info);
    }));

    eprintln!(
        "Fetching node list from radio via {} interface...",
        target.kind()
    );
    let mut radio = transport::connect(&target)
        .await
        .with_context(|| format!("failed to connect to {}", cli.target))?;

    let directory = Directory::load(radio.local_id(), radio.nodes(), radio.channels());
    let prompt = format!("{}@{}>", directory.local_display_name(), target);
    let mut packet_rx = radio
        .take_packet_rx()
        .context("transport already surrendered its packet receiver")?;

    let mut terminal = ui::init_terminal()?;
    let size = terminal.size()?;
    let capacity = size.height.saturating_sub(CHROME_ROWS).max(1) as usize;
    let mut app = App::new(directory, radio.handle(), prompt, capacity);

    let result = run_app(&mut terminal, &mut app, &mut packet_rx).await;

    radio.shutdown().await;
    ui::restore_terminal()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
    }

    Ok(())
}
