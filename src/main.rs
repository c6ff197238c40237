use anyhow::Context;
use plotarm::console::{Command, Flow, Session};
use plotarm::{init_logging, Config, BUILD_DATE, VERSION};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("PlotArm {} (built {})", VERSION, BUILD_DATE);

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load_or_default(config_path.as_deref())
        .context("Failed to load configuration")?;
    let mut session = Session::new(config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let result = Command::parse(&line).and_then(|command| session.handle(command, &mut stdout));
        match result {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                tracing::warn!("Command failed: {:#}", e);
                writeln!(stdout, "Error: {:#}", e)?;
            }
        }
        stdout.flush()?;
    }

    Ok(())
}
