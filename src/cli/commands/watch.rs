use super::build_tracker;
use crate::config::Config;
use crate::core::{HostOptions, host};
use crate::errors::AppResult;
use crate::tray::{TerminalTray, TrayEvent};
use crate::ui::messages::{info, warning};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const HELP: &str = "Commands: [enter]/t toggle, i in, o out, r refresh, q quit";

/// Handle the `watch` command: terminal tray driven by keyboard lines.
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let mut tracker = build_tracker(cfg)?;
    let (events, events_rx) = mpsc::channel(16);

    info(HELP);

    // Ctrl-C → quit; weak so it never keeps the channel open on its own
    let interrupt = events.downgrade();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            if let Some(events) = interrupt.upgrade() {
                let _ = events.send(TrayEvent::Quit).await;
            }
        }
    });

    // keyboard → tray events; EOF quits
    let keyboard = events;
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match TrayEvent::parse(&line) {
                Some(ev) => {
                    if keyboard.send(ev).await.is_err() {
                        break;
                    }
                }
                None => warning(format!("Unknown command '{}'. {HELP}", line.trim())),
            }
        }
        let _ = keyboard.send(TrayEvent::Quit).await;
    });

    host::run(
        &mut tracker,
        events_rx,
        TerminalTray::new("today"),
        HostOptions::from(cfg),
    )
    .await?;

    println!();
    Ok(())
}
