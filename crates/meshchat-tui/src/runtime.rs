//! The session loop: draw, then wait for whichever source fires first.
//!
//! Terminal keys and inbound packets both funnel into this one task, so
//! session state needs no locking and a render can never observe a
//! half-applied update. The loop never blocks on the transport; an
//! arriving packet wakes the select and is on screen in the next draw.

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;

use meshchat_core::packet::PacketEvent;

use crate::input::handle_key;
use crate::render::render;
use crate::ui::{App, Tui};

pub(crate) async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    packet_rx: &mut UnboundedReceiver<PacketEvent>,
) -> Result<()> {
    let mut event_stream = EventStream::new();

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_key(app, key);
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                // Terminal input is gone; nothing left to drive the session.
                None => app.quit(),
            },

            Some(packet) = packet_rx.recv() => {
                app.ingest_packet(&packet);
            }

            // SIGINT takes the same graceful path as /q.
            _ = tokio::signal::ctrl_c() => app.quit(),
        }
    }

    Ok(())
}
