//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::{Event, EventType};
use crate::layout::{LayoutStore, Section, SyncOutcome};
use crate::logging::LogLevel;
use crate::market::{MarketFeed, MarketUpdate};
use log::error;
use std::error::Error;

/// Applies a fetch event to the feed and, on success, to the saved layout.
///
/// Returns the layout event to report, if the layout changed or failed to save.
fn apply_event(feed: &mut MarketFeed, layout: &mut LayoutStore, event: &Event) -> Option<Event> {
    let update = event.update.clone()?;
    let loaded = matches!(update, MarketUpdate::Loaded(_));
    feed.apply(update);
    if !loaded {
        return None;
    }

    match layout.sync_with_market(feed.coins()) {
        Ok(SyncOutcome::Seeded(count)) => Some(Event::layout_with_level(
            format!("Card layout created with {} coins", count),
            EventType::Success,
            LogLevel::Info,
        )),
        Ok(SyncOutcome::QuotesRefreshed(count)) => Some(Event::layout_with_level(
            format!("Refreshed quotes on {} saved cards", count),
            EventType::Refresh,
            LogLevel::Debug,
        )),
        Ok(SyncOutcome::Skipped) => None,
        Err(e) => {
            error!("{}", e);
            Some(Event::layout_with_level(
                e.to_string(),
                EventType::Error,
                LogLevel::Error,
            ))
        }
    }
}

fn section_ids(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|s| s.id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runs the application in headless mode
///
/// This function handles:
/// 1. Console event logging
/// 2. Keeping the saved layout in step with fresh data
/// 3. Ctrl+C shutdown handling
///
/// # Arguments
/// * `session` - Session data from setup
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.environment);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let layout = session.layout.state();
    println!(
        "Layout: sections [{}], removed [{}], {} cards, {} theme",
        section_ids(&layout.sections),
        section_ids(&layout.removed_sections),
        layout.cards.len(),
        layout.theme
    );

    let mut shutdown_receiver = session.shutdown_sender.subscribe();
    let mut feed = MarketFeed::default();

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
                if let Some(layout_event) = apply_event(&mut feed, &mut session.layout, &event) {
                    if layout_event.should_display() {
                        println!("{}", layout_event);
                    }
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    // Wait for workers to finish
    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}
