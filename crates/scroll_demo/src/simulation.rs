//! Scripted walk through both demo surfaces.
//!
//! The chat opens at its newest message, pages history in while the reader
//! scrolls up, then follows an incoming message. The feed pages at the bottom
//! and finishes with a pull-to-refresh.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use scroll_core::{LoadEdge, Msg, PullPhase, SurfaceViewModel};
use scroll_engine::{SurfaceDriver, SurfaceId, SurfaceRegistry};
use scroll_logging::{scroll_debug, scroll_info, scroll_warn};

use crate::config::DemoConfig;
use crate::list::{PagedLoader, SimulatedList, TopRefresh};

const CHAT: SurfaceId = 1;
const FEED: SurfaceId = 2;

/// One host frame.
const FRAME: Duration = Duration::from_millis(16);
const SCROLL_STEP: f64 = 300.0;
const MAX_SCROLL_STEPS: usize = 64;
const REFRESH_BATCH: usize = 5;
const PULL_SAMPLES: [f64; 4] = [30.0, 60.0, 90.0, 100.0];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub chat_rows: usize,
    pub feed_rows: usize,
    pub history_pages_loaded: usize,
    pub feed_pages_loaded: usize,
    /// The row under the viewport stayed put across every history prepend.
    pub anchor_held: bool,
    pub followed_new_message: bool,
    pub refreshed: bool,
}

pub async fn run(config: &DemoConfig) -> Result<Summary> {
    let latency = config.load_latency();
    let mut summary = Summary {
        anchor_held: true,
        ..Summary::default()
    };

    let chat = Arc::new(SimulatedList::new(
        "chat",
        config.row_height,
        config.viewport,
        config.initial_items,
    ));
    let feed = Arc::new(SimulatedList::new(
        "feed",
        config.row_height,
        config.viewport,
        config.initial_items,
    ));
    let history = Arc::new(PagedLoader::new(
        chat.clone(),
        config.history_pages,
        config.page_size,
        latency,
    ));
    let feed_pages = Arc::new(PagedLoader::new(
        feed.clone(),
        config.history_pages,
        config.page_size,
        latency,
    ));

    let mut registry = SurfaceRegistry::new();

    let mut chat_driver =
        SurfaceDriver::new(CHAT, config.chat.clone(), chat.clone()).with_loader(history.clone());
    chat_driver.attach(chat.layout());
    registry.mount(chat_driver)?;

    let mut feed_driver = SurfaceDriver::new(FEED, config.feed.clone(), feed.clone())
        .with_loader(feed_pages.clone())
        .with_refresh(Arc::new(TopRefresh::new(feed.clone(), REFRESH_BATCH, latency)));
    feed_driver.attach(feed.layout());
    registry.mount(feed_driver)?;

    let settle_margin = latency + config.chat.cooldown().max(config.feed.cooldown()) + FRAME * 4;

    // Chat: open at the newest message, then read backwards through history.
    chat.relayout();
    pump(&mut registry, FRAME * 2).await;
    scroll_info!(
        "chat opened at offset {} of content {}",
        chat.snapshot().offset(),
        chat.snapshot().content_extent()
    );

    for _ in 0..MAX_SCROLL_STEPS {
        if history.pages_left(LoadEdge::Start) == 0 {
            break;
        }
        chat.scroll_by(-SCROLL_STEP);
        pump(&mut registry, FRAME).await;
        if !view(&registry, CHAT)?.start_loading {
            continue;
        }

        let rows = chat.len();
        let pinned = chat.first_visible();
        pump(&mut registry, settle_margin).await;
        if chat.len() > rows {
            summary.history_pages_loaded += 1;
            let held = chat.first_visible() == pinned;
            summary.anchor_held &= held;
            scroll_info!(
                "chat history page {} loaded, offset now {}, anchor held: {}",
                summary.history_pages_loaded,
                chat.snapshot().offset(),
                held
            );
        }
    }

    // A new message lands while the reader sits at the bottom.
    driver_mut(&mut registry, CHAT)?.dispatch(Msg::ScrollToEnd { animated: false });
    pump(&mut registry, FRAME).await;
    chat.append_newer(1);
    pump(&mut registry, FRAME * 2).await;
    let snapshot = chat.snapshot();
    summary.followed_new_message = snapshot.offset() == snapshot.end_offset();
    if let Some(row) = chat.newest() {
        scroll_info!(
            "chat received {:?} at {}, followed: {}",
            row.text,
            row.sent_at.format("%H:%M:%S"),
            summary.followed_new_message
        );
    }

    // Feed: read forward until the pages run out.
    feed.relayout();
    pump(&mut registry, FRAME * 2).await;
    for _ in 0..MAX_SCROLL_STEPS {
        if feed_pages.pages_left(LoadEdge::End) == 0 {
            break;
        }
        feed.scroll_by(SCROLL_STEP);
        pump(&mut registry, FRAME).await;
        if !view(&registry, FEED)?.end_loading {
            continue;
        }

        let rows = feed.len();
        let offset = feed.snapshot().offset();
        pump(&mut registry, settle_margin).await;
        if feed.len() > rows {
            summary.feed_pages_loaded += 1;
            if feed.snapshot().offset() != offset {
                scroll_warn!("feed offset moved from {} while appending", offset);
            }
            scroll_info!("feed page {} appended", summary.feed_pages_loaded);
        }
    }

    // Pull-to-refresh at the top of the feed.
    feed.scroll_to(0.0);
    pump(&mut registry, FRAME).await;
    let rows = feed.len();
    for distance in PULL_SAMPLES {
        feed.pull(distance);
        pump(&mut registry, FRAME).await;
        let pull = view(&registry, FEED)?.pull;
        scroll_debug!(
            "pull {} -> {:?} progress={:.2}",
            distance,
            pull.phase,
            pull.progress
        );
    }
    feed.scroll_to(0.0);
    pump(&mut registry, settle_margin + config.feed.settle()).await;
    let pull = view(&registry, FEED)?.pull;
    summary.refreshed = feed.len() == rows + REFRESH_BATCH && pull.phase == PullPhase::Idle;
    scroll_info!(
        "feed refreshed: {} ({} new rows, pull phase {:?})",
        summary.refreshed,
        feed.len() - rows,
        pull.phase
    );

    registry.unmount(CHAT)?;
    registry.unmount(FEED)?;

    summary.chat_rows = chat.len();
    summary.feed_rows = feed.len();
    Ok(summary)
}

/// Lets spawned tasks run for `duration`, draining every inbox once per frame.
async fn pump(registry: &mut SurfaceRegistry, duration: Duration) {
    let deadline = tokio::time::Instant::now() + duration;
    loop {
        registry.process_pending();
        if tokio::time::Instant::now() >= deadline {
            break;
        }
        tokio::time::sleep(FRAME).await;
    }
    for id in [CHAT, FEED] {
        if let Some(driver) = registry.get_mut(id) {
            if driver.consume_dirty() {
                scroll_debug!("surface {} re-render: {:?}", id, driver.view());
            }
        }
    }
}

fn view(registry: &SurfaceRegistry, id: SurfaceId) -> Result<SurfaceViewModel> {
    registry
        .get(id)
        .map(SurfaceDriver::view)
        .with_context(|| format!("surface {} is not mounted", id))
}

fn driver_mut(registry: &mut SurfaceRegistry, id: SurfaceId) -> Result<&mut SurfaceDriver> {
    registry
        .get_mut(id)
        .with_context(|| format!("surface {} is not mounted", id))
}
