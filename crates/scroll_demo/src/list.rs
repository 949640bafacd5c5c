use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use scroll_core::{GeometrySnapshot, LoadEdge};
use scroll_engine::{GeometryBroadcaster, Loader, RefreshAction, ScrollSurface};
use scroll_logging::{scroll_debug, scroll_info};

#[derive(Debug, Clone)]
pub struct Row {
    pub id: i64,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

struct ListInner {
    rows: VecDeque<Row>,
    offset: f64,
    oldest_id: i64,
    newest_id: i64,
}

/// In-memory stand-in for a host list view with fixed-height rows.
///
/// Every mutation re-runs "layout" and emits a geometry snapshot. The row lock
/// is always released before emitting, since listeners may call back into
/// [`ScrollSurface::set_offset`].
pub struct SimulatedList {
    name: &'static str,
    row_height: f64,
    viewport: f64,
    inner: Mutex<ListInner>,
    layout: GeometryBroadcaster,
}

impl SimulatedList {
    pub fn new(name: &'static str, row_height: f64, viewport: f64, initial_rows: usize) -> Self {
        let list = Self {
            name,
            row_height,
            viewport,
            inner: Mutex::new(ListInner {
                rows: VecDeque::new(),
                offset: 0.0,
                oldest_id: 1,
                newest_id: 0,
            }),
            layout: GeometryBroadcaster::new(),
        };
        list.lock().push_newer(name, initial_rows);
        list
    }

    pub fn layout(&self) -> &GeometryBroadcaster {
        &self.layout
    }

    pub fn snapshot(&self) -> GeometrySnapshot {
        let inner = self.lock();
        self.snapshot_of(&inner)
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn newest(&self) -> Option<Row> {
        self.lock().rows.back().cloned()
    }

    /// Id of the row under the leading edge of the viewport.
    pub fn first_visible(&self) -> Option<i64> {
        let inner = self.lock();
        let index = (inner.offset.max(0.0) / self.row_height).floor() as usize;
        inner.rows.get(index).map(|row| row.id)
    }

    /// Re-emits the current geometry, as a host does after its first layout.
    pub fn relayout(&self) {
        let snapshot = self.snapshot();
        self.layout.emit(snapshot);
    }

    /// User drag, clamped to the scrollable range.
    pub fn scroll_to(&self, offset: f64) {
        self.move_to(|end| offset.clamp(0.0, end));
    }

    /// Drags past the leading edge by `distance`, as a pull gesture does.
    pub fn pull(&self, distance: f64) {
        self.move_to(|_| -distance.max(0.0));
    }

    pub fn scroll_by(&self, delta: f64) {
        let current = self.snapshot().offset();
        self.scroll_to(current + delta);
    }

    /// Inserts older rows above the current ones without touching the offset.
    pub fn prepend_older(&self, count: usize) {
        let snapshot = {
            let mut inner = self.lock();
            inner.push_older(self.name, count);
            self.snapshot_of(&inner)
        };
        scroll_debug!("{}: prepended {} rows", self.name, count);
        self.layout.emit(snapshot);
    }

    pub fn append_newer(&self, count: usize) {
        let snapshot = {
            let mut inner = self.lock();
            inner.push_newer(self.name, count);
            self.snapshot_of(&inner)
        };
        scroll_debug!("{}: appended {} rows", self.name, count);
        self.layout.emit(snapshot);
    }

    fn move_to(&self, target: impl FnOnce(f64) -> f64) {
        let snapshot = {
            let mut inner = self.lock();
            let end = self.snapshot_of(&inner).end_offset();
            inner.offset = target(end);
            self.snapshot_of(&inner)
        };
        self.layout.emit(snapshot);
    }

    fn snapshot_of(&self, inner: &ListInner) -> GeometrySnapshot {
        GeometrySnapshot::new(
            inner.offset,
            inner.rows.len() as f64 * self.row_height,
            self.viewport,
        )
    }

    fn lock(&self) -> MutexGuard<'_, ListInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ListInner {
    fn push_older(&mut self, name: &str, count: usize) {
        for _ in 0..count {
            self.oldest_id -= 1;
            self.rows.push_front(Row {
                id: self.oldest_id,
                text: format!("{} #{}", name, self.oldest_id),
                sent_at: Utc::now(),
            });
        }
    }

    fn push_newer(&mut self, name: &str, count: usize) {
        for _ in 0..count {
            self.newest_id += 1;
            self.rows.push_back(Row {
                id: self.newest_id,
                text: format!("{} #{}", name, self.newest_id),
                sent_at: Utc::now(),
            });
        }
    }
}

impl ScrollSurface for SimulatedList {
    fn set_offset(&self, value: f64, animated: bool) {
        // Animation is instantaneous here; the host would interpolate.
        let snapshot = {
            let mut inner = self.lock();
            inner.offset = value;
            self.snapshot_of(&inner)
        };
        scroll_debug!("{}: offset -> {} (animated={})", self.name, value, animated);
        self.layout.emit(snapshot);
    }
}

/// Paged loader over a [`SimulatedList`] with a fixed number of pages per edge.
pub struct PagedLoader {
    list: Arc<SimulatedList>,
    page_size: usize,
    latency: Duration,
    pages_left: [AtomicUsize; 2],
}

impl PagedLoader {
    pub fn new(list: Arc<SimulatedList>, pages: usize, page_size: usize, latency: Duration) -> Self {
        Self {
            list,
            page_size,
            latency,
            pages_left: [AtomicUsize::new(pages), AtomicUsize::new(pages)],
        }
    }

    pub fn pages_left(&self, edge: LoadEdge) -> usize {
        self.pages_left[slot(edge)].load(Ordering::SeqCst)
    }
}

fn slot(edge: LoadEdge) -> usize {
    match edge {
        LoadEdge::Start => 0,
        LoadEdge::End => 1,
    }
}

#[async_trait::async_trait]
impl Loader for PagedLoader {
    async fn load(&self, edge: LoadEdge) {
        tokio::time::sleep(self.latency).await;
        let remaining = &self.pages_left[slot(edge)];
        let took_page = remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if !took_page {
            scroll_info!("no more pages at {:?}", edge);
            return;
        }
        match edge {
            LoadEdge::Start => self.list.prepend_older(self.page_size),
            LoadEdge::End => self.list.append_newer(self.page_size),
        }
    }
}

/// Pull-to-refresh action that inserts a batch of fresh rows at the top.
pub struct TopRefresh {
    list: Arc<SimulatedList>,
    batch: usize,
    latency: Duration,
}

impl TopRefresh {
    pub fn new(list: Arc<SimulatedList>, batch: usize, latency: Duration) -> Self {
        Self {
            list,
            batch,
            latency,
        }
    }
}

#[async_trait::async_trait]
impl RefreshAction for TopRefresh {
    async fn refresh(&self) {
        tokio::time::sleep(self.latency).await;
        self.list.prepend_older(self.batch);
    }
}
