//! Periodic refresh of the watched station board.
//!
//! The dashboard shows one station at a time. When the user picks a station,
//! `LiveBoard::watch` cancels the previous refresh cycle and starts a new one
//! that refetches trains and recomputes the board on a fixed interval. Stale
//! ticks from a superseded cycle are discarded, so cycles for different
//! stations never overlap.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use futures::future::{AbortHandle, Abortable};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::board::{Board, BoardConfig, compute_board};
use crate::digitraffic::DigitrafficError;
use crate::domain::{Station, StationCode};
use crate::source::DataSource;
use crate::stations::StationRegistry;

/// Source of "now" for board computation.
pub type Clock = fn() -> DateTime<FixedOffset>;

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Latest state of the watched board.
#[derive(Debug, Clone)]
pub struct LiveSnapshot {
    pub station: Station,
    pub board: Board,
    /// Message from the last failed refresh, cleared on success.
    pub last_error: Option<String>,
    /// Successful refreshes since the station was selected.
    pub refreshes: u64,
}

struct WatchTask {
    station: StationCode,
    abort: AbortHandle,
}

/// Owner of the repeating refresh task and the board it maintains.
pub struct LiveBoard {
    source: DataSource,
    stations: StationRegistry,
    config: BoardConfig,
    clock: Clock,
    generation: Arc<AtomicU64>,
    latest: Arc<RwLock<Option<LiveSnapshot>>>,
    task: Mutex<Option<WatchTask>>,
}

impl LiveBoard {
    pub fn new(source: DataSource, stations: StationRegistry, config: BoardConfig) -> Self {
        Self {
            source,
            stations,
            config,
            clock: local_now,
            generation: Arc::new(AtomicU64::new(0)),
            latest: Arc::new(RwLock::new(None)),
            task: Mutex::new(None),
        }
    }

    /// Replace the clock (for tests).
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Current time according to this board's clock.
    pub fn now(&self) -> DateTime<FixedOffset> {
        (self.clock)()
    }

    /// Fetch trains and compute a fresh board for `station`.
    pub async fn compute(&self, station: &StationCode) -> Result<Board, DigitrafficError> {
        refresh_board(&self.source, &self.stations, &self.config, self.clock, station).await
    }

    /// Start refreshing `station`, superseding any previous cycle.
    ///
    /// `initial` becomes the current snapshot immediately; the first refresh
    /// happens one interval later. Concurrent calls are serialized on the
    /// task slot, so the stored task always belongs to the newest cycle.
    pub async fn watch(&self, station: Station, initial: Board) {
        let mut task = self.task.lock().await;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        cancel(&mut task);

        *self.latest.write().await = Some(LiveSnapshot {
            station: station.clone(),
            board: initial,
            last_error: None,
            refreshes: 0,
        });

        let (abort, registration) = AbortHandle::new_pair();
        let cycle = RefreshCycle {
            source: self.source.clone(),
            stations: self.stations.clone(),
            config: self.config.clone(),
            clock: self.clock,
            generation,
            current_generation: self.generation.clone(),
            latest: self.latest.clone(),
            station: station.short_code.clone(),
        };
        tokio::spawn(Abortable::new(cycle.run(), registration));

        info!(station = %station.short_code, interval = ?self.config.refresh_interval, "watching station");

        *task = Some(WatchTask {
            station: station.short_code,
            abort,
        });
    }

    /// Stop refreshing and forget the current board.
    pub async fn stop(&self) {
        let mut task = self.task.lock().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        cancel(&mut task);
        *self.latest.write().await = None;
    }

    /// The station currently being refreshed.
    pub async fn watched(&self) -> Option<StationCode> {
        self.task.lock().await.as_ref().map(|t| t.station.clone())
    }

    /// Latest snapshot of the watched board.
    pub async fn snapshot(&self) -> Option<LiveSnapshot> {
        self.latest.read().await.clone()
    }
}

impl Drop for LiveBoard {
    fn drop(&mut self) {
        cancel(self.task.get_mut());
    }
}

fn cancel(task: &mut Option<WatchTask>) {
    if let Some(previous) = task.take() {
        debug!(station = %previous.station, "cancelling refresh cycle");
        previous.abort.abort();
    }
}

/// One station's refresh loop.
struct RefreshCycle {
    source: DataSource,
    stations: StationRegistry,
    config: BoardConfig,
    clock: Clock,
    generation: u64,
    current_generation: Arc<AtomicU64>,
    latest: Arc<RwLock<Option<LiveSnapshot>>>,
    station: StationCode,
}

impl RefreshCycle {
    async fn run(self) {
        let mut interval = tokio::time::interval(self.config.refresh_interval);
        interval.tick().await; // First tick is immediate, skip it

        loop {
            interval.tick().await;

            let result = refresh_board(
                &self.source,
                &self.stations,
                &self.config,
                self.clock,
                &self.station,
            )
            .await;

            let mut latest = self.latest.write().await;
            if self.current_generation.load(Ordering::SeqCst) != self.generation {
                return;
            }
            let Some(snapshot) = latest.as_mut() else {
                return;
            };

            match result {
                Ok(board) => {
                    debug!(station = %self.station, entries = board.entries.len(), "board refreshed");
                    snapshot.board = board;
                    snapshot.last_error = None;
                    snapshot.refreshes += 1;
                }
                Err(e) => {
                    warn!(station = %self.station, error = %e, "board refresh failed, keeping last board");
                    snapshot.last_error = Some(e.to_string());
                }
            }
        }
    }
}

async fn refresh_board(
    source: &DataSource,
    stations: &StationRegistry,
    config: &BoardConfig,
    clock: Clock,
    station: &StationCode,
) -> Result<Board, DigitrafficError> {
    let trains = source
        .fetch_live_trains(station, config.live_trains_query())
        .await?;
    let directory = stations.current().await;
    Ok(compute_board(clock(), station, &trains, &directory))
}
