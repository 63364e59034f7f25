//! Host context handed to the table at construction.
//!
//! The table never reaches for a global "current map". Everything it needs
//! from its host (a clock for debouncing and the size of the surfaces it lives
//! in) comes through a [`HostContext`].

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Services the embedding application provides to the table.
pub trait HostContext {
    /// Current time, used to stamp store notifications and expire debounce timers.
    fn now(&self) -> Instant;

    /// Height in pixels of the host map viewport.
    fn viewport_height(&self) -> f32;

    /// Height available in the container panel, if the table lives in one.
    ///
    /// `None` means the table floats over the map viewport.
    fn container_height(&self) -> Option<f32> {
        None
    }
}

/// Host backed by the system clock and fixed surface metrics.
#[derive(Debug)]
pub struct SystemHost {
    viewport_height: Cell<f32>,
    container_height: Cell<Option<f32>>,
}

impl SystemHost {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            viewport_height: Cell::new(viewport_height),
            container_height: Cell::new(None),
        }
    }

    /// Updates the viewport height after a host window resize. Returns true
    /// if it changed.
    pub fn set_viewport_height(&self, height: f32) -> bool {
        self.viewport_height.replace(height) != height
    }

    pub fn set_container_height(&self, height: Option<f32>) -> bool {
        self.container_height.replace(height) != height
    }
}

impl HostContext for SystemHost {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height.get()
    }

    fn container_height(&self) -> Option<f32> {
        self.container_height.get()
    }
}

/// Host with a manually advanced clock, for deterministic tests and replays.
#[derive(Debug)]
pub struct ManualHost {
    origin: Instant,
    elapsed: Cell<Duration>,
    viewport_height: Cell<f32>,
    container_height: Cell<Option<f32>>,
}

impl ManualHost {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
            viewport_height: Cell::new(viewport_height),
            container_height: Cell::new(None),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set_viewport_height(&self, height: f32) {
        self.viewport_height.set(height);
    }

    pub fn set_container_height(&self, height: Option<f32>) {
        self.container_height.set(height);
    }
}

impl HostContext for ManualHost {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height.get()
    }

    fn container_height(&self) -> Option<f32> {
        self.container_height.get()
    }
}
