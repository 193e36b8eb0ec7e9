//! Ctrl-C handling for the interactive loop
//!
//! While a query runs, SIGINT only raises a flag. The session checks it between pipeline
//! stages, drops the query without saving it and returns to the prompt. The HTTP call
//! that is in flight when the signal arrives finishes first (bounded by its timeout).
//! At the prompt itself, SIGINT exits the process with status 130.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;

/// Exit status for a process ended by SIGINT
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    requested: Arc<AtomicBool>,
    idle: Arc<AtomicBool>,
}

impl Interrupt {
    /// A token that is only ever set through [`request`](Self::request)
    pub fn new() -> Self {
        Self::default()
    }

    /// A token wired to SIGINT
    #[cfg(unix)]
    pub fn install() -> Result<Self> {
        use anyhow::Context;
        use signal_hook::consts::SIGINT;
        use signal_hook::flag;

        let interrupt = Self::new();
        // Runs first: exits when the prompt is waiting for input
        flag::register_conditional_shutdown(
            SIGINT,
            INTERRUPTED_EXIT_CODE,
            Arc::clone(&interrupt.idle),
        )
        .context("Failed to install interrupt handler")?;
        flag::register(SIGINT, Arc::clone(&interrupt.requested))
            .context("Failed to install interrupt handler")?;
        Ok(interrupt)
    }

    /// Signal handling is left at the platform default
    #[cfg(not(unix))]
    pub fn install() -> Result<Self> {
        Ok(Self::new())
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Whether an interrupt arrived since the last call; clears the flag
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }

    /// Mark whether the process is waiting at the prompt
    pub fn set_idle(&self, idle: bool) {
        self.idle.store(idle, Ordering::SeqCst);
    }
}
