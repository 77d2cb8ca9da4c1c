//! Navigation out of the introduction screen
//!
//! The "Next" action is independent of playback: narration does not have
//! to finish, or even start, before the user moves on.

use crate::Result;
use log::info;

/// Receives the "advance to next screen" signal
pub trait Navigator {
    fn advance(&mut self) -> Result<()>;
}

/// Navigator that records a fixed route for the host to follow
pub struct RouteNavigator {
    route: String,
    pending: Option<String>,
}

impl RouteNavigator {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            pending: None,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Route requested by the last `advance`, consumed by the host
    pub fn take_pending(&mut self) -> Option<String> {
        self.pending.take()
    }
}

impl Navigator for RouteNavigator {
    fn advance(&mut self) -> Result<()> {
        info!("Advancing to {}", self.route);
        self.pending = Some(self.route.clone());
        Ok(())
    }
}
