//! Call-to-action forwarding.
//!
//! The engine decides *whether* the action is available; what it does is up
//! to the handler.

use windowwatch_core::models::WindowState;

pub trait ActionHandler: Send {
    fn on_action(&mut self, state: WindowState) -> anyhow::Result<()>;
}

/// Records and logs the action without doing anything else.
#[derive(Debug, Default)]
pub struct LoggingAction {
    triggered: u64,
}

impl LoggingAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triggered(&self) -> u64 {
        self.triggered
    }
}

impl ActionHandler for LoggingAction {
    fn on_action(&mut self, state: WindowState) -> anyhow::Result<()> {
        self.triggered += 1;
        tracing::info!(%state, count = self.triggered, "Action triggered");
        Ok(())
    }
}
