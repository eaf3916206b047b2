pub mod config;
pub mod countdown;
pub mod progress;
pub mod window;

pub use config::{Config, DaemonConfig, DisplayConfig, WindowConfig};
pub use countdown::Countdown;
pub use progress::Progress;
pub use window::{Window, WindowState};
