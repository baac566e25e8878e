pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod progress;
pub mod session;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use progress::ProgressRepository;
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
