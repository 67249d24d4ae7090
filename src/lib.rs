pub mod app;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod harmony;
pub mod model;
pub mod models;
pub mod palette;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path, resolve_uploads_dir};
