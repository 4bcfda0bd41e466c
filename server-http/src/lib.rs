pub mod api;
pub mod cli;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export key types
pub use cli::Cli;
pub use routes::{build_router, build_service};
pub use state::AppState;
