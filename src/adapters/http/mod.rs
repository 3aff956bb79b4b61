pub mod error;
pub mod handlers;
pub mod router;

pub use handlers::AppState;
pub use router::router;
