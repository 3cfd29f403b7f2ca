pub mod cli;
pub mod router;
pub mod state;

mod error;

pub use error::Error;
pub use router::app_router;
pub use state::AppState;
