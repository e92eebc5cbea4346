pub mod catalog;
pub mod response;
pub mod runs;
pub mod state;

pub use response::ApiResponse;
pub use state::{AppCore, AppState};
