/// Backend submodules for the network side of the client
///
/// - `client`: reqwest client for the reply and feedback endpoints
/// - `handlers`: maps UI actions to requests and results to GUI events
/// - `main_loop`: Tokio runtime and the action polling loop
pub mod client;
mod handlers;
mod main_loop;

// Re-export the main backend entry points
pub use client::{ApiClient, ClientError, Reply};
pub use main_loop::{run_backend, BackendConfig};
