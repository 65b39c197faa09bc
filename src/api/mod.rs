pub mod handlers;
pub mod models;
pub mod server;

pub use models::{AnalyzeRequest, AnalyzeResponse};
pub use server::{build_router, start_http_server};
