pub mod cli;
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod page;
pub mod routes;
pub mod source;
pub mod template;

pub use routes::AppState;
