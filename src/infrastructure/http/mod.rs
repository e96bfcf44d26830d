//! HTTP Layer - RESTful API + 静态工件托管

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod urls;

pub use error::ApiError;
pub use routes::{create_router, create_routes};
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
pub use urls::{base_url_from_headers, UrlMapper};
