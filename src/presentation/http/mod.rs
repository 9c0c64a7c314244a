pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

pub use server::HttpServer;
