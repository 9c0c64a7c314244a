pub mod equipment_routes;
pub mod health_routes;
pub mod stream_routes;

pub use equipment_routes::{document_routes, equipment_routes, retrieval_routes};
pub use health_routes::health_routes;
pub use stream_routes::stream_routes;
