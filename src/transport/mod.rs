pub mod http;

pub use http::TransportBuilder;
