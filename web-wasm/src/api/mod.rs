pub mod fetch;

pub use fetch::{client, FetchTransport};
