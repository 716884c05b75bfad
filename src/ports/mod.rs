//! Port traits defining external boundaries.
//!
//! The only boundary is the GraphQL transport. Implementations live in
//! `src/adapters/`.

pub mod transport;

pub use transport::{GraphqlTransport, TransportFuture};
