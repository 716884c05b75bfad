//! GraphQL request construction and response decoding.
//!
//! [`Operation`] turns typed inputs into a [`GraphqlRequest`]; [`decode`]
//! turns the response envelope back into model records. Neither performs I/O.

pub mod decode;
mod documents;
pub mod operation;

pub use operation::{GraphqlRequest, Operation};
