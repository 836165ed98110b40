pub mod query;

pub use query::QueryEngine;
