mod catalog;
pub mod multirequest;

pub use catalog::{CatalogClient, CatalogRequest};
