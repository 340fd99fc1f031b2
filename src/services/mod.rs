// Service exports
pub mod catalog;
pub mod demo;
pub mod rescue_groups;

pub use catalog::{CatalogError, CatalogService, CatalogSnapshot, DataSource};
pub use demo::{generate_demo_dogs, generate_demo_dogs_with};
pub use rescue_groups::{RescueGroupsClient, RescueGroupsError};
