// Service exports
pub mod store;

pub use store::{StoreError, TeamStore};
