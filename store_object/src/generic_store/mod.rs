pub mod core;
pub mod options;
pub mod store_object;


pub use self::core::GenericStore;
pub use options::{InsertOptions, QueryOptions};
