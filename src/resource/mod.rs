//! Resource layer - reference collections loaded into observable tri-state cells
//!
//! One generic `Resource<T>` implements the load lifecycle; each dataset is a
//! `Dataset` declaration naming its collection, item shape and query.

pub mod datasets;
pub mod hook;
pub mod query;
pub mod state;

pub use datasets::{ActivityTypes, Dataset, Positions, Provinces, ServiceCategories};
pub use hook::Resource;
pub use query::CollectionQuery;
pub use state::{LoadState, ResourceView};
