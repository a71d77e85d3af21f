//! The four reference datasets, each a thin declaration over `Resource`

use crate::constants;
use crate::models::{ActivityType, Position, Province, ReferenceItem, ServiceCategory};
use crate::resource::query::CollectionQuery;

/// Binds a collection name to its item shape and query
pub trait Dataset {
    type Item: ReferenceItem;

    const COLLECTION: &'static str;

    /// Localized heading for selection UI
    const LABEL: &'static str;

    fn query() -> CollectionQuery {
        CollectionQuery::active(Self::COLLECTION)
    }
}

pub struct ActivityTypes;
pub struct Positions;
pub struct Provinces;
pub struct ServiceCategories;

impl Dataset for ActivityTypes {
    type Item = ActivityType;
    const COLLECTION: &'static str = constants::ACTIVITY_TYPES;
    const LABEL: &'static str = "نوع فعالیت";
}

impl Dataset for Positions {
    type Item = Position;
    const COLLECTION: &'static str = constants::ORGANIZATIONAL_POSITIONS;
    const LABEL: &'static str = "سمت سازمانی";
}

impl Dataset for Provinces {
    type Item = Province;
    const COLLECTION: &'static str = constants::PROVINCES;
    const LABEL: &'static str = "استان";
}

impl Dataset for ServiceCategories {
    type Item = ServiceCategory;
    const COLLECTION: &'static str = constants::SERVICE_CATEGORIES;
    const LABEL: &'static str = "دسته خدمات";
}
