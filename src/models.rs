use serde::{Deserialize, Deserializer, Serialize};
use serde::de::DeserializeOwned;

/// A row of a reference collection as used by selection UI
pub trait ReferenceItem: DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    /// Secondary text shown next to the name, if any
    fn detail(&self) -> Option<&str> {
        None
    }
}

/// Item shape shared by activity types, positions and service categories
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DescribedItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ReferenceItem for DescribedItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn detail(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

pub type ActivityType = DescribedItem;
pub type Position = DescribedItem;
pub type ServiceCategory = DescribedItem;

/// Province with its short administrative code
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Province {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub code: String,
}

impl ReferenceItem for Province {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn detail(&self) -> Option<&str> {
        Some(&self.code)
    }
}

/// Ids are opaque: accept uuid strings as well as serial integers
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_province_from_row_ignores_extra_columns() {
        let row = json!({"id": "1", "name": "Tehran", "code": "TEH", "is_active": true});
        let p: Province = serde_json::from_value(row).unwrap();
        assert_eq!(p.name, "Tehran");
        assert_eq!(p.detail(), Some("TEH"));
    }

    #[test]
    fn test_numeric_id_and_missing_description() {
        let row = json!({"id": 42, "name": "بتن‌ریزی"});
        let item: DescribedItem = serde_json::from_value(row).unwrap();
        assert_eq!(item.id(), "42");
        assert_eq!(item.description, None);
    }
}
