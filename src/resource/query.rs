//! Collection queries: `select <columns> where <field> = <value> order by <field>`

use std::cmp::Ordering;

use serde_json::Value;

/// Equality filter on a single column
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

/// Sort key
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub field: String,
    pub ascending: bool,
}

/// A named collection query against the remote data service
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionQuery {
    pub collection: String,
    pub select: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl CollectionQuery {
    /// `select *` over the whole collection, unordered
    pub fn new(collection: impl Into<String>) -> Self {
        CollectionQuery {
            collection: collection.into(),
            select: String::from("*"),
            filters: Vec::new(),
            order: None,
        }
    }

    /// Active records only, alphabetical by name: the reference-data default
    pub fn active(collection: impl Into<String>) -> Self {
        Self::new(collection)
            .filter_eq("is_active", true)
            .order_by("name", true)
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            field: field.into(),
            ascending,
        });
        self
    }

    /// Query-string parameters in PostgREST form (`is_active=eq.true`, `order=name.asc`)
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![(String::from("select"), self.select.clone())];
        for filter in &self.filters {
            params.push((filter.field.clone(), format!("eq.{}", literal(&filter.value))));
        }
        if let Some(order) = &self.order {
            let dir = if order.ascending { "asc" } else { "desc" };
            params.push((String::from("order"), format!("{}.{}", order.field, dir)));
        }
        params
    }

    /// Whether a row passes every filter
    pub fn matches(&self, row: &Value) -> bool {
        self.filters
            .iter()
            .all(|f| row.get(&f.field) == Some(&f.value))
    }

    /// Evaluate the query locally: filter, then stable-sort by the order key
    pub fn apply(&self, rows: &[Value]) -> Vec<Value> {
        let mut selected: Vec<Value> = rows.iter().filter(|r| self.matches(r)).cloned().collect();

        if let Some(order) = &self.order {
            selected.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.field), b.get(&order.field));
                if order.ascending { ord } else { ord.reverse() }
            });
        }

        selected
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Missing and null values sort last
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_active_query_params() {
        let q = CollectionQuery::active("provinces");
        assert_eq!(
            q.to_params(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("is_active".to_string(), "eq.true".to_string()),
                ("order".to_string(), "name.asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_apply_filters_inactive_and_sorts() {
        let rows = vec![
            json!({"id": "1", "name": "Tehran", "is_active": true}),
            json!({"id": "2", "name": "Alborz", "is_active": true}),
            json!({"id": "3", "name": "Old", "is_active": false}),
            json!({"id": "4", "name": "Ardabil"}),
        ];
        let names: Vec<_> = CollectionQuery::active("provinces")
            .apply(&rows)
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Alborz", "Tehran"]);
    }

    #[test]
    fn test_descending_order_with_nulls_last() {
        let rows = vec![
            json!({"name": null}),
            json!({"name": "a"}),
            json!({"name": "c"}),
        ];
        let sorted = CollectionQuery::new("x").order_by("name", true).apply(&rows);
        assert_eq!(sorted[0]["name"], "a");
        assert_eq!(sorted[2]["name"], Value::Null);

        let sorted = CollectionQuery::new("x").order_by("name", false).apply(&rows);
        assert_eq!(sorted[0]["name"], Value::Null);
        assert_eq!(sorted[1]["name"], "c");
    }
}
