//! Deferred details section for the selected reference item

use std::sync::Arc;

use crate::deferred::{lazy, Lazy, Module, Node};
use crate::messages::ListEntry;

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsProps {
    pub dataset: &'static str,
    pub entry: ListEntry,
}

pub fn details_page(props: &DetailsProps) -> Node {
    let mut rows = vec![
        Node::element("h2", vec![Node::text(props.entry.name.clone())]),
        Node::text(format!("{}: {}", props.dataset, props.entry.name)),
        Node::text(format!("شناسه: {}", props.entry.id)),
    ];
    if let Some(detail) = &props.entry.detail {
        rows.push(Node::text(detail.clone()));
    }
    Node::element("details", rows)
}

/// The section is mounted behind a suspense boundary; its first render pays
/// for resolving the page module.
pub fn details_section() -> Lazy<DetailsProps> {
    lazy(
        || async {
            tokio::task::yield_now().await;
            Ok(Arc::new(details_page) as Module<DetailsProps>)
        },
        None,
    )
}
