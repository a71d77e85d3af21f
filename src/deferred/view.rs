//! Renderable tree and the component contract

use crate::constants::LOADING_TEXT;

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Text(String),
    Element { tag: String, children: Vec<Node> },
}

impl Node {
    pub fn text(content: impl Into<String>) -> Node {
        Node::Text(content.into())
    }

    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Node {
        Node::Element {
            tag: tag.into(),
            children,
        }
    }

    /// Full-viewport loading indicator used when no fallback is given
    pub fn loading_screen() -> Node {
        Node::element(
            "loading-screen",
            vec![Node::element("spinner", vec![]), Node::text(LOADING_TEXT)],
        )
    }

    /// Text leaves in document order
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut Vec<String>) {
        match self {
            Node::Text(s) => out.push(s.clone()),
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Something the rendering environment can mount with props `P`
pub trait Component<P>: Send + Sync {
    fn render(&self, props: &P) -> Node;
}

impl<P, F> Component<P> for F
where
    F: Fn(&P) -> Node + Send + Sync,
{
    fn render(&self, props: &P) -> Node {
        self(props)
    }
}
