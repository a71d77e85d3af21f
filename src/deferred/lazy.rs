//! Lazily loaded components

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};

use futures_util::future::{self, BoxFuture, Shared};
use futures_util::FutureExt;
use parking_lot::Mutex;

use crate::deferred::view::{Component, Node};
use crate::error::DeferredError;

pub type Module<P> = Arc<dyn Component<P>>;

type ModuleResult<P> = Result<Module<P>, DeferredError>;
type Loader<P> = Box<dyn FnOnce() -> BoxFuture<'static, ModuleResult<P>> + Send>;

/// Wrap a module loader into a component that suspends until it resolves.
///
/// The loader runs once, on first render; every mount shares its result.
pub fn lazy<P, F, Fut>(loader: F, fallback: Option<Node>) -> Lazy<P>
where
    P: 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ModuleResult<P>> + Send + 'static,
{
    Lazy {
        loader: Mutex::new(Some(Box::new(move || loader().boxed()))),
        module: OnceLock::new(),
        fallback: fallback.unwrap_or_else(Node::loading_screen),
    }
}

pub struct Lazy<P> {
    loader: Mutex<Option<Loader<P>>>,
    module: OnceLock<Shared<BoxFuture<'static, ModuleResult<P>>>>,
    fallback: Node,
}

/// Outcome of rendering a deferred component
pub enum Render {
    Ready(Node),
    Suspended(Suspension),
}

/// Suspend point handed to the environment: await it, then render again
pub struct Suspension {
    fallback: Node,
    ready: BoxFuture<'static, Result<(), DeferredError>>,
}

impl Suspension {
    pub fn fallback(&self) -> &Node {
        &self.fallback
    }
}

impl Future for Suspension {
    type Output = Result<(), DeferredError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.ready.poll_unpin(cx)
    }
}

impl<P: 'static> Lazy<P> {
    fn module(&self) -> &Shared<BoxFuture<'static, ModuleResult<P>>> {
        self.module.get_or_init(|| match self.loader.lock().take() {
            Some(loader) => {
                tracing::debug!("Fetching deferred module");
                loader().shared()
            }
            None => future::ready(Err(DeferredError::ModuleLoad(
                "loader already consumed".to_string(),
            )))
            .boxed()
            .shared(),
        })
    }

    /// Render with `props`, or suspend if the module is not available yet.
    ///
    /// A failed load is returned as an error for the enclosing boundary.
    pub fn render(&self, props: &P) -> Result<Render, DeferredError> {
        let module = self.module().clone();
        match module.peek() {
            Some(Ok(component)) => Ok(Render::Ready(component.render(props))),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(Render::Suspended(Suspension {
                fallback: self.fallback.clone(),
                ready: module.map(|result| result.map(|_| ())).boxed(),
            })),
        }
    }

    /// Whether the loader has been triggered
    pub fn is_started(&self) -> bool {
        self.module.get().is_some()
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.module.get().and_then(|m| m.peek()), Some(Ok(_)))
    }
}
