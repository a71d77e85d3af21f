//! Environment-side driver for deferred components

use std::sync::Arc;

use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;

use crate::deferred::lazy::{Lazy, Render, Suspension};
use crate::deferred::view::Node;
use crate::error::DeferredError;

enum Step {
    Render,
    Wait(Suspension),
    Done,
}

/// Frames for one mount of `lazy`: the fallback right away while suspended,
/// then the resolved component rendered with `props`.
///
/// A loader failure ends the stream with `Err`; it is never swallowed.
pub fn suspense<P>(lazy: Arc<Lazy<P>>, props: P) -> BoxStream<'static, Result<Node, DeferredError>>
where
    P: Send + Sync + 'static,
{
    stream::unfold((lazy, props, Step::Render), |(lazy, props, step)| async move {
        match step {
            Step::Done => None,
            Step::Render => Some(render_step(lazy, props)),
            Step::Wait(suspension) => match suspension.await {
                Ok(()) => Some(render_step(lazy, props)),
                Err(e) => {
                    tracing::error!(error = %e, "Deferred section failed to load");
                    Some((Err(e), (lazy, props, Step::Done)))
                }
            },
        }
    })
    .boxed()
}

type Frame<P> = (Result<Node, DeferredError>, (Arc<Lazy<P>>, P, Step));

fn render_step<P: 'static>(lazy: Arc<Lazy<P>>, props: P) -> Frame<P> {
    match lazy.render(&props) {
        Ok(Render::Ready(node)) => (Ok(node), (lazy, props, Step::Done)),
        Ok(Render::Suspended(suspension)) => {
            let fallback = suspension.fallback().clone();
            (Ok(fallback), (lazy, props, Step::Wait(suspension)))
        }
        Err(e) => (Err(e), (lazy, props, Step::Done)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use futures_util::FutureExt;

    use crate::constants::LOADING_TEXT;
    use crate::deferred::lazy::{lazy, Module};

    #[derive(Clone, Debug, PartialEq)]
    struct Props {
        title: String,
    }

    fn page() -> Module<Props> {
        Arc::new(|props: &Props| Node::element("page", vec![Node::text(props.title.clone())]))
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_then_resolved_with_same_props() {
        let section = Arc::new(lazy(
            || async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Ok(page())
            },
            Some(Node::text("صبر کنید")),
        ));
        assert!(!section.is_started());

        let mut frames = suspense(section.clone(), Props { title: "پروژه‌ها".into() });
        let first = frames.next().now_or_never().flatten().unwrap().unwrap();
        assert_eq!(first, Node::text("صبر کنید"));
        assert!(section.is_started());
        assert!(!section.is_resolved());

        let second = frames.next().await.unwrap().unwrap();
        assert_eq!(second.lines(), vec!["پروژه‌ها"]);
        assert!(section.is_resolved());
        assert!(frames.next().await.is_none());
    }

    #[tokio::test]
    async fn test_default_fallback_is_loading_screen() {
        let section = Arc::new(lazy(|| async { Ok(page()) }, None));
        let mut frames = suspense(section, Props { title: "x".into() });
        let first = frames.next().await.unwrap().unwrap();
        assert_eq!(first, Node::loading_screen());
        assert_eq!(first.lines(), vec![LOADING_TEXT]);
    }

    #[tokio::test]
    async fn test_loader_runs_once_across_mounts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let section = Arc::new(lazy(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(page()) }
            },
            None,
        ));

        let first: Vec<_> = suspense(section.clone(), Props { title: "a".into() }).collect().await;
        assert_eq!(first.len(), 2);

        let second: Vec<_> = suspense(section, Props { title: "b".into() }).collect().await;
        assert_eq!(second, vec![Ok(Node::element("page", vec![Node::text("b")]))]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejection_reaches_enclosing_handler() {
        let section: Arc<Lazy<Props>> = Arc::new(lazy(
            || async { Err(DeferredError::ModuleLoad("chunk fetch failed".into())) },
            None,
        ));

        let frames: Vec<_> = suspense(section.clone(), Props { title: "x".into() }).collect().await;
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], Ok(Node::loading_screen()));
        assert_eq!(
            frames[1],
            Err(DeferredError::ModuleLoad("chunk fetch failed".into()))
        );

        assert!(section.render(&Props { title: "x".into() }).is_err());
    }
}
