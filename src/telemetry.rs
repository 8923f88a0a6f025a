//! Tracing helpers shared by the services.

use tokio::task::JoinHandle;

/// Run blocking work on the blocking pool inside the caller's span.
pub fn spawn_blocking_with_tracing<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(f))
}
