//! View lifecycle scopes.
//!
//! A `ViewScope` is a cancellation token tied to one page mount. Scopes nest:
//! the application owns a root scope (cancelled on shutdown) and every mount
//! opens a child. A cancelled scope never hands results back, so a late
//! response cannot be committed to a view that is gone. Dropping a scope
//! cancels it.

use std::future::Future;

use futures::future::select_all;
use tokio::sync::watch;

/// Read side of a scope and all of its ancestors.
#[derive(Debug, Clone)]
pub struct ScopeToken {
    chain: Vec<watch::Receiver<bool>>,
}

impl ScopeToken {
    pub fn is_cancelled(&self) -> bool {
        self.chain.iter().any(|rx| *rx.borrow())
    }

    /// Resolves once this scope or any ancestor is cancelled.
    pub async fn cancelled(&self) {
        let waits = self.chain.iter().cloned().map(|mut rx| {
            Box::pin(async move {
                if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                    // Sender gone without cancelling: this link never fires.
                    std::future::pending::<()>().await;
                }
            })
        });
        select_all(waits).await;
    }
}

#[derive(Debug)]
pub struct ViewScope {
    tx: watch::Sender<bool>,
    token: ScopeToken,
}

impl ViewScope {
    pub fn root() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx, token: ScopeToken { chain: vec![rx] } }
    }

    /// A scope cancelled with this one, or on its own.
    pub fn child(&self) -> Self {
        let (tx, rx) = watch::channel(false);
        let mut chain = self.token.chain.clone();
        chain.push(rx);
        Self { tx, token: ScopeToken { chain } }
    }

    pub fn token(&self) -> ScopeToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` unless the scope is cancelled first.
    ///
    /// `None` means the scope was cancelled before or while `fut` ran, and
    /// its output must be discarded.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = fut => (!self.is_cancelled()).then_some(out),
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.tx.send_replace(true);
    }
}
