/*!
One-shot result cells.

A `Deferred` is the settle-exactly-once channel used for the
session's `handshake`, `closed`, `clienthello` and `ocsp` outcomes.
The producing side settles at most once (later settles are ignored);
any number of `DeferredHandle` observers can await the outcome, and
observers subscribing after settlement still see the settled value.
*/

use tokio::sync::watch;

use crate::error::SessionError;

type Outcome<T> = Option<Result<T, SessionError>>;

/// Producer side of a one-shot result cell.
#[derive(Debug)]
pub(crate) struct Deferred<T: Clone> {
    tx: watch::Sender<Outcome<T>>,
}

impl<T: Clone> Deferred<T> {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// A new observer for this cell.
    pub(crate) fn handle(&self) -> DeferredHandle<T> {
        DeferredHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// Settle with a value. Returns false if already settled.
    pub(crate) fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Settle with an error. Returns false if already settled.
    pub(crate) fn reject(&self, error: SessionError) -> bool {
        self.settle(Err(error))
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.tx.borrow().is_some()
    }

    fn settle(&self, outcome: Result<T, SessionError>) -> bool {
        let mut settled = false;
        self.tx.send_if_modified(|slot| {
            if slot.is_none() {
                *slot = Some(outcome);
                settled = true;
                true
            } else {
                false
            }
        });
        settled
    }
}

/// Observer side of a one-shot result cell.
///
/// Cloning yields another independent observer of the same cell.
#[derive(Debug, Clone)]
pub struct DeferredHandle<T: Clone> {
    rx: watch::Receiver<Outcome<T>>,
}

impl<T: Clone> DeferredHandle<T> {
    /// Wait for the cell to settle.
    pub async fn wait(&mut self) -> Result<T, SessionError> {
        let settled = self
            .rx
            .wait_for(|outcome| outcome.is_some())
            .await
            .map_err(|_| {
                SessionError::Internal("session dropped before settlement".to_string())
            })?;
        (*settled)
            .clone()
            .expect("wait_for guarantees a settled outcome")
    }

    /// The settled outcome, if any, without waiting.
    pub fn try_result(&self) -> Option<Result<T, SessionError>> {
        (*self.rx.borrow()).clone()
    }

    /// Whether the cell has settled.
    pub fn is_settled(&self) -> bool {
        self.rx.borrow().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_once() {
        let cell: Deferred<u32> = Deferred::new();
        let handle = cell.handle();

        assert!(!cell.is_settled());
        assert!(cell.resolve(7));
        assert!(cell.is_settled());

        // Later settles are ignored and do not change the value.
        assert!(!cell.resolve(8));
        assert!(!cell.reject(SessionError::StreamOpenFailed));

        assert_eq!(handle.try_result(), Some(Ok(7)));
    }

    #[test]
    fn test_late_observer_sees_settled_value() {
        let cell: Deferred<()> = Deferred::new();
        cell.reject(SessionError::StreamOpenFailed);

        let handle = cell.handle();
        assert_eq!(handle.try_result(), Some(Err(SessionError::StreamOpenFailed)));
    }

    #[tokio::test]
    async fn test_wait_resolves() {
        let cell: Deferred<u32> = Deferred::new();
        let mut handle = cell.handle();

        let waiter = tokio::spawn(async move { handle.wait().await });
        cell.resolve(42);
        assert_eq!(waiter.await.unwrap(), Ok(42));
    }

    #[tokio::test]
    async fn test_wait_after_settlement() {
        let cell: Deferred<u32> = Deferred::new();
        cell.resolve(1);
        let mut handle = cell.handle();
        assert_eq!(handle.wait().await, Ok(1));
    }

    #[tokio::test]
    async fn test_dropped_producer_reports_internal_error() {
        let cell: Deferred<u32> = Deferred::new();
        let mut handle = cell.handle();
        drop(cell);
        assert!(matches!(handle.wait().await, Err(SessionError::Internal(_))));
    }
}
