//! Cancellation for the pipeline's suspension points.

use async_trait::async_trait;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Error returned when a future is cancelled.
#[derive(Debug, PartialEq, Eq)]
pub enum CancelErr {
    Cancelled,
}

/// Races a future against a `CancellationToken`.
///
/// A token that is already cancelled wins even if the future is ready.
#[async_trait]
pub trait OrCancelExt: Sized {
    type Output;

    async fn or_cancel(self, token: &CancellationToken) -> Result<Self::Output, CancelErr>;
}

#[async_trait]
impl<F> OrCancelExt for F
where
    F: Future + Send,
    F::Output: Send,
{
    type Output = F::Output;

    async fn or_cancel(self, token: &CancellationToken) -> Result<Self::Output, CancelErr> {
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(CancelErr::Cancelled),
            res = self => Ok(res),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn completes_when_not_cancelled() {
        let token = CancellationToken::new();
        assert_eq!(async { 42 }.or_cancel(&token).await, Ok(42));
    }

    #[tokio::test]
    async fn cancellation_during_the_wait() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        let cancel_handle = tokio::spawn(async move {
            sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result = async {
            sleep(Duration::from_secs(5)).await;
            7
        }
        .or_cancel(&token)
        .await;

        cancel_handle.await.unwrap();
        assert_eq!(result, Err(CancelErr::Cancelled));
    }

    #[tokio::test]
    async fn already_cancelled_token_wins_over_a_ready_future() {
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(async { 5 }.or_cancel(&token).await, Err(CancelErr::Cancelled));
    }
}
