//! Fixed-interval polling for asynchronous controller operations

use std::future::Future;
use std::time::Duration;

use avx_core::provider::ProviderResult;

/// How long to wait for an asynchronous operation to settle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Sleep between probes
    pub interval: Duration,
    /// Probes after the first one; the loop sleeps once before each
    pub max_retries: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(20),
            max_retries: 90,
        }
    }
}

/// Run `probe` until it yields a value or the retries run out
///
/// `Ok(None)` from the probe means "not ready yet"; an error stops polling
/// immediately. Returns `Ok(None)` when all `max_retries + 1` probes came
/// back not ready.
pub async fn wait_for<T, F, Fut>(settings: &PollSettings, mut probe: F) -> ProviderResult<Option<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ProviderResult<Option<T>>>,
{
    let mut retries = 0;
    loop {
        if let Some(value) = probe().await? {
            return Ok(Some(value));
        }
        if retries == settings.max_retries {
            return Ok(None);
        }
        retries += 1;
        log::debug!("not ready, retry {}/{}", retries, settings.max_retries);
        tokio::time::sleep(settings.interval).await;
    }
}
