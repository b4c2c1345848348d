use std::sync::Arc;

use board_logging::{board_info, board_warn};

use crate::{CatalogLoad, CatalogSource, RetryPolicy};

/// Loads the translation catalog, retrying with backoff and degrading to an
/// empty catalog once the policy is spent.
#[derive(Clone)]
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    policy: RetryPolicy,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn CatalogSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn load_catalog(&self) -> CatalogLoad {
        let max_attempts = self.policy.attempts();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.source.fetch_catalog().await {
                Ok(payload) => {
                    board_info!(
                        "Catalog loaded entries={} language={:?} attempts={}",
                        payload.catalog.len(),
                        payload.language,
                        attempt
                    );
                    return CatalogLoad::loaded(payload, attempt);
                }
                Err(err) if attempt >= max_attempts => {
                    board_warn!(
                        "Catalog fetch gave up after {} attempts, translating as identity: {}",
                        attempt,
                        err
                    );
                    return CatalogLoad::exhausted(attempt, err);
                }
                Err(err) => {
                    let delay = self.policy.delay_after(attempt);
                    board_warn!(
                        "Catalog fetch attempt {}/{} failed: {}; retrying in {:?}",
                        attempt,
                        max_attempts,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
