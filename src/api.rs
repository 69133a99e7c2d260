use crate::context::AppContext;
use crate::error::{ApiError, Result};
use crate::importer;
use crate::limiter::{Clock, RateLimiter, RealClock};
use crate::models::{HealthStatus, TransactionPage, UploadSummary};
use crate::query::{self, TransactionQuery};

/// The transport-agnostic service surface an HTTP layer would mount.
/// Boundary checks (API key, per-client rate limit) run here, before
/// any ingest work touches the payload.
pub struct Api<C: Clock = RealClock> {
    ctx: AppContext,
    limiter: RateLimiter<C>,
}

impl Api<RealClock> {
    pub fn new(ctx: AppContext) -> Self {
        let limiter = RateLimiter::new(ctx.settings.rate_limit_per_minute);
        Self { ctx, limiter }
    }
}

impl<C: Clock> Api<C> {
    #[allow(dead_code)]
    pub fn with_clock(ctx: AppContext, clock: C) -> Self {
        let limiter = RateLimiter::with_clock(ctx.settings.rate_limit_per_minute, clock);
        Self { ctx, limiter }
    }

    fn verify_api_key(&self, api_key: Option<&str>) -> Result<()> {
        match api_key {
            Some(key) if key == self.ctx.settings.api_key => Ok(()),
            _ => Err(ApiError::Unauthorized),
        }
    }

    /// Ingest an uploaded CSV on behalf of `client`: key check, rate
    /// check, then the pipeline.
    pub fn upload(
        &mut self,
        client: &str,
        api_key: Option<&str>,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<UploadSummary> {
        self.verify_api_key(api_key)?;
        self.limiter
            .check(client)
            .map_err(|retry_after_secs| ApiError::RateLimited { retry_after_secs })?;
        importer::ingest(&self.ctx, bytes, content_type)
    }

    /// Listing is read-only and carries no key in the original contract,
    /// so it stays open.
    pub fn transactions(&self, query: &TransactionQuery) -> Result<TransactionPage> {
        query::list_transactions(&self.ctx, query)
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus::ok()
    }
}
