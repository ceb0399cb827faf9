//! Rate limiting middleware using token bucket algorithm.
//!
//! Two tiers exist: [`RateTier::Public`] for link resolution and statistics,
//! and the stricter [`RateTier::Sensitive`] for link creation and
//! invalidation. Each tier can key clients by socket peer address or, behind
//! a trusted reverse proxy, by forwarded headers.

use axum::Router;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Rate limit tier applied to a group of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateTier {
    /// 2 requests per second, burst of 100.
    Public,
    /// 1 request per second, burst of 10.
    Sensitive,
}

impl RateTier {
    fn per_second(self) -> u64 {
        match self {
            Self::Public => 2,
            Self::Sensitive => 1,
        }
    }

    fn burst_size(self) -> u32 {
        match self {
            Self::Public => 100,
            Self::Sensitive => 10,
        }
    }
}

/// Wraps `router` with a per-client rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// With `behind_proxy = false` the client is the socket peer address, which
/// requires serving with `into_make_service_with_connect_info::<SocketAddr>()`.
/// With `behind_proxy = true` the client IP is read from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`, falling back to the peer address. Enable it
/// only when a trusted proxy overwrites those headers.
///
/// # Example
///
/// ```rust,ignore
/// let routes = rate_limit::apply(api::routes::management_routes(), RateTier::Sensitive, false);
/// ```
pub fn apply<S>(router: Router<S>, tier: RateTier, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(governor_layer(SmartIpKeyExtractor, tier))
    } else {
        router.layer(governor_layer(PeerIpKeyExtractor, tier))
    }
}

fn governor_layer<K>(
    extractor: K,
    tier: RateTier,
) -> GovernorLayer<K, governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(extractor)
            .per_second(tier.per_second())
            .burst_size(tier.burst_size())
            .finish()
            .expect("rate limit tiers have non-zero period and burst"),
    );

    GovernorLayer::new(governor_conf)
}
