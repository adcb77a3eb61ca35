//! Create-Sequence Policy Adapters

use crate::ports::inbound::InboundMessage;
use crate::ports::outbound::{CreateSequencePolicy, PolicyDecision};

/// Accepts every CreateSequence. The default.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAllPolicy;

impl CreateSequencePolicy for AcceptAllPolicy {
    fn evaluate(&self, _request: &dyn InboundMessage) -> PolicyDecision {
        PolicyDecision::Accept
    }
}

/// Policy backed by a closure.
///
/// ```ignore
/// let policy = FnPolicy::new(|msg| match msg.acks_to() {
///     Some(uri) if uri.starts_with("https://") => PolicyDecision::Accept,
///     _ => PolicyDecision::Refuse { reason: "AcksTo must use https".into() },
/// });
/// ```
pub struct FnPolicy<F> {
    rule: F,
}

impl<F> FnPolicy<F>
where
    F: Fn(&dyn InboundMessage) -> PolicyDecision + Send + Sync,
{
    pub fn new(rule: F) -> Self {
        Self { rule }
    }
}

impl<F> CreateSequencePolicy for FnPolicy<F>
where
    F: Fn(&dyn InboundMessage) -> PolicyDecision + Send + Sync,
{
    fn evaluate(&self, request: &dyn InboundMessage) -> PolicyDecision {
        (self.rule)(request)
    }
}
