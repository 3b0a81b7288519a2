//! Per-request phase tracking.

use std::future::Future;
use std::time::Instant;

use crate::error::GatewayError;

/// Where an inbound request is in its life at the gateway.
///
/// ```text
/// Received ──► Authenticating ──┬──► Authenticated ──► Dispatching ──┬──► Relayed
///    │                          └──► Rejected                        └──► UpstreamError
///    └──────────────────────────────────────────► Dispatching   (public routes)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestPhase {
    #[default]
    Received,
    Authenticating,
    Authenticated,
    /// Terminal: no credentials or bad credentials.
    Rejected,
    Dispatching,
    /// Terminal: the backend answered and its answer was relayed.
    Relayed,
    /// Terminal: the backend could not be reached in time.
    UpstreamError,
}

impl RequestPhase {
    /// Returns true if `next` is a legal successor of this phase.
    pub fn can_transition_to(&self, next: RequestPhase) -> bool {
        use RequestPhase::*;
        matches!(
            (self, next),
            (Received, Authenticating)
                | (Received, Dispatching)
                | (Authenticating, Authenticated)
                | (Authenticating, Rejected)
                | (Authenticated, Dispatching)
                | (Dispatching, Relayed)
                | (Dispatching, UpstreamError)
        )
    }

    /// Returns true if this is a terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestPhase::Rejected | RequestPhase::Relayed | RequestPhase::UpstreamError
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPhase::Received => "received",
            RequestPhase::Authenticating => "authenticating",
            RequestPhase::Authenticated => "authenticated",
            RequestPhase::Rejected => "rejected",
            RequestPhase::Dispatching => "dispatching",
            RequestPhase::Relayed => "relayed",
            RequestPhase::UpstreamError => "upstream_error",
        }
    }
}

impl std::fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The phase of one request plus when it arrived.
///
/// Reaching a terminal phase logs the outcome and counts it in
/// `gateway_requests_total{phase}`.
#[derive(Debug, Clone)]
pub struct RequestTrace {
    route: String,
    phase: RequestPhase,
    received_at: Instant,
}

impl RequestTrace {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            phase: RequestPhase::Received,
            received_at: Instant::now(),
        }
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Moves to `next`. Illegal transitions are logged and ignored.
    pub fn advance(&mut self, next: RequestPhase) {
        if !self.phase.can_transition_to(next) {
            tracing::warn!(route = %self.route, from = %self.phase, to = %next, "illegal request phase transition");
            return;
        }
        self.phase = next;

        if next.is_terminal() {
            let elapsed = self.received_at.elapsed();
            metrics::counter!("gateway_requests_total", "phase" => next.as_str()).increment(1);
            tracing::info!(
                route = %self.route,
                phase = %next,
                elapsed_ms = elapsed.as_millis() as u64,
                "request finished"
            );
        }
    }
}

impl RequestTrace {
    /// Runs the single outbound call for this request and records whether the
    /// backend answered.
    pub async fn dispatch<T, F>(mut self, backend: &'static str, call: F) -> Result<T, GatewayError>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        self.advance(RequestPhase::Dispatching);
        let started = Instant::now();
        let result = call.await;
        metrics::histogram!("gateway_upstream_duration_seconds", "backend" => backend)
            .record(started.elapsed().as_secs_f64());

        match &result {
            Err(err) if err.is_upstream_failure() => self.advance(RequestPhase::UpstreamError),
            _ => self.advance(RequestPhase::Relayed),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase_is_received() {
        assert_eq!(RequestPhase::default(), RequestPhase::Received);
    }

    #[test]
    fn test_protected_path() {
        let mut trace = RequestTrace::new("/payments");
        for phase in [
            RequestPhase::Authenticating,
            RequestPhase::Authenticated,
            RequestPhase::Dispatching,
            RequestPhase::Relayed,
        ] {
            trace.advance(phase);
            assert_eq!(trace.phase(), phase);
        }
        assert!(trace.phase().is_terminal());
    }

    #[test]
    fn test_public_path_skips_authentication() {
        assert!(RequestPhase::Received.can_transition_to(RequestPhase::Dispatching));
        assert!(!RequestPhase::Received.can_transition_to(RequestPhase::Authenticated));
    }

    #[test]
    fn test_rejected_never_dispatches() {
        let mut trace = RequestTrace::new("/products");
        trace.advance(RequestPhase::Authenticating);
        trace.advance(RequestPhase::Rejected);
        trace.advance(RequestPhase::Dispatching);
        assert_eq!(trace.phase(), RequestPhase::Rejected);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(RequestPhase::Rejected.is_terminal());
        assert!(RequestPhase::Relayed.is_terminal());
        assert!(RequestPhase::UpstreamError.is_terminal());
        assert!(!RequestPhase::Dispatching.is_terminal());
        assert!(!RequestPhase::Authenticated.is_terminal());
    }

    #[test]
    fn test_terminal_phases_have_no_successors() {
        use RequestPhase::*;
        let all = [
            Received,
            Authenticating,
            Authenticated,
            Rejected,
            Dispatching,
            Relayed,
            UpstreamError,
        ];
        for from in [Rejected, Relayed, UpstreamError] {
            assert!(all.iter().all(|to| !from.can_transition_to(*to)));
        }
    }

    #[tokio::test]
    async fn test_dispatch_records_outcome() {
        let trace = RequestTrace::new("/login");
        let ok: Result<u8, GatewayError> = trace.dispatch("identity", async { Ok(1) }).await;
        assert_eq!(ok.unwrap(), 1);

        let mut trace = RequestTrace::new("/products");
        trace.advance(RequestPhase::Authenticating);
        trace.advance(RequestPhase::Authenticated);
        let err: Result<(), GatewayError> = trace
            .dispatch("shopping", async { Err(GatewayError::UpstreamUnreachable) })
            .await;
        assert!(matches!(err, Err(GatewayError::UpstreamUnreachable)));
    }

    #[test]
    fn test_display() {
        assert_eq!(RequestPhase::UpstreamError.to_string(), "upstream_error");
    }
}
