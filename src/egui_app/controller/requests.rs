use std::collections::HashMap;

use crate::api::Endpoint;

/// Identifies one issued request. Results carrying a token that is no longer
/// current are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RequestToken {
    endpoint: Endpoint,
    id: u64,
}

impl RequestToken {
    pub(crate) fn endpoint(&self) -> Endpoint {
        self.endpoint
    }
}

/// At most one in-flight request per endpoint.
#[derive(Debug, Default)]
pub(crate) struct RequestGuard {
    in_flight: HashMap<Endpoint, u64>,
    next_id: u64,
}

impl RequestGuard {
    /// Claim the endpoint; `None` while another request holds it.
    pub(crate) fn begin(&mut self, endpoint: Endpoint) -> Option<RequestToken> {
        if self.in_flight.contains_key(&endpoint) {
            return None;
        }
        Some(self.issue(endpoint))
    }

    /// Claim the endpoint, turning any in-flight request into a stale one.
    pub(crate) fn restart(&mut self, endpoint: Endpoint) -> RequestToken {
        self.in_flight.remove(&endpoint);
        self.issue(endpoint)
    }

    /// Release the endpoint. Returns false for stale tokens, whose results
    /// must be ignored.
    pub(crate) fn finish(&mut self, token: RequestToken) -> bool {
        if self.in_flight.get(&token.endpoint) != Some(&token.id) {
            return false;
        }
        self.in_flight.remove(&token.endpoint);
        true
    }

    /// Forget the in-flight request so its result arrives stale.
    pub(crate) fn abandon(&mut self, endpoint: Endpoint) {
        self.in_flight.remove(&endpoint);
    }

    pub(crate) fn is_in_flight(&self, endpoint: Endpoint) -> bool {
        self.in_flight.contains_key(&endpoint)
    }

    pub(crate) fn any_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    fn issue(&mut self, endpoint: Endpoint) -> RequestToken {
        self.next_id += 1;
        self.in_flight.insert(endpoint, self.next_id);
        RequestToken {
            endpoint,
            id: self.next_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_rejected_until_finish() {
        let mut guard = RequestGuard::default();
        let token = guard.begin(Endpoint::Solve).unwrap();
        assert!(guard.begin(Endpoint::Solve).is_none());
        assert!(guard.begin(Endpoint::Checklist).is_some());
        assert!(guard.finish(token));
        assert!(!guard.is_in_flight(Endpoint::Solve));
        assert!(guard.begin(Endpoint::Solve).is_some());
    }

    #[test]
    fn restart_makes_previous_token_stale() {
        let mut guard = RequestGuard::default();
        let first = guard.begin(Endpoint::Institution).unwrap();
        let second = guard.restart(Endpoint::Institution);
        assert!(!guard.finish(first));
        assert!(guard.is_in_flight(Endpoint::Institution));
        assert!(guard.finish(second));
        assert!(!guard.any_in_flight());
    }

    #[test]
    fn abandoned_result_is_stale() {
        let mut guard = RequestGuard::default();
        let token = guard.begin(Endpoint::Checklist).unwrap();
        guard.abandon(Endpoint::Checklist);
        assert!(!guard.finish(token));
        assert_eq!(token.endpoint(), Endpoint::Checklist);
    }
}
