#![forbid(unsafe_code)]

//! Signals that must survive a busy host.
//!
//! A signal that arrives while another dispatch holds the page cannot run
//! now. DOM input can be dropped: the next scroll or resize restarts its
//! limiter, and a click's default action cannot be prevented later anyway.
//! Signals the host itself produced have no second chance. A lost timer
//! leaves its rate limiter pending forever, a lost relay outcome strands
//! the submission, and `load` fires once per page.

use folio_core::Signal;

/// Whether `signal` must be delivered again when it cannot run now.
#[must_use]
pub fn must_redeliver(signal: &Signal) -> bool {
    matches!(
        signal,
        Signal::Timer(_) | Signal::RelayOutcome(_) | Signal::Load
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{ClickSignal, NodeId, TimerKind};

    #[test]
    fn host_generated_signals_are_redelivered() {
        assert!(must_redeliver(&Signal::Timer(TimerKind::ScrollSync)));
        assert!(must_redeliver(&Signal::Timer(TimerKind::GeometryRefresh)));
        assert!(must_redeliver(&Signal::RelayOutcome(Err("busy".into()))));
        assert!(must_redeliver(&Signal::Load));
    }

    #[test]
    fn dom_input_is_dropped() {
        assert!(!must_redeliver(&Signal::Scroll));
        assert!(!must_redeliver(&Signal::Resize));
        assert!(!must_redeliver(&Signal::Click(ClickSignal::new([NodeId::new(0)]))));
        assert!(!must_redeliver(&Signal::Submit {
            form: NodeId::new(4)
        }));
    }
}
