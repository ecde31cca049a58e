#![forbid(unsafe_code)]

//! Contact form delivered through a third-party email relay.
//!
//! The runtime never talks to the relay itself. Submitting asks the host to
//! send the form ([`Effect::SendForm`]); the host reports back with
//! [`Signal::RelayOutcome`], which decides the notice shown to the visitor.

use folio_core::{Effect, Effects, LayoutProbe, NodeId, Signal};

use crate::config::{NoticeConfig, RelayConfig};
use crate::context::PageContext;
use crate::dispatch::Flow;

/// Submission bookkeeping for the page's contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    form: NodeId,
    relay: Option<RelayConfig>,
    notices: NoticeConfig,
    in_flight: u32,
    sent: u32,
    failed: u32,
}

impl ContactForm {
    #[must_use]
    pub(crate) fn new(form: NodeId, relay: Option<RelayConfig>, notices: NoticeConfig) -> Self {
        Self {
            form,
            relay,
            notices,
            in_flight: 0,
            sent: 0,
            failed: 0,
        }
    }

    #[must_use]
    pub fn form(&self) -> NodeId {
        self.form
    }

    /// Whether submissions go through the relay.
    #[must_use]
    pub fn is_relayed(&self) -> bool {
        self.relay.is_some()
    }

    /// Sends requested but not yet answered.
    #[must_use]
    pub fn in_flight(&self) -> u32 {
        self.in_flight
    }

    #[must_use]
    pub fn sent_count(&self) -> u32 {
        self.sent
    }

    #[must_use]
    pub fn failed_count(&self) -> u32 {
        self.failed
    }

    fn submit(&mut self, effects: &mut Effects) {
        let Some(relay) = &self.relay else {
            tracing::warn!(
                target: "folio.contact",
                form = %self.form,
                "no relay configured; leaving submission to the browser"
            );
            return;
        };
        effects.push(Effect::PreventDefault);
        effects.push(Effect::SendForm {
            form: self.form,
            service_id: relay.service_id.clone(),
            template_id: relay.template_id.clone(),
        });
        self.in_flight += 1;
        tracing::info!(
            target: "folio.contact",
            service = %relay.service_id,
            template = %relay.template_id,
            "contact form sent to relay"
        );
    }

    fn settle(&mut self, outcome: &Result<(), String>, effects: &mut Effects) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            Ok(()) => {
                self.sent += 1;
                tracing::info!(target: "folio.contact", "relay accepted message");
                effects.push(Effect::Notify {
                    message: self.notices.sent.clone(),
                });
                effects.push(Effect::ResetForm { form: self.form });
            }
            Err(detail) => {
                self.failed += 1;
                tracing::error!(target: "folio.contact", error = %detail, "relay rejected message");
                effects.push(Effect::Notify {
                    message: self.notices.failed.clone(),
                });
            }
        }
    }
}

/// `Submit`: hand the contact form to the relay.
pub(crate) fn on_submit(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::Submit { form }, Some(contact)) = (signal, ctx.contact.as_mut()) else {
        return Flow::Continue;
    };
    if *form == contact.form {
        contact.submit(effects);
    }
    Flow::Continue
}

/// `RelayOutcome`: tell the visitor how the send went.
pub(crate) fn on_outcome(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let (Signal::RelayOutcome(outcome), Some(contact)) = (signal, ctx.contact.as_mut()) else {
        return Flow::Continue;
    };
    contact.settle(outcome, effects);
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn relayed() -> ContactForm {
        ContactForm::new(
            NodeId::new(9),
            Some(RelayConfig::new("pk", "service_a", "template_b")),
            NoticeConfig::default(),
        )
    }

    #[test]
    fn submit_prevents_default_and_sends() {
        let mut form = relayed();
        let mut effects = Effects::new();
        form.submit(&mut effects);
        assert_eq!(
            effects.into_vec(),
            vec![
                Effect::PreventDefault,
                Effect::SendForm {
                    form: NodeId::new(9),
                    service_id: "service_a".into(),
                    template_id: "template_b".into(),
                },
            ]
        );
        assert_eq!(form.in_flight(), 1);
    }

    #[test]
    fn unrelayed_submit_leaves_browser_default() {
        let mut form = ContactForm::new(NodeId::new(9), None, NoticeConfig::default());
        let mut effects = Effects::new();
        form.submit(&mut effects);
        assert!(effects.is_empty());
        assert!(!form.is_relayed());
    }

    #[test]
    fn success_notifies_and_resets() {
        let mut form = relayed();
        form.submit(&mut Effects::new());
        let mut effects = Effects::new();
        form.settle(&Ok(()), &mut effects);
        assert_eq!(
            effects.into_vec(),
            vec![
                Effect::Notify {
                    message: NoticeConfig::default().sent
                },
                Effect::ResetForm {
                    form: NodeId::new(9)
                },
            ]
        );
        assert_eq!((form.in_flight(), form.sent_count()), (0, 1));
    }

    #[test]
    fn failure_keeps_fields() {
        let mut form = relayed();
        form.submit(&mut Effects::new());
        let mut effects = Effects::new();
        form.settle(&Err("timeout".into()), &mut effects);
        assert_eq!(
            effects.into_vec(),
            vec![Effect::Notify {
                message: NoticeConfig::default().failed
            }]
        );
        assert_eq!(form.failed_count(), 1);
    }

    #[test]
    fn stray_outcome_does_not_underflow() {
        let mut form = relayed();
        form.settle(&Ok(()), &mut Effects::new());
        assert_eq!(form.in_flight(), 0);
    }
}
