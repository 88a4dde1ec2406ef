//! Contact form submission: validation, the sending state, and the
//! delivery seam.

use log::{info, warn};
use vitae_protocol::{ContactFields, DomCommand, NodeId, SharedStr, SubmitOutcome};

use super::toast::ToastKind;
use crate::config::ContactConfig;
use crate::model::{Submission, ValidationErrors, validate};

/// How a transport will report back.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// The outcome is known now and lands after `delay_ms`.
    After { delay_ms: f64, outcome: SubmitOutcome },
    /// The host delivers the form and answers with
    /// `PageEvent::SubmitSettled`.
    External,
}

/// Sends validated contact forms somewhere.
pub trait SubmitTransport: Send {
    fn send(&mut self, submission: &Submission) -> Delivery;
}

/// Pretends to send: always succeeds after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay_ms: f64,
}

impl SimulatedTransport {
    pub fn new(delay_ms: f64) -> Self {
        Self { delay_ms }
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(2000.0)
    }
}

impl SubmitTransport for SimulatedTransport {
    fn send(&mut self, _submission: &Submission) -> Delivery {
        Delivery::After {
            delay_ms: self.delay_ms,
            outcome: SubmitOutcome::sent(),
        }
    }
}

/// Hands every submission to the host.
#[derive(Debug, Clone, Default)]
pub struct HostTransport;

impl SubmitTransport for HostTransport {
    fn send(&mut self, _submission: &Submission) -> Delivery {
        Delivery::External
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Sending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStep {
    /// Validation failed; nothing was sent.
    Rejected(ValidationErrors),
    /// A previous submission is still in flight.
    Ignored,
    Started(Delivery),
}

/// A message the page should show as a toast.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    form: NodeId,
    submit: Option<NodeId>,
    idle_label: Option<SharedStr>,
    config: ContactConfig,
    state: FormState,
}

impl ContactForm {
    pub fn new(
        form: NodeId,
        submit: Option<NodeId>,
        idle_label: Option<String>,
        config: ContactConfig,
    ) -> Self {
        Self {
            form,
            submit,
            idle_label: idle_label.map(SharedStr::from),
            config,
            state: FormState::Idle,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn submit(
        &mut self,
        fields: &ContactFields,
        transport: &mut dyn SubmitTransport,
        out: &mut Vec<DomCommand>,
    ) -> SubmitStep {
        if self.state == FormState::Sending {
            return SubmitStep::Ignored;
        }
        let submission = match validate(fields) {
            Ok(submission) => submission,
            Err(errors) => {
                info!("contact: rejected submission ({errors})");
                return SubmitStep::Rejected(errors);
            }
        };

        if let Some(submit) = self.submit {
            out.push(DomCommand::SetText {
                node: submit,
                text: self.config.sending_label.as_str().into(),
            });
            out.push(DomCommand::SetDisabled {
                node: submit,
                disabled: true,
            });
        }
        self.state = FormState::Sending;
        info!("contact: sending message from {}", submission.fields().email);

        let delivery = transport.send(&submission);
        if delivery == Delivery::External {
            out.push(DomCommand::Deliver {
                fields: submission.into_fields(),
            });
        }
        SubmitStep::Started(delivery)
    }

    /// Finish the in-flight submission. On failure the fields are kept so
    /// the visitor can retry.
    pub fn settle(&mut self, outcome: &SubmitOutcome, out: &mut Vec<DomCommand>) -> Option<Notice> {
        if self.state != FormState::Sending {
            warn!("contact: delivery outcome arrived with no submission in flight");
            return None;
        }
        self.state = FormState::Idle;

        let notice = if outcome.success {
            out.push(DomCommand::ResetForm { node: self.form });
            Notice {
                kind: ToastKind::Success,
                message: self.config.success_message.clone(),
            }
        } else {
            let message = outcome
                .error_message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| self.config.failure_message.clone());
            warn!("contact: delivery failed: {message}");
            Notice {
                kind: ToastKind::Error,
                message,
            }
        };

        if let Some(submit) = self.submit {
            if let Some(label) = &self.idle_label {
                out.push(DomCommand::SetText {
                    node: submit,
                    text: label.clone(),
                });
            }
            out.push(DomCommand::SetDisabled {
                node: submit,
                disabled: false,
            });
        }
        Some(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldError;

    const FORM: NodeId = NodeId(1);
    const BUTTON: NodeId = NodeId(2);

    #[derive(Default)]
    struct CountingTransport {
        calls: usize,
    }

    impl SubmitTransport for CountingTransport {
        fn send(&mut self, _submission: &Submission) -> Delivery {
            self.calls += 1;
            Delivery::After {
                delay_ms: 10.0,
                outcome: SubmitOutcome::sent(),
            }
        }
    }

    fn form() -> ContactForm {
        ContactForm::new(
            FORM,
            Some(BUTTON),
            Some("Send Message".into()),
            ContactConfig::default(),
        )
    }

    fn valid() -> ContactFields {
        ContactFields {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
        }
    }

    #[test]
    fn invalid_form_never_reaches_transport() {
        let mut form = form();
        let mut transport = CountingTransport::default();
        let mut out = Vec::new();
        let fields = ContactFields {
            name: String::new(),
            email: "bad".into(),
            subject: "hi".into(),
            message: "hi".into(),
        };
        let SubmitStep::Rejected(errors) = form.submit(&fields, &mut transport, &mut out) else {
            panic!("expected rejection");
        };
        assert!(errors.contains(FieldError::NameRequired));
        assert!(errors.contains(FieldError::EmailInvalid));
        assert_eq!(transport.calls, 0);
        assert!(out.is_empty());
        assert_eq!(form.state(), FormState::Idle);
    }

    #[test]
    fn sending_disables_and_ignores_resubmits() {
        let mut form = form();
        let mut transport = CountingTransport::default();
        let mut out = Vec::new();
        let step = form.submit(&valid(), &mut transport, &mut out);
        assert!(matches!(step, SubmitStep::Started(Delivery::After { .. })));
        assert_eq!(
            out,
            vec![
                DomCommand::SetText {
                    node: BUTTON,
                    text: "Sending...".into()
                },
                DomCommand::SetDisabled {
                    node: BUTTON,
                    disabled: true
                },
            ]
        );
        assert_eq!(form.submit(&valid(), &mut transport, &mut out), SubmitStep::Ignored);
        assert_eq!(transport.calls, 1);
    }

    #[test]
    fn success_resets_and_restores() {
        let mut form = form();
        let mut out = Vec::new();
        form.submit(&valid(), &mut SimulatedTransport::default(), &mut out);
        out.clear();
        let notice = form.settle(&SubmitOutcome::sent(), &mut out);
        assert_eq!(
            notice,
            Some(Notice {
                kind: ToastKind::Success,
                message: "Message sent successfully!".into()
            })
        );
        assert_eq!(
            out,
            vec![
                DomCommand::ResetForm { node: FORM },
                DomCommand::SetText {
                    node: BUTTON,
                    text: "Send Message".into()
                },
                DomCommand::SetDisabled {
                    node: BUTTON,
                    disabled: false
                },
            ]
        );
        assert_eq!(form.settle(&SubmitOutcome::sent(), &mut out), None);
    }

    #[test]
    fn failure_keeps_fields() {
        let mut form = form();
        let mut out = Vec::new();
        form.submit(&valid(), &mut HostTransport, &mut out);
        assert!(matches!(out.last(), Some(DomCommand::Deliver { fields }) if fields.name == "Jo"));

        out.clear();
        let notice = form
            .settle(&SubmitOutcome::failed(""), &mut out)
            .expect("in flight");
        assert_eq!(notice.kind, ToastKind::Error);
        assert_eq!(notice.message, "Message could not be sent. Please try again.");
        assert!(!out.contains(&DomCommand::ResetForm { node: FORM }));
        assert_eq!(form.state(), FormState::Idle);
    }
}
