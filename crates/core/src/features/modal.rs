use vitae_protocol::{CertificateMarkup, DomCommand, ModalMarkup, NodeId, StyleProperty};

/// Certificate preview dialog.
#[derive(Debug, Clone)]
pub struct CertificateModal {
    markup: ModalMarkup,
    certificates: Vec<CertificateMarkup>,
    open: bool,
}

impl CertificateModal {
    pub fn new(markup: ModalMarkup, certificates: Vec<CertificateMarkup>) -> Self {
        Self {
            markup,
            certificates,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns whether the click was handled.
    pub fn on_click(&mut self, node: NodeId, out: &mut Vec<DomCommand>) -> bool {
        if let Some(cert) = self.certificates.iter().find(|c| c.node == node) {
            match cert.image.as_deref().filter(|src| !src.trim().is_empty()) {
                Some(src) => {
                    if let Some(image) = self.markup.image {
                        out.push(DomCommand::SetAttribute {
                            node: image,
                            name: "src".into(),
                            value: src.into(),
                        });
                    }
                    if let Some(title) = self.markup.title {
                        out.push(DomCommand::SetText {
                            node: title,
                            text: cert.title.as_deref().unwrap_or_default().into(),
                        });
                    }
                    out.push(DomCommand::SetStyle {
                        node: self.markup.modal,
                        property: StyleProperty::Display,
                        value: "block".into(),
                    });
                    out.push(DomCommand::LockScroll { locked: true });
                    self.open = true;
                }
                None => {
                    if let Some(href) = cert.href.as_deref().filter(|h| !h.is_empty() && *h != "#") {
                        out.push(DomCommand::OpenUrl { href: href.into() });
                    }
                }
            }
            return true;
        }

        let closes = Some(node) == self.markup.close || node == self.markup.modal;
        if closes && self.open {
            self.close(out);
            return true;
        }
        false
    }

    pub fn on_escape(&mut self, out: &mut Vec<DomCommand>) -> bool {
        if !self.open {
            return false;
        }
        self.close(out);
        true
    }

    fn close(&mut self, out: &mut Vec<DomCommand>) {
        self.open = false;
        out.push(DomCommand::SetStyle {
            node: self.markup.modal,
            property: StyleProperty::Display,
            value: "none".into(),
        });
        out.push(DomCommand::LockScroll { locked: false });
    }
}
