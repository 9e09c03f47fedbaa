use crate::mailer::{MailError, Mailer, OutboundEmail};
use crate::{AppState, SiteConfig};
use askama::Template;
use axum::http::StatusCode;
use axum::Json;
use patchline_model::{ContactSubmission, QuoteSubmission};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

/// Caller-visible envelope for both form endpoints.
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// One capability behind both form endpoints: the variant selects the
/// payload shape and the email templates.
pub enum Lead {
    Contact(ContactSubmission),
    Quote(QuoteSubmission),
}

#[derive(Template)]
#[template(path = "emails/contact_notification.html")]
struct ContactNotificationEmail<'a> {
    lead: &'a ContactSubmission,
}

#[derive(Template)]
#[template(path = "emails/quote_notification.html")]
struct QuoteNotificationEmail<'a> {
    lead: &'a QuoteSubmission,
}

#[derive(Template)]
#[template(path = "emails/contact_confirmation.html")]
struct ContactConfirmationEmail<'a> {
    lead: &'a ContactSubmission,
    company_name: &'a str,
    company_phone: &'a str,
}

#[derive(Template)]
#[template(path = "emails/quote_confirmation.html")]
struct QuoteConfirmationEmail<'a> {
    lead: &'a QuoteSubmission,
    company_name: &'a str,
    company_phone: &'a str,
}

fn render<T: Template>(template: &T) -> Result<String, MailError> {
    template.render().map_err(|e| MailError::Build(e.to_string()))
}

impl Lead {
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Lead::Contact(_) => "contact",
            Lead::Quote(_) => "quote",
        }
    }

    #[must_use]
    pub fn submitter_email(&self) -> &str {
        match self {
            Lead::Contact(c) => c.email.trim(),
            Lead::Quote(q) => q.email.trim(),
        }
    }

    fn display_name(&self) -> String {
        let name = match self {
            Lead::Contact(c) => c.full_name(),
            Lead::Quote(q) => q.full_name(),
        };
        if name.is_empty() {
            "website visitor".to_string()
        } else {
            name
        }
    }

    fn notification_subject(&self) -> String {
        match self {
            Lead::Contact(_) => format!("New contact lead: {}", self.display_name()),
            Lead::Quote(_) => format!("New quote request: {}", self.display_name()),
        }
    }

    fn confirmation_subject(&self, site: &SiteConfig) -> String {
        match self {
            Lead::Contact(_) => format!("Thanks for contacting {}", site.company_name),
            Lead::Quote(_) => format!("Your quote request with {}", site.company_name),
        }
    }

    fn notification_html(&self) -> Result<String, MailError> {
        match self {
            Lead::Contact(lead) => render(&ContactNotificationEmail { lead }),
            Lead::Quote(lead) => render(&QuoteNotificationEmail { lead }),
        }
    }

    fn confirmation_html(&self, site: &SiteConfig) -> Result<String, MailError> {
        match self {
            Lead::Contact(lead) => render(&ContactConfirmationEmail {
                lead,
                company_name: &site.company_name,
                company_phone: &site.company_phone,
            }),
            Lead::Quote(lead) => render(&QuoteConfirmationEmail {
                lead,
                company_name: &site.company_name,
                company_phone: &site.company_phone,
            }),
        }
    }

    fn notification_email(&self, site: &SiteConfig) -> Result<OutboundEmail, MailError> {
        let reply_to = self.submitter_email();
        Ok(OutboundEmail {
            from: site.mail_from.clone(),
            to: site.notify_recipients.clone(),
            reply_to: if reply_to.is_empty() {
                None
            } else {
                Some(reply_to.to_string())
            },
            subject: self.notification_subject(),
            html: self.notification_html()?,
        })
    }

    /// `None` when the submitter left no address to confirm to.
    fn confirmation_email(&self, site: &SiteConfig) -> Result<Option<OutboundEmail>, MailError> {
        let submitter = self.submitter_email();
        if submitter.is_empty() {
            return Ok(None);
        }
        Ok(Some(OutboundEmail {
            from: site.mail_from.clone(),
            to: vec![submitter.to_string()],
            reply_to: None,
            subject: self.confirmation_subject(site),
            html: self.confirmation_html(site)?,
        }))
    }
}

fn envelope(success: bool, message: String, data: Option<Value>) -> Json<LeadResponse> {
    Json(LeadResponse {
        success,
        message,
        data,
    })
}

/// Accepts a lead, checks the delivery configuration up front, and sends the
/// staff notification followed by the submitter confirmation. Only the
/// notification send can fail the request; a failed confirmation is logged
/// and swallowed.
pub async fn submit_lead(state: &AppState, lead: Lead) -> (StatusCode, Json<LeadResponse>) {
    let site = state.site.as_ref();

    // All delivery preconditions are checked together, before any network
    // I/O. The statuses stay distinct: missing credential is a 503 outage,
    // missing recipients is a server-side misconfiguration.
    let Some(mailer) = state.mailer.as_ref() else {
        warn!(
            lead = lead.tag(),
            "lead rejected: mail provider credential not configured"
        );
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            envelope(
                false,
                format!(
                    "Our online forms are temporarily down. Please call us at {} and we'll help right away.",
                    site.company_phone
                ),
                None,
            ),
        );
    };
    if site.notify_recipients.is_empty() {
        error!(
            lead = lead.tag(),
            "lead rejected: no staff notification addresses configured"
        );
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            envelope(
                false,
                format!(
                    "We could not take your request online. Please call us at {}.",
                    site.company_phone
                ),
                None,
            ),
        );
    }

    let failure_message = format!(
        "Something went wrong sending your request. Please try again, or call us at {}.",
        site.company_phone
    );

    let notification = match lead.notification_email(site) {
        Ok(v) => v,
        Err(e) => {
            error!(lead = lead.tag(), error = %e, "notification email build failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                envelope(false, failure_message, None),
            );
        }
    };

    let data = match mailer.send(&notification).await {
        Ok(v) => v,
        Err(e) => {
            // Provider detail stays in the logs; the caller gets generic copy.
            error!(
                lead = lead.tag(),
                provider = mailer.provider_tag(),
                error = %e,
                "staff notification send failed"
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                envelope(false, failure_message, None),
            );
        }
    };

    match lead.confirmation_email(site) {
        Ok(Some(confirmation)) => {
            if let Err(e) = mailer.send(&confirmation).await {
                warn!(
                    lead = lead.tag(),
                    error = %e,
                    "confirmation send failed; lead was already delivered to staff"
                );
            }
        }
        Ok(None) => {}
        Err(e) => {
            warn!(lead = lead.tag(), error = %e, "confirmation email build failed");
        }
    }

    info!(
        lead = lead.tag(),
        provider = mailer.provider_tag(),
        "lead delivered"
    );
    let message = match &lead {
        Lead::Contact(_) => {
            "Thanks for reaching out. We'll get back to you within one business day.".to_string()
        }
        Lead::Quote(_) => {
            "Your quote request is in. We'll follow up with an estimate shortly.".to_string()
        }
    };
    (StatusCode::OK, envelope(true, message, Some(data)))
}
