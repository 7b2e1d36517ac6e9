use crate::config::EmailSettings;
use anyhow::Context;
use chrono::NaiveDateTime;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Mutex;

const TIME_FMT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Notification stub. Five fixed plaintext templates over a single send
/// primitive: with no SMTP host configured the composed message is logged and
/// recorded in the outbox; otherwise it is relayed per message (connect,
/// optional auth, transmit, disconnect). Failures propagate, no retry.
pub struct Mailer {
    settings: EmailSettings,
    outbox: Mutex<Vec<OutboundEmail>>,
}

impl Mailer {
    pub fn new(settings: EmailSettings) -> Self {
        Self {
            settings,
            outbox: Mutex::new(Vec::new()),
        }
    }

    pub fn organizer_email(&self) -> Option<&str> {
        self.settings.organizer_email.as_deref()
    }

    /// Messages recorded while no SMTP host is configured.
    pub fn outbox(&self) -> Vec<OutboundEmail> {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub async fn send_event_created(
        &self,
        to: &str,
        recipient_name: &str,
        event_title: &str,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> anyhow::Result<()> {
        let subject = format!("New Event Scheduled: {}", event_title);
        let body = format!(
            "Dear {},\n\n\
             A new event has been scheduled:\n\n\
             Event: {}\n\
             Start Time: {}\n\
             End Time: {}\n\n\
             Please mark your calendar accordingly.\n\n\
             Best regards,\n\
             Healthcare Scheduling System",
            recipient_name,
            event_title,
            start_time.format(TIME_FMT),
            end_time.format(TIME_FMT),
        );
        self.send(to, &subject, &body).await
    }

    pub async fn send_event_updated(
        &self,
        to: &str,
        recipient_name: &str,
        event_title: &str,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> anyhow::Result<()> {
        let subject = format!("Event Updated: {}", event_title);
        let body = format!(
            "Dear {},\n\n\
             An event has been updated:\n\n\
             Event: {}\n\
             New Start Time: {}\n\
             New End Time: {}\n\n\
             Please update your calendar accordingly.\n\n\
             Best regards,\n\
             Healthcare Scheduling System",
            recipient_name,
            event_title,
            start_time.format(TIME_FMT),
            end_time.format(TIME_FMT),
        );
        self.send(to, &subject, &body).await
    }

    pub async fn send_event_cancelled(
        &self,
        to: &str,
        recipient_name: &str,
        event_title: &str,
    ) -> anyhow::Result<()> {
        let subject = format!("Event Cancelled: {}", event_title);
        let body = format!(
            "Dear {},\n\n\
             The following event has been cancelled:\n\n\
             Event: {}\n\n\
             Please remove this event from your calendar.\n\n\
             Best regards,\n\
             Healthcare Scheduling System",
            recipient_name, event_title,
        );
        self.send(to, &subject, &body).await
    }

    pub async fn send_attendee_invitation(
        &self,
        to: &str,
        recipient_name: &str,
        event_title: &str,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> anyhow::Result<()> {
        let subject = format!("You're Invited: {}", event_title);
        let body = format!(
            "Dear {},\n\n\
             You have been invited to attend the following event:\n\n\
             Event: {}\n\
             Start Time: {}\n\
             End Time: {}\n\n\
             Please confirm your attendance.\n\n\
             Best regards,\n\
             Healthcare Scheduling System",
            recipient_name,
            event_title,
            start_time.format(TIME_FMT),
            end_time.format(TIME_FMT),
        );
        self.send(to, &subject, &body).await
    }

    pub async fn send_attendee_status_changed(
        &self,
        organizer_email: &str,
        attendee_name: &str,
        event_title: &str,
        new_status: &str,
    ) -> anyhow::Result<()> {
        let subject = format!("Attendee Status Update: {}", event_title);
        let body = format!(
            "Dear Organizer,\n\n\
             An attendee has updated their status for your event:\n\n\
             Event: {}\n\
             Attendee: {}\n\
             New Status: {}\n\n\
             Best regards,\n\
             Healthcare Scheduling System",
            event_title, attendee_name, new_status,
        );
        self.send(organizer_email, &subject, &body).await
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        if self.settings.smtp_host.is_empty() {
            log::info!(
                "no SMTP host configured, recording email to {} (subject: {})",
                to,
                subject
            );
            self.outbox
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push(OutboundEmail {
                    to: to.to_string(),
                    subject: subject.to_string(),
                    body: body.to_string(),
                });
            return Ok(());
        }

        let from: Mailbox = if self.settings.from_name.is_empty() {
            self.settings.from_email.parse()
        } else {
            format!("{} <{}>", self.settings.from_name, self.settings.from_email).parse()
        }
        .context("invalid from address")?;

        let message = Message::builder()
            .from(from)
            .to(to.parse().context("invalid recipient address")?)
            .subject(subject)
            .body(body.to_string())
            .context("compose email")?;

        let mut builder = if self.settings.enable_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.smtp_host)
                .context("SMTP transport")?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.settings.smtp_host)
        };
        builder = builder.port(self.settings.smtp_port);
        if !self.settings.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                self.settings.username.clone(),
                self.settings.password.clone(),
            ));
        }

        match builder.build().send(message).await {
            Ok(_) => {
                log::info!("email sent to {}", to);
                Ok(())
            }
            Err(err) => {
                log::error!("failed to send email to {}: {}", to, err);
                Err(err).context("SMTP send")
            }
        }
    }
}

#[cfg(test)]
pub fn test_mailer() -> Mailer {
    Mailer::new(EmailSettings::default())
}

#[cfg(test)]
pub fn test_mailer_with_organizer(organizer: &str) -> Mailer {
    Mailer::new(EmailSettings {
        organizer_email: Some(organizer.to_string()),
        ..EmailSettings::default()
    })
}
