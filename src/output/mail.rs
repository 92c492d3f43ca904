use crate::config::MailConfig;
use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::PathBuf;
use tracing::info;

pub fn build_message(
    mail: &MailConfig,
    subject: &str,
    html: String,
    attachments: &[PathBuf],
) -> Result<Message> {
    let from: Mailbox = mail
        .username
        .parse()
        .with_context(|| format!("Invalid sender address {}", mail.username))?;

    let mut builder = Message::builder().from(from).subject(subject);
    for recipient in &mail.recipients {
        let to: Mailbox = recipient
            .parse()
            .with_context(|| format!("Invalid recipient address {}", recipient))?;
        builder = builder.to(to);
    }

    let mut body = MultiPart::mixed().singlepart(SinglePart::html(html));
    for path in attachments {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read attachment {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        let content_type = ContentType::parse("application/octet-stream")?;
        body = body.singlepart(Attachment::new(name).body(bytes, content_type));
    }

    builder
        .multipart(body)
        .context("Failed to build digest message")
}

/// Send the digest over implicit-TLS SMTP with the configured credentials
pub async fn send_digest(
    mail: &MailConfig,
    subject: &str,
    html: String,
    attachments: &[PathBuf],
) -> Result<()> {
    let message = build_message(mail, subject, html, attachments)?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&mail.smtp_host)
        .with_context(|| format!("Failed to set up SMTP relay {}", mail.smtp_host))?
        .port(mail.smtp_port)
        .credentials(Credentials::new(mail.username.clone(), mail.password.clone()))
        .build();

    transport
        .send(message)
        .await
        .context("Failed to send digest mail")?;

    info!("📧 Sent digest to {} recipients", mail.recipients.len());
    Ok(())
}
