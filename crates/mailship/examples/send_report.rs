#![allow(clippy::expect_used, clippy::uninlined_format_args)]
//! Example: send a message with an attachment through a submission server
//!
//! Connects on port 587, upgrades with STARTTLS, authenticates with
//! AUTH LOGIN, and submits one multipart message.
//!
//! ## Running
//!
//! ```bash
//! cargo run --package mailship --example send_report
//! ```

use mailship::{Mailbox, Message, SmtpServer, send};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailship=debug".into()),
        )
        .init();

    print!("SMTP server hostname: ");
    io::stdout().flush()?;
    let mut host = String::new();
    io::stdin().read_line(&mut host)?;
    let host = host.trim();

    print!("Username: ");
    io::stdout().flush()?;
    let mut username = String::new();
    io::stdin().read_line(&mut username)?;
    let username = username.trim();

    print!("Password: ");
    io::stdout().flush()?;
    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    let password = password.trim();

    print!("Recipient: ");
    io::stdout().flush()?;
    let mut recipient = String::new();
    io::stdin().read_line(&mut recipient)?;
    let recipient = recipient.trim();

    let server = SmtpServer::new(host, 587, username, password);

    let message = Message::new(
        Mailbox::new(username),
        "mailship test message",
        "Hello from mailship.\n\nThis message was submitted over STARTTLS.",
    )
    .to(Mailbox::new(recipient));

    println!("\nSending via {}:587...", host);
    send(&server, &message).await?;
    println!("✓ Message accepted");

    Ok(())
}
