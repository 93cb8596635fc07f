//! Integration tests for the SMTP session.
//!
//! These tests drive the full submission sequence over a scripted
//! mock channel, without a real server or TLS stack.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use mailship_smtp::connection::{Channel, expect_reply};
use mailship_smtp::{Address, Credentials, Envelope, Error, Session, TlsOptions};

/// Mock channel returning scripted reply lines and capturing writes.
#[derive(Debug)]
struct MockChannel {
    replies: VecDeque<String>,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
    encrypted: bool,
}

impl MockChannel {
    fn new(replies: &[&str]) -> (Self, Arc<Mutex<Vec<Vec<u8>>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let channel = Self {
            replies: replies.iter().map(ToString::to_string).collect(),
            sent: Arc::clone(&sent),
            encrypted: false,
        };
        (channel, sent)
    }
}

impl Channel for MockChannel {
    async fn read_line(&mut self) -> mailship_smtp::Result<String> {
        self.replies.pop_front().ok_or_else(|| {
            Error::Connection(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "script exhausted",
            ))
        })
    }

    async fn write_all(&mut self, data: &[u8]) -> mailship_smtp::Result<()> {
        self.sent.lock().unwrap().push(data.to_vec());
        Ok(())
    }

    async fn upgrade(mut self, _hostname: &str, _tls: &TlsOptions) -> mailship_smtp::Result<Self> {
        assert!(!self.encrypted, "upgrade must happen exactly once");
        self.encrypted = true;
        Ok(self)
    }

    fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    async fn shutdown(&mut self) -> mailship_smtp::Result<()> {
        Ok(())
    }
}

/// Reply script for a fully successful session.
const HAPPY_PATH: &[&str] = &[
    "220 smtp.example.com ESMTP ready",
    "250-smtp.example.com",
    "250-STARTTLS",
    "250 OK",
    "220 Ready to start TLS",
    // TLS handshake happens here; no reply line is consumed.
    "250-smtp.example.com",
    "250-AUTH LOGIN PLAIN",
    "250 OK",
    "334 VXNlcm5hbWU6",
    "334 UGFzc3dvcmQ6",
    "235 Authentication succeeded",
    "250 Sender OK",
    "250 Recipient OK",
    "354 Start mail input",
    "250 Queued",
    "221 Bye",
];

fn credentials() -> Credentials {
    Credentials::new("user", "pass")
}

fn envelope_to(to: &str) -> Envelope {
    let mut env = Envelope::new(Address::new("sender@example.com").unwrap());
    env.to.push(Address::new(to).unwrap());
    env
}

fn sent_lines(sent: &Arc<Mutex<Vec<Vec<u8>>>>) -> Vec<String> {
    sent.lock()
        .unwrap()
        .iter()
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .collect()
}

#[tokio::test]
async fn full_session_sends_commands_in_order() {
    let (channel, sent) = MockChannel::new(HAPPY_PATH);
    let session = Session::new(channel, "smtp.example.com", credentials());

    let payload = b"Subject: Test\r\n\r\nHello\r\n.\r\n";
    session
        .send(&envelope_to("recipient@example.com"), payload)
        .await
        .unwrap();

    let expected = vec![
        "EHLO localhost\r\n".to_string(),
        "STARTTLS\r\n".to_string(),
        "EHLO localhost\r\n".to_string(),
        "AUTH LOGIN\r\n".to_string(),
        "dXNlcg==\r\n".to_string(),
        "cGFzcw==\r\n".to_string(),
        "MAIL FROM:<sender@example.com>\r\n".to_string(),
        "RCPT TO:<recipient@example.com>\r\n".to_string(),
        "DATA\r\n".to_string(),
        String::from_utf8_lossy(payload).into_owned(),
        "QUIT\r\n".to_string(),
    ];
    assert_eq!(sent_lines(&sent), expected);
}

#[tokio::test]
async fn auth_rejection_stops_before_mail_from() {
    // Same script up to the password turn, then a 530 instead of 235.
    let replies = [
        "220 smtp.example.com ESMTP ready",
        "250 OK",
        "220 Ready to start TLS",
        "250 OK",
        "334 VXNlcm5hbWU6",
        "334 UGFzc3dvcmQ6",
        "530 auth required",
    ];
    let (channel, sent) = MockChannel::new(&replies);
    let session = Session::new(channel, "smtp.example.com", credentials());

    let err = session
        .send(&envelope_to("recipient@example.com"), b".\r\n")
        .await
        .unwrap_err();

    match err {
        Error::UnexpectedReply {
            expected,
            actual,
            reply,
        } => {
            assert_eq!(expected, "235");
            assert_eq!(actual.as_deref(), Some("530"));
            assert!(reply.contains("auth required"));
        }
        other => panic!("expected UnexpectedReply, got {other:?}"),
    }

    let lines = sent_lines(&sent);
    assert!(
        !lines.iter().any(|line| line.starts_with("MAIL FROM")),
        "no MAIL FROM may be sent after an auth failure: {lines:?}"
    );
    assert!(!lines.iter().any(|line| line.starts_with("QUIT")));
}

#[tokio::test]
async fn bcc_only_message_addresses_its_first_bcc_entry() {
    let (channel, sent) = MockChannel::new(HAPPY_PATH);
    let session = Session::new(channel, "smtp.example.com", credentials());

    let mut envelope = Envelope::new(Address::new("sender@example.com").unwrap());
    envelope.bcc.push(Address::new("alice@example.com").unwrap());

    session.send(&envelope, b".\r\n").await.unwrap();

    let lines = sent_lines(&sent);
    assert!(lines.contains(&"RCPT TO:<alice@example.com>\r\n".to_string()));
    assert!(!lines.contains(&"RCPT TO:<>\r\n".to_string()));
}

#[tokio::test]
async fn no_recipients_sends_empty_angle_pair() {
    let (channel, sent) = MockChannel::new(HAPPY_PATH);
    let session = Session::new(channel, "smtp.example.com", credentials());

    let envelope = Envelope::new(Address::new("sender@example.com").unwrap());
    session.send(&envelope, b".\r\n").await.unwrap();

    assert!(sent_lines(&sent).contains(&"RCPT TO:<>\r\n".to_string()));
}

#[tokio::test]
async fn garbage_greeting_is_a_protocol_error() {
    let (channel, _sent) = MockChannel::new(&["hello there"]);
    let session = Session::new(channel, "smtp.example.com", credentials());

    let err = session
        .send(&envelope_to("recipient@example.com"), b".\r\n")
        .await
        .unwrap_err();

    match err {
        Error::UnexpectedReply {
            expected, actual, ..
        } => {
            assert_eq!(expected, "220");
            assert_eq!(actual, None);
        }
        other => panic!("expected UnexpectedReply, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_surfaces_as_connection_error() {
    // Empty script: the first read hits end of stream.
    let (channel, _sent) = MockChannel::new(&[]);
    let session = Session::new(channel, "smtp.example.com", credentials());

    let err = session
        .send(&envelope_to("recipient@example.com"), b".\r\n")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Connection(_)));
}

#[tokio::test]
async fn multi_line_reply_aggregates_in_order() {
    let (mut channel, _sent) = MockChannel::new(&["250-first", "250-second", "250 done"]);

    let texts = expect_reply(&mut channel, "250").await.unwrap();
    assert_eq!(texts, vec!["first", "second", "done"]);
}

#[tokio::test]
async fn multi_line_reply_matches_only_final_fragment() {
    let (mut channel, _sent) = MockChannel::new(&["250-first", "250-second", "500 done"]);

    let err = expect_reply(&mut channel, "250").await.unwrap_err();
    match err {
        Error::UnexpectedReply {
            expected,
            actual,
            reply,
        } => {
            assert_eq!(expected, "250");
            assert_eq!(actual.as_deref(), Some("500"));
            assert_eq!(reply, "first\nsecond\ndone");
        }
        other => panic!("expected UnexpectedReply, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_expected_code_always_fails() {
    let (mut channel, _sent) = MockChannel::new(&["250 OK"]);

    let err = expect_reply(&mut channel, "").await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedReply { .. }));
}

#[tokio::test]
async fn commands_after_upgrade_use_the_encrypted_channel() {
    // The mock flips its encrypted flag on upgrade; a session that
    // completes must have upgraded exactly once (asserted inside the
    // mock) before the authenticated half of the script.
    let (channel, sent) = MockChannel::new(HAPPY_PATH);
    let session = Session::new(channel, "smtp.example.com", credentials());

    session
        .send(&envelope_to("recipient@example.com"), b".\r\n")
        .await
        .unwrap();

    // STARTTLS is the last plaintext command in the transcript.
    let lines = sent_lines(&sent);
    let starttls = lines.iter().position(|l| l == "STARTTLS\r\n").unwrap();
    let auth = lines.iter().position(|l| l == "AUTH LOGIN\r\n").unwrap();
    assert!(starttls < auth);
}
