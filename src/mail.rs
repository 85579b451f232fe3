use async_trait::async_trait;
use tracing::{info, trace};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Delivers mail into the log stream. Stands in for an SMTP relay in
/// development and in deployments that forward logs to a mail bridge.
#[derive(Clone)]
pub struct LogMailer {
    sender: String,
}

impl LogMailer {
    pub fn new(sender: &str) -> Self {
        Self {
            sender: sender.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        anyhow::ensure!(!to.trim().is_empty(), "mail recipient is empty");
        info!(from = %self.sender, %to, %subject, "mail sent");
        trace!(%to, %body, "mail body");
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentMail {
        pub to: String,
        pub subject: String,
        pub body: String,
    }

    /// Records every message instead of delivering it.
    #[derive(Default)]
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<SentMail>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
            self.sent.lock().unwrap().push(SentMail {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
            Ok(())
        }
    }
}
