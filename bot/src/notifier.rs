//! Best-effort delivery of chat messages.

use homework_core::{NotifyError, TelegramClient};
use tracing::{debug, error};

use crate::transport::Transport;

/// Sends text to the configured chat exactly once per call. Failures are
/// logged and swallowed; nothing is queued for later.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: TelegramClient,
}

impl Notifier {
    pub fn new(client: TelegramClient) -> Self {
        Self { client }
    }

    /// Returns whether Telegram accepted the message.
    pub fn send<T: Transport + ?Sized>(&self, transport: &T, message: &str) -> bool {
        match self.try_send(transport, message) {
            Ok(()) => {
                debug!(chat_id = self.client.chat_id(), text = message, "message sent");
                true
            }
            Err(err) => {
                error!(chat_id = self.client.chat_id(), error = %err, "failed to send message to Telegram");
                false
            }
        }
    }

    fn try_send<T: Transport + ?Sized>(&self, transport: &T, message: &str) -> Result<(), NotifyError> {
        let request = self.client.build_send_message(message)?;
        let response = transport
            .execute(request)
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        self.client.parse_send_message(response)
    }
}
