//! Per-chat serialization: every chat gets an unbounded queue drained by one worker task, so a
//! chat's messages run through the handler chain in arrival order while different chats run
//! concurrently. A worker that stays idle past the idle timeout retires and drops its queue.
//!
//! **Data flow:** `dispatch` → chat queue → `process_queue_loop` → `HandlerChain::handle`.

use dashmap::DashMap;
use handler_chain::HandlerChain;
use kiwai_core::Message;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// How long a chat worker waits for its next message before retiring.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Sender to one chat's processing queue.
type QueueSender = mpsc::UnboundedSender<Message>;

type QueueMap = Arc<DashMap<i64, QueueSender>>;

/// Routes messages to per-chat workers. Must be used inside a Tokio runtime.
pub struct ChatDispatcher {
    chain: Arc<HandlerChain>,
    message_queues: QueueMap,
    idle_timeout: Duration,
}

impl ChatDispatcher {
    pub fn new(chain: HandlerChain) -> Self {
        Self {
            chain: Arc::new(chain),
            message_queues: Arc::new(DashMap::new()),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Enqueues `message` on its chat's queue and returns immediately.
    pub fn dispatch(&self, message: Message) {
        let chat_id = message.chat.id;
        // Send while holding the entry so a retiring worker cannot miss the message.
        let result = {
            let tx = self
                .message_queues
                .entry(chat_id)
                .or_insert_with(|| self.spawn_worker(chat_id));
            tx.send(message)
        };

        if let Err(mpsc::error::SendError(message)) = result {
            warn!(chat_id = chat_id, "Chat worker gone, restarting it");
            let tx = self.spawn_worker(chat_id);
            if tx.send(message).is_err() {
                error!(chat_id = chat_id, "Failed to send message to queue (receiver dropped)");
                return;
            }
            self.message_queues.insert(chat_id, tx);
        }
    }

    /// Number of chats that have a live worker.
    pub fn active_chats(&self) -> usize {
        self.message_queues.len()
    }

    fn spawn_worker(&self, chat_id: i64) -> QueueSender {
        let (tx, rx) = mpsc::unbounded_channel::<Message>();
        debug!(chat_id = chat_id, "Starting chat worker");
        tokio::spawn(Self::process_queue_loop(
            rx,
            tx.clone(),
            self.chain.clone(),
            self.message_queues.clone(),
            chat_id,
            self.idle_timeout,
        ));
        tx
    }

    /// Consumes the chat's queue one message at a time until it has been idle for `idle_timeout`.
    async fn process_queue_loop(
        mut rx: mpsc::UnboundedReceiver<Message>,
        own_tx: QueueSender,
        chain: Arc<HandlerChain>,
        queues: QueueMap,
        chat_id: i64,
        idle_timeout: Duration,
    ) {
        loop {
            let message = match tokio::time::timeout(idle_timeout, rx.recv()).await {
                Ok(Some(message)) => message,
                Ok(None) => break,
                Err(_) => {
                    // Only retire if the map still points at this worker and nothing is queued.
                    let retired = queues
                        .remove_if(&chat_id, |_, tx| tx.same_channel(&own_tx) && rx.is_empty())
                        .is_some();
                    if retired {
                        debug!(chat_id = chat_id, "Chat worker idle, retiring");
                        break;
                    }
                    continue;
                }
            };
            info!(
                chat_id = chat_id,
                message_id = %message.id,
                "Processing queued message"
            );
            if let Err(e) = chain.handle(&message).await {
                error!(error = %e, chat_id = chat_id, user_id = message.user.id, "Failed to process queued message");
            }
        }
        debug!(chat_id = chat_id, "Chat worker stopped");
    }
}
