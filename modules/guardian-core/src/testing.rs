// Test doubles for the news backend seam.
//
// - ScriptedBackend: fixed reply, records prompts and call count
// - FailingBackend: every call errors
// - SlowBackend: answers only after a delay, for timeout paths

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::news::TextBackend;

pub struct ScriptedBackend {
    reply: String,
    calls: AtomicUsize,
    user_prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
            user_prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_user_prompt(&self) -> Option<String> {
        self.user_prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextBackend for ScriptedBackend {
    async fn complete(&self, _system: &str, user: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.user_prompts.lock().unwrap().push(user.to_string());
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub struct FailingBackend;

#[async_trait]
impl TextBackend for FailingBackend {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
        bail!("FailingBackend: quota exceeded")
    }

    fn name(&self) -> &str {
        "failing"
    }
}

pub struct SlowBackend {
    delay: Duration,
    reply: String,
}

impl SlowBackend {
    pub fn new(delay: Duration, reply: impl Into<String>) -> Self {
        Self {
            delay,
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl TextBackend for SlowBackend {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "slow"
    }
}
