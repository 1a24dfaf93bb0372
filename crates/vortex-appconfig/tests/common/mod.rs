#![allow(dead_code)]
//! Scripted fetchers shared by the integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use vortex_appconfig::{
    AppConfigBackend, AppConfigSettings, ConfigFetcher, FetchFailure, FetchRequest, FetchedConfig,
};

/// One scripted reply: `Ok((version, content))` or `Err(message)`.
pub type Reply = Result<(&'static str, &'static str), &'static str>;

pub fn ok(version: &'static str, content: &'static str) -> Reply {
    Ok((version, content))
}

pub fn fail(message: &'static str) -> Reply {
    Err(message)
}

/// Replays a fixed list of replies, repeating the last one once exhausted,
/// and records every request it receives.
pub struct ScriptedFetcher {
    replies: Vec<Reply>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl ScriptedFetcher {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        assert!(!replies.is_empty(), "script needs at least one reply");
        Arc::new(Self {
            replies,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().clone()
    }

    pub fn known_versions(&self) -> Vec<Option<String>> {
        self.requests
            .lock()
            .iter()
            .map(|r| r.client_configuration_version().map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl ConfigFetcher for ScriptedFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedConfig, FetchFailure> {
        let reply = {
            let mut requests = self.requests.lock();
            requests.push(request.clone());
            let index = (requests.len() - 1).min(self.replies.len() - 1);
            self.replies[index]
        };

        match reply {
            Ok((version, content)) => {
                Ok(FetchedConfig::new(content.as_bytes().to_vec()).with_version(version))
            },
            Err(message) => Err(message.into()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Returns a new, strictly increasing version on every call. The content is
/// the version itself, zero padded so string order matches numeric order.
pub struct MonotonicFetcher {
    next: AtomicU64,
}

impl MonotonicFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next: AtomicU64::new(1),
        })
    }
}

#[async_trait]
impl ConfigFetcher for MonotonicFetcher {
    async fn fetch(&self, _request: &FetchRequest) -> Result<FetchedConfig, FetchFailure> {
        let version = format!("{:012}", self.next.fetch_add(1, Ordering::SeqCst));
        tokio::task::yield_now().await;
        Ok(FetchedConfig::new(version.clone().into_bytes()).with_version(version))
    }
}

/// Answers a first fetch at once, then holds every conditional fetch open
/// for `hold` before returning the same version.
pub struct LongPollFetcher {
    hold: Duration,
    calls: AtomicUsize,
}

impl LongPollFetcher {
    pub fn new(hold: Duration) -> Arc<Self> {
        Arc::new(Self {
            hold,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigFetcher for LongPollFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedConfig, FetchFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !request.is_first_fetch() {
            tokio::time::sleep(self.hold).await;
        }
        Ok(FetchedConfig::new(b"stable".to_vec()).with_version("v1"))
    }
}

pub fn settings() -> AppConfigSettings {
    AppConfigSettings::builder()
        .application("billing")
        .environment("prod")
        .client_id("test-client")
        .build()
        .expect("valid test settings")
}

pub fn backend(fetcher: Arc<dyn ConfigFetcher>) -> AppConfigBackend {
    AppConfigBackend::new(settings(), fetcher).expect("backend should build")
}
