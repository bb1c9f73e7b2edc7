//! Runs every probe, adds companion hits, ranks, and reports.

use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::task::JoinSet;

use crate::config::DiscoveryConfig;
use crate::discovery::companion::find_companion;
use crate::discovery::confidence::confidence;
use crate::discovery::names::{self, PathValidation, Role};
use crate::discovery::probes::{default_probes, Probe};
use crate::discovery::scoring::{rank, RankedCandidates};
use crate::discovery::{DiscoveryResult, Environment, Hit, LearningRecord, LearningStore, SourceType};
use crate::error::Result;
use crate::util::expand_tilde;

/// Owns everything one discovery run needs. Cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct Discovery {
    env: Arc<Environment>,
    config: Arc<DiscoveryConfig>,
    store: LearningStore,
    probes: Vec<Probe>,
}

impl Discovery {
    pub fn new(env: Environment, config: DiscoveryConfig, store: LearningStore) -> Self {
        Self {
            env: Arc::new(env),
            config: Arc::new(config),
            store,
            probes: default_probes(),
        }
    }

    /// Discovery over this host's locations, user config and learning store.
    pub fn for_host() -> Result<Self> {
        Ok(Self::new(
            Environment::detect(),
            DiscoveryConfig::load(),
            LearningStore::open_default()?,
        ))
    }

    /// Replaces the probe set (tests, partial scans).
    pub fn with_probes(mut self, probes: Vec<Probe>) -> Self {
        self.probes = probes;
        self
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn store(&self) -> &LearningStore {
        &self.store
    }

    /// Full run. Never fails: probe errors become `ProbeError` hits.
    pub async fn detect_paths(&self) -> DiscoveryResult {
        let (record, hits) = self.collect_hits().await;
        let ranked = rank(&hits, &record, &self.config);
        let result = self.summarize(&ranked, hits);
        tracing::info!(
            server = %result.server_path,
            client = %result.client_path,
            confidence = result.confidence,
            hits = result.search_results.len(),
            "discovery finished"
        );
        result
    }

    /// Candidate lists without the summary, for diagnostics.
    pub async fn rank_candidates(&self) -> RankedCandidates {
        let (record, hits) = self.collect_hits().await;
        rank(&hits, &record, &self.config)
    }

    /// Feeds a launch attempt back into the learning store.
    pub fn record_launch_outcome(&self, server_path: &str, client_path: &str, success: bool) -> LearningRecord {
        let server_path = normalize(server_path);
        let client_path = normalize(client_path);
        self.store.record_outcome(&server_path, &client_path, success)
    }

    pub fn validate_path(&self, path: &str, role: Role) -> PathValidation {
        names::validate_path(&self.config, Path::new(&expand_tilde(path)), role)
    }

    fn summarize(&self, ranked: &RankedCandidates, hits: Vec<Hit>) -> DiscoveryResult {
        let path_of = |role| {
            ranked
                .best(role)
                .map(|c| c.path.to_string_lossy().to_string())
                .unwrap_or_default()
        };
        DiscoveryResult {
            server_path: path_of(Role::Server),
            client_path: path_of(Role::Client),
            confidence: confidence(&ranked.server, &ranked.client),
            search_results: hits,
        }
    }

    /// Learned seeds first, then probe output, then companions of every server
    /// found so far (learned ones included).
    async fn collect_hits(&self) -> (LearningRecord, Vec<Hit>) {
        let record = self.store.load().retain_existing();

        let mut hits: Vec<Hit> = record
            .successful_paths
            .iter()
            .map(|p| Hit::file(SourceType::Learned, p))
            .collect();
        hits.extend(self.run_probes().await);
        let companions = self.companion_hits(&hits).await;
        hits.extend(companions);
        (record, hits)
    }

    /// Fans every probe out onto the blocking pool and joins them. Output is
    /// reassembled in registration order regardless of completion order.
    async fn run_probes(&self) -> Vec<Hit> {
        let mut set = JoinSet::new();
        for (index, probe) in self.probes.iter().copied().enumerate() {
            let env = Arc::clone(&self.env);
            let config = Arc::clone(&self.config);
            set.spawn_blocking(move || {
                let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| (probe.run)(&env, &config)));
                let hits = match outcome {
                    Ok(Ok(hits)) => {
                        tracing::debug!(probe = probe.name, hits = hits.len(), "probe finished");
                        hits
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(probe = probe.name, error = %e, "probe failed");
                        vec![Hit::probe_error(probe.name, e)]
                    }
                    Err(payload) => {
                        let message = panic_message(payload.as_ref());
                        tracing::warn!(probe = probe.name, %message, "probe panicked");
                        vec![Hit::probe_error(probe.name, message)]
                    }
                };
                (index, hits)
            });
        }

        let mut slots: Vec<Vec<Hit>> = vec![Vec::new(); self.probes.len()];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, hits)) => slots[index] = hits,
                Err(e) => {
                    tracing::warn!(error = %e, "probe task did not complete");
                    slots.push(vec![Hit::probe_error("task", e)]);
                }
            }
        }
        slots.into_iter().flatten().collect()
    }

    /// Companion search beside every distinct server executable.
    async fn companion_hits(&self, hits: &[Hit]) -> Vec<Hit> {
        let mut server_paths: Vec<PathBuf> = Vec::new();
        for path in hits.iter().filter_map(Hit::executable_path) {
            let is_server = path
                .file_name()
                .is_some_and(|n| self.config.is_server_name(&n.to_string_lossy()));
            let dir_seen = server_paths.iter().any(|p| p.parent() == path.parent());
            if is_server && !dir_seen {
                server_paths.push(path.to_path_buf());
            }
        }

        let tasks = server_paths.into_iter().map(|server| {
            let config = Arc::clone(&self.config);
            tokio::task::spawn_blocking(move || find_companion(&server, &config))
        });
        join_all(tasks)
            .await
            .into_iter()
            .flat_map(|joined| match joined {
                Ok(hits) => hits,
                Err(e) => vec![Hit::probe_error("companion", e)],
            })
            .collect()
    }
}

fn normalize(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        expand_tilde(path)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "probe panicked".to_string()
    }
}
