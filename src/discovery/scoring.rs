//! Turns raw hits into ranked server and client candidates.
//!
//! Ranking is a pure function of the hit list, the learning record and the
//! config: no I/O, no shared state.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::DiscoveryConfig;
use crate::discovery::{Hit, LearningRecord, Role, SourceType};
use crate::util::contains_any;

/// Source weights, bonuses and penalties. Empirical; retune freely as long as
/// the source ordering is kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreWeights {
    pub learned: i64,
    pub server_dir_companion: i64,
    pub steam: i64,
    pub recent_shortcut: i64,
    pub registry: i64,
    pub common_path: i64,
    pub user_dir: i64,
    pub deep_walk: i64,
    pub folder_pattern: i64,
    /// Sources without a weight of their own (known locations).
    pub fallback: i64,
    pub depth_penalty: i64,
    pub keyword_bonus: i64,
    pub games_bonus: i64,
    pub store_dir_bonus: i64,
    pub shortcut_bonus: i64,
    pub learned_bonus: i64,
    pub failed_penalty: i64,
    pub potential_penalty: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            learned: 150,
            server_dir_companion: 140,
            steam: 120,
            recent_shortcut: 110,
            registry: 100,
            common_path: 80,
            user_dir: 60,
            deep_walk: 40,
            folder_pattern: 20,
            fallback: 20,
            depth_penalty: 10,
            keyword_bonus: 30,
            games_bonus: 20,
            store_dir_bonus: 25,
            shortcut_bonus: 15,
            learned_bonus: 50,
            failed_penalty: 30,
            potential_penalty: 20,
        }
    }
}

impl ScoreWeights {
    pub fn source_weight(&self, source: SourceType) -> i64 {
        match source {
            SourceType::Learned => self.learned,
            SourceType::ServerDirCompanion => self.server_dir_companion,
            SourceType::Steam => self.steam,
            SourceType::RecentShortcut => self.recent_shortcut,
            SourceType::Registry => self.registry,
            SourceType::CommonPath => self.common_path,
            SourceType::UserDir => self.user_dir,
            SourceType::DeepWalk => self.deep_walk,
            SourceType::FolderPattern => self.folder_pattern,
            SourceType::KnownLocation | SourceType::Process | SourceType::ProbeError => self.fallback,
        }
    }
}

/// A hit promoted to a role, with its score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub role: Role,
    pub path: PathBuf,
    pub source_type: SourceType,
    pub depth: u32,
    pub score: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidates {
    pub server: Vec<Candidate>,
    pub client: Vec<Candidate>,
}

impl RankedCandidates {
    pub fn best(&self, role: Role) -> Option<&Candidate> {
        match role {
            Role::Server => self.server.first(),
            Role::Client => self.client.first(),
        }
    }
}

/// Seeds learned paths, scores and classifies every executable hit, and sorts
/// each role by descending score (stable, so ties keep discovery order).
///
/// Hits sharing a path collapse into one candidate at the position of the
/// first occurrence. A later duplicate from a higher-weight source replaces
/// it; learned seeds are never replaced.
pub fn rank(hits: &[Hit], record: &LearningRecord, config: &DiscoveryConfig) -> RankedCandidates {
    let weights = &config.weights;
    let mut pool: Vec<Candidate> = Vec::new();
    let mut by_path: HashMap<PathBuf, usize> = HashMap::new();

    for learned in &record.successful_paths {
        let path = PathBuf::from(learned);
        let Some(role) = executable_role(&path, config) else {
            continue;
        };
        if by_path.contains_key(&path) {
            continue;
        }
        by_path.insert(path.clone(), pool.len());
        pool.push(Candidate {
            role,
            path,
            source_type: SourceType::Learned,
            depth: 0,
            score: clamp_score(weights.learned),
        });
    }

    for hit in hits {
        let Some(path) = hit.executable_path() else {
            continue;
        };
        let (role, fuzzy) = match executable_role(path, config) {
            Some(role) => (role, false),
            None if hit.potential && has_executable_name(path, config) => (Role::Client, true),
            None => continue,
        };

        let mut score = score_hit(hit, path, record, config);
        if fuzzy {
            score -= weights.potential_penalty;
        }
        let candidate = Candidate {
            role,
            path: path.to_path_buf(),
            source_type: hit.source_type,
            depth: hit.depth,
            score: clamp_score(score),
        };

        match by_path.get(path) {
            Some(&at) => {
                let existing = &pool[at];
                if existing.source_type != SourceType::Learned
                    && weights.source_weight(candidate.source_type) > weights.source_weight(existing.source_type)
                {
                    pool[at] = candidate;
                }
            }
            None => {
                by_path.insert(candidate.path.clone(), pool.len());
                pool.push(candidate);
            }
        }
    }

    let (mut server, mut client): (Vec<_>, Vec<_>) = pool.into_iter().partition(|c| c.role == Role::Server);
    server.sort_by_key(|c| Reverse(c.score));
    client.sort_by_key(|c| Reverse(c.score));
    RankedCandidates { server, client }
}

fn has_executable_name(path: &Path, config: &DiscoveryConfig) -> bool {
    path.file_name()
        .map(|n| config.is_executable(&n.to_string_lossy()))
        .unwrap_or(false)
}

fn executable_role(path: &Path, config: &DiscoveryConfig) -> Option<Role> {
    let name = path.file_name()?.to_string_lossy();
    if !config.is_executable(&name) {
        return None;
    }
    config.classify(&name)
}

/// Unclamped score of one hit: source weight, depth penalty, bonuses, penalties.
pub fn score_hit(hit: &Hit, path: &Path, record: &LearningRecord, config: &DiscoveryConfig) -> i64 {
    let weights = &config.weights;
    let path_str = path.to_string_lossy();
    let lower = path_str.to_lowercase();

    let mut score = weights.source_weight(hit.source_type) - weights.depth_penalty * i64::from(hit.depth);

    if contains_any(&lower, &config.keywords) {
        score += weights.keyword_bonus;
    }
    if lower.contains("games") {
        score += weights.games_bonus;
    }
    if hit.source_type == SourceType::Steam && in_store_game_dir(path, config) {
        score += weights.store_dir_bonus;
    }
    if hit.source_type == SourceType::RecentShortcut {
        score += weights.shortcut_bonus;
    }
    if record.is_successful(&path_str) {
        score += weights.learned_bonus;
    }
    if record.has_failed(&path_str) {
        score -= weights.failed_penalty;
    }
    score
}

fn in_store_game_dir(path: &Path, config: &DiscoveryConfig) -> bool {
    path.components().any(|c| {
        let part = c.as_os_str().to_string_lossy();
        config
            .store_game_dirs
            .iter()
            .any(|d| d.eq_ignore_ascii_case(&part))
    })
}

fn clamp_score(score: i64) -> u32 {
    u32::try_from(score.max(0)).unwrap_or(u32::MAX)
}
