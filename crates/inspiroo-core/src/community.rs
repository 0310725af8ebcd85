// Community feed: an in-memory, newest-first list of shared sparks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::AnalysisResult;
use crate::catalog::SEED_SPARKS;
use crate::identity::{generate_id, User};

/// Tags attached to a spark saved from a fresh analysis.
pub const NEW_SPARK_TAGS: &[&str] = &["Novo", "Rascunho"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunitySpark {
    pub id: String,
    pub author: String,
    pub concept: String,
    pub full_description: Option<String>,
    pub tags: Vec<String>,
    pub likes: u32,
    pub liked_by_current_user: bool,
    /// `None` for sparks that shipped with the app.
    pub shared_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunityFeed {
    sparks: Vec<CommunitySpark>,
}

impl CommunityFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed populated with the built-in sparks, in catalog order.
    pub fn seeded() -> Self {
        let sparks = SEED_SPARKS
            .iter()
            .map(|s| CommunitySpark {
                id: s.id.to_string(),
                author: s.author.to_string(),
                concept: s.concept.to_string(),
                full_description: Some(s.full_description.to_string()),
                tags: s.tags.iter().map(|t| t.to_string()).collect(),
                likes: s.likes,
                liked_by_current_user: false,
                shared_at: None,
            })
            .collect();
        CommunityFeed { sparks }
    }

    pub fn sparks(&self) -> &[CommunitySpark] {
        &self.sparks
    }

    pub fn len(&self) -> usize {
        self.sparks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CommunitySpark> {
        self.sparks.iter().find(|s| s.id == id)
    }

    /// Flip the current user's like on `id`, moving the counter in lockstep.
    /// Returns the updated spark, or `None` if the id is unknown.
    pub fn toggle_like(&mut self, id: &str) -> Option<&CommunitySpark> {
        let spark = self.sparks.iter_mut().find(|s| s.id == id)?;
        spark.liked_by_current_user = !spark.liked_by_current_user;
        spark.likes = if spark.liked_by_current_user {
            spark.likes.saturating_add(1)
        } else {
            spark.likes.saturating_sub(1)
        };
        debug!(id, likes = spark.likes, liked = spark.liked_by_current_user, "like toggled");
        Some(&*spark)
    }

    /// Prepend a spark condensed from `result`, authored by `user`.
    pub fn save_result(&mut self, user: &User, result: &AnalysisResult) -> &CommunitySpark {
        let spark = CommunitySpark {
            id: generate_id("spark"),
            author: user.name.clone(),
            concept: result.concept_line(),
            full_description: Some(result.spark_translation.clone()),
            tags: NEW_SPARK_TAGS.iter().map(|t| t.to_string()).collect(),
            likes: 0,
            liked_by_current_user: false,
            shared_at: Some(Utc::now()),
        };
        self.sparks.insert(0, spark);
        &self.sparks[0]
    }

    /// Whether `user` already pinned `result` to the mural.
    pub fn has_saved(&self, user: &User, result: &AnalysisResult) -> bool {
        saved_by(&self.sparks, user, result)
    }

    /// Simulated connection request to a spark's author. Returns the
    /// confirmation message, or `None` if the id is unknown.
    pub fn connect(&self, id: &str) -> Option<String> {
        let spark = self.get(id)?;
        Some(format!(
            "Solicitação de conexão enviada para {} (ideia #{}). (Simulação)",
            spark.author, spark.id
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// A spark counts as `user`'s copy of `result` when it was shared by them
/// and carries the same concept line. Seeded sparks are never shared.
pub fn saved_by(sparks: &[CommunitySpark], user: &User, result: &AnalysisResult) -> bool {
    let concept = result.concept_line();
    sparks
        .iter()
        .any(|s| s.shared_at.is_some() && s.author == user.name && s.concept == concept)
}
