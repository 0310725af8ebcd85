// Local mock identity: the user record, the two-step sign-up flow, and the
// profile card figures. There is no backend; a user exists only on this
// device (see `db` for how the record is persisted).

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{UserStats, AVATAR_STYLES, SPIRIT_PARTNERS};

/// XP shown on the profile card is offset by this bonus.
pub const XP_BONUS: u32 = 240;
/// XP needed for the next level, as displayed.
pub const XP_PER_LEVEL: u32 = 1000;

const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x";
const DEFAULT_ROLE: &str = "CRIADOR";

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a locally unique identifier.
///
/// Format: `{prefix}_YYYYMMDDHHMMSSmmm_{n}`; the counter suffix keeps ids
/// distinct within the same millisecond.
pub fn generate_id(prefix: &str) -> String {
    let n = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}_{}_{n}", Utc::now().format("%Y%m%d%H%M%S%3f"))
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub stats: UserStats,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

fn default_level() -> u32 {
    1
}

impl User {
    /// Role shown on the badge.
    pub fn role_label(&self) -> &str {
        self.role.as_deref().unwrap_or(DEFAULT_ROLE)
    }

    /// `(current, target)` for the profile XP bar.
    pub fn xp_progress(&self) -> (u32, u32) {
        (self.xp.saturating_add(XP_BONUS), XP_PER_LEVEL)
    }

    /// Fill ratio of the XP bar, clamped to `0.0..=1.0`.
    pub fn xp_ratio(&self) -> f64 {
        let (current, target) = self.xp_progress();
        (current as f64 / target as f64).clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Sign-up flow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("codename must not be blank")]
    BlankName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStep {
    /// Codename and spirit partner.
    Identity,
    /// Avatar style and seed.
    Avatar,
}

/// In-progress sign-up. Indices point into [`SPIRIT_PARTNERS`] and
/// [`AVATAR_STYLES`].
#[derive(Debug, Clone, PartialEq)]
pub struct SignupDraft {
    pub step: SignupStep,
    pub name: String,
    pub partner_idx: usize,
    pub style_idx: usize,
    pub avatar_seed: String,
}

impl Default for SignupDraft {
    fn default() -> Self {
        Self::with_seed(fresh_seed())
    }
}

impl SignupDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: impl Into<String>) -> Self {
        SignupDraft {
            step: SignupStep::Identity,
            name: String::new(),
            partner_idx: 0,
            style_idx: 0,
            avatar_seed: seed.into(),
        }
    }

    pub fn partner(&self) -> &'static crate::catalog::SpiritPartner {
        &SPIRIT_PARTNERS[self.partner_idx % SPIRIT_PARTNERS.len()]
    }

    pub fn style(&self) -> &'static crate::catalog::AvatarStyle {
        &AVATAR_STYLES[self.style_idx % AVATAR_STYLES.len()]
    }

    pub fn next_partner(&mut self) {
        self.partner_idx = (self.partner_idx + 1) % SPIRIT_PARTNERS.len();
    }

    pub fn prev_partner(&mut self) {
        self.partner_idx = (self.partner_idx + SPIRIT_PARTNERS.len() - 1) % SPIRIT_PARTNERS.len();
    }

    pub fn next_style(&mut self) {
        self.style_idx = (self.style_idx + 1) % AVATAR_STYLES.len();
    }

    pub fn prev_style(&mut self) {
        self.style_idx = (self.style_idx + AVATAR_STYLES.len() - 1) % AVATAR_STYLES.len();
    }

    /// Roll a new avatar seed.
    pub fn reseed(&mut self) {
        self.avatar_seed = fresh_seed();
    }

    pub fn avatar_url(&self) -> String {
        format!(
            "{AVATAR_BASE_URL}/{}/svg?seed={}",
            self.style().id,
            self.avatar_seed
        )
    }

    /// Move from the identity step to the avatar step. Refused while the
    /// codename is blank.
    pub fn advance(&mut self) -> Result<(), SignupError> {
        if self.name.trim().is_empty() {
            return Err(SignupError::BlankName);
        }
        self.step = SignupStep::Avatar;
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = SignupStep::Identity;
    }

    /// Build the user record.
    pub fn finish(&self) -> Result<User, SignupError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SignupError::BlankName);
        }
        let partner = self.partner();
        Ok(User {
            id: generate_id("user"),
            name: name.to_string(),
            avatar_url: self.avatar_url(),
            bio: Some(format!(
                "Um {} criativo explorando o INSPIRØØ.",
                partner.label
            )),
            role: Some(partner.label.to_string()),
            level: 1,
            xp: 0,
            stats: partner.stats,
            joined_at: Some(Utc::now()),
        })
    }
}

fn fresh_seed() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let n = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}", (nanos as u64).wrapping_mul(6364136223846793005).wrapping_add(n))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
