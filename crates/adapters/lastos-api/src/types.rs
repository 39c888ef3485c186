use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------- Enums ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Waiting,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerRole {
    Citizen,
    Attacker,
    Authority,
    Auditor,
}

/// How badly a submitted mini-game result was tampered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfectionLevel {
    None,
    Minor,
    Major,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateAction {
    Approve,
    Reject,
}

// ---------- Auth ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub success: bool,
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub user_id: String,
    pub message: String,
    pub temp_password: String,
}

// ---------- Session ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: String,
    pub status: SessionStatus,
    pub current_round: u32,
    pub global_health: f64,
    /// Milliseconds since the Unix epoch.
    pub created_at: f64,
    pub median_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub success: bool,
    pub session_id: String,
    pub session: GameSession,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionResponse {
    pub success: bool,
    pub player_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub success: bool,
    /// Player id to assigned role.
    pub roles: HashMap<String, PlayerRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRoundResponse {
    pub success: bool,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_round: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<HashMap<String, PlayerRole>>,
}

// ---------- Game state ----------

/// Polled snapshot of the shared session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub success: bool,
    pub global_health: f64,
    pub current_round: u32,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_role: Option<PlayerRole>,
    pub player_trust_score: f64,
    /// Milliseconds since the Unix epoch; 0 when no cooldown was issued.
    pub cooldown_until: f64,
    pub total_players: u32,
}

impl GameState {
    /// Time left on the player's cooldown at `now_ms` (Unix epoch millis).
    pub fn cooldown_remaining(&self, now_ms: f64) -> Duration {
        let left = self.cooldown_until - now_ms;
        if left.is_finite() && left > 0.0 {
            Duration::from_millis(left.ceil() as u64)
        } else {
            Duration::ZERO
        }
    }

    pub fn is_over(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_id: String,
    pub trust_score: f64,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub success: bool,
    pub leaderboard: Vec<LeaderboardEntry>,
}

// ---------- Minigames ----------

/// A server-generated calibration problem. Only `type`, `problemId` and
/// `instruction` are always present; the rest depend on the problem type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinigameProblem {
    #[serde(rename = "type")]
    pub kind: String,
    pub problem_id: u32,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readings: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmonic: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinigameResponse {
    pub success: bool,
    pub problem_id: String,
    pub problem: MinigameProblem,
    /// Seconds.
    pub time_limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMinigameRequest {
    pub problem_id: String,
    pub answer: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infection_level: Option<InfectionLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMinigameResponse {
    pub success: bool,
    pub certificate_id: String,
    pub score: f64,
    pub buffer_time: f64,
}

// ---------- Authority ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCertificate {
    pub id: String,
    pub problem_type: String,
    pub score: f64,
    pub created_at: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCertificatesResponse {
    pub success: bool,
    pub certificates: Vec<PendingCertificate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessCertificateRequest {
    pub action: CertificateAction,
    pub median_estimate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessCertificateResponse {
    pub success: bool,
    pub approved: bool,
    pub health_change: f64,
    #[serde(default)]
    pub winner: Option<String>,
}

// ---------- Auditor ----------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub certificate_id: String,
    pub player_id: String,
    pub authority_id: String,
    pub action: String,
    pub score: f64,
    pub was_infected: bool,
    pub health_change: f64,
    pub timestamp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse {
    pub success: bool,
    pub entries: Vec<LedgerEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCooldownRequest {
    pub target_player_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCooldownResponse {
    pub success: bool,
    pub cooldown_duration: f64,
}
