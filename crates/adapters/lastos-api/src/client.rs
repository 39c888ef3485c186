use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;

use lastos_core::context::SessionContext;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::{
    CertificateAction, CreateSessionResponse, GameState, InfectionLevel, IssueCooldownRequest,
    IssueCooldownResponse, JoinSessionResponse, LeaderboardResponse, LedgerResponse,
    MinigameResponse, NextRoundResponse, PendingCertificatesResponse, ProcessCertificateRequest,
    ProcessCertificateResponse, RegisterResponse, StartSessionResponse, SubmitMinigameRequest,
    SubmitMinigameResponse, VerifyTokenResponse,
};

/// JSON client for the game backend.
///
/// Every request carries `Content-Type: application/json` and, when the
/// session context holds a token, `Authorization: Bearer <token>`. Cloning
/// shares the connection pool and the context.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    context: SessionContext,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, context: SessionContext) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent("lastos-api/0.1")
            .timeout(config.request_timeout())
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            http,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            context,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.context.auth_token() {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(ApiError::Decode)?;
            req = req.body(bytes);
        }

        let resp = req.send().await.map_err(ApiError::Transport)?;
        let status = resp.status();
        let text = resp.text().await.map_err(ApiError::Transport)?;
        if !status.is_success() {
            tracing::debug!(%method, path, status = status.as_u16(), "API request failed");
            return Err(ApiError::from_response(status, &text));
        }
        serde_json::from_str(&text).map_err(ApiError::Decode)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None::<&()>).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, body).await
    }

    // ---------- Auth ----------

    pub async fn verify_token(&self, id_token: &str) -> Result<VerifyTokenResponse, ApiError> {
        let body = serde_json::json!({ "idToken": id_token });
        self.post("/api/auth/verify", Some(&body)).await
    }

    pub async fn register_user(
        &self,
        email: &str,
        display_name: &str,
    ) -> Result<RegisterResponse, ApiError> {
        let body = serde_json::json!({ "email": email, "displayName": display_name });
        self.post("/api/auth/register", Some(&body)).await
    }

    // ---------- Session ----------

    /// Create a session and remember its id in the context.
    pub async fn create_session(&self) -> Result<CreateSessionResponse, ApiError> {
        let resp: CreateSessionResponse =
            self.post("/api/session/create", None::<&()>).await?;
        self.remember_session(&resp.session_id);
        Ok(resp)
    }

    /// Join a session and remember its id in the context.
    pub async fn join_session(&self, session_id: &str) -> Result<JoinSessionResponse, ApiError> {
        let resp: JoinSessionResponse = self
            .post(&format!("/api/session/{session_id}/join"), None::<&()>)
            .await?;
        self.remember_session(session_id);
        Ok(resp)
    }

    pub async fn start_session(&self, session_id: &str) -> Result<StartSessionResponse, ApiError> {
        self.post(&format!("/api/session/{session_id}/start"), None::<&()>)
            .await
    }

    pub async fn next_round(&self, session_id: &str) -> Result<NextRoundResponse, ApiError> {
        self.post(&format!("/api/session/{session_id}/nextRound"), None::<&()>)
            .await
    }

    fn remember_session(&self, session_id: &str) {
        if let Err(e) = self.context.set_session_id(session_id) {
            tracing::warn!(session_id, error = %e, "Failed to persist session id");
        }
    }

    // ---------- Game state ----------

    pub async fn game_state(&self, session_id: &str) -> Result<GameState, ApiError> {
        self.get(&format!("/api/session/{session_id}/state")).await
    }

    pub async fn leaderboard(&self, session_id: &str) -> Result<LeaderboardResponse, ApiError> {
        self.get(&format!("/api/session/{session_id}/leaderboard"))
            .await
    }

    // ---------- Minigames ----------

    pub async fn minigame(&self, session_id: &str) -> Result<MinigameResponse, ApiError> {
        self.get(&format!("/api/session/{session_id}/minigame")).await
    }

    pub async fn submit_minigame(
        &self,
        session_id: &str,
        problem_id: &str,
        answer: f64,
        infection_level: Option<InfectionLevel>,
    ) -> Result<SubmitMinigameResponse, ApiError> {
        let body = SubmitMinigameRequest {
            problem_id: problem_id.to_string(),
            answer,
            infection_level,
        };
        self.post(
            &format!("/api/session/{session_id}/minigame/submit"),
            Some(&body),
        )
        .await
    }

    // ---------- Authority ----------

    pub async fn pending_certificates(
        &self,
        session_id: &str,
    ) -> Result<PendingCertificatesResponse, ApiError> {
        self.get(&format!("/api/session/{session_id}/certificates/pending"))
            .await
    }

    pub async fn process_certificate(
        &self,
        session_id: &str,
        cert_id: &str,
        action: CertificateAction,
        median_estimate: f64,
    ) -> Result<ProcessCertificateResponse, ApiError> {
        let body = ProcessCertificateRequest {
            action,
            median_estimate,
        };
        self.post(
            &format!("/api/session/{session_id}/certificates/{cert_id}/process"),
            Some(&body),
        )
        .await
    }

    // ---------- Auditor ----------

    pub async fn ledger(&self, session_id: &str) -> Result<LedgerResponse, ApiError> {
        self.get(&format!("/api/session/{session_id}/ledger")).await
    }

    pub async fn issue_cooldown(
        &self,
        session_id: &str,
        target_player_id: &str,
        reason: &str,
    ) -> Result<IssueCooldownResponse, ApiError> {
        let body = IssueCooldownRequest {
            target_player_id: target_player_id.to_string(),
            reason: reason.to_string(),
        };
        self.post(&format!("/api/session/{session_id}/cooldown"), Some(&body))
            .await
    }
}
