use gloo::net::http::{Request, RequestBuilder, Response};
use gloo::timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::api::{error_message_from_body, normalize_api_base_url, GENERIC_ERROR_MESSAGE};
use shared::session::{
    extract_refreshed_refresh_token, extract_refreshed_token, on_api_failure, on_refresh_failure,
    SessionAction, REFRESH_TIMEOUT_MS,
};
use shared::{
    ApiResponse, Appointment, AuthResponse, AvailableSlotsResponse, BookAppointmentRequest,
    LoyaltyStatus, OAuthCallbackRequest, RefreshTokenRequest, Treatment, TreatmentCategory, User,
    WeeklyAvailability,
};
use thiserror::Error;
use web_sys::AbortController;

use super::logging::Logger;
use super::session_store::SessionStore;

/// Used when neither the server config nor the build environment names a backend
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// OAuth relay routes on the serving origin
const OAUTH_RELAY_PATH: &str = "/api/oauth";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Server error {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Text shown to the customer
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Keine Verbindung zum Server. Bitte versuche es später erneut.".to_string()
            }
            ApiError::Unauthorized => "Bitte melde dich an, um fortzufahren.".to_string(),
            ApiError::Backend { message, .. } => message.clone(),
            ApiError::Parse(_) => GENERIC_ERROR_MESSAGE.to_string(),
            ApiError::InvalidRequest(message) => message.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Delete,
}

/// API client for the studio backend and the OAuth relay
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: normalize_api_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn builder(method: Method, url: &str) -> RequestBuilder {
        let builder = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Delete => Request::delete(url),
        };
        match SessionStore::access_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send_once(method: Method, url: &str, body: Option<&Value>) -> Result<Response, ApiError> {
        let builder = Self::builder(method, url);
        let result = match body {
            Some(body) => builder
                .json(body)
                .map_err(|e| ApiError::Parse(format!("Failed to serialize request: {}", e)))?
                .send()
                .await,
            None => builder.send().await,
        };
        result.map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, ApiError> {
        let status = response.status();
        let ok = response.ok();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if status == 401 {
            return Err(ApiError::Unauthorized);
        }
        if !ok {
            return Err(ApiError::Backend {
                status,
                message: error_message_from_body(&text),
            });
        }

        let envelope: ApiResponse<T> =
            serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))?;
        if !envelope.success {
            return Err(ApiError::Backend {
                status,
                message: envelope.error_message(),
            });
        }
        Ok(envelope)
    }

    /// Send a backend request, refreshing the access token once on a 401
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = Self::send_once(method, &url, body.as_ref()).await?;
        if response.status() != 401 {
            return Self::decode(response).await;
        }

        let refresh_token = SessionStore::refresh_token();
        match on_api_failure(401, &url, refresh_token.as_deref()) {
            SessionAction::TryRefresh => {
                if let Err(err) = self.refresh_token().await {
                    Logger::warn_with_component("ApiClient", &format!("Token refresh failed: {}", err));
                    return Err(ApiError::Unauthorized);
                }
                let retried = Self::send_once(method, &url, body.as_ref()).await?;
                Self::decode(retried).await
            }
            SessionAction::ClearAndRedirect => {
                Logger::info_with_component("ApiClient", "No refresh token, ending session");
                SessionStore::expire_session();
                Err(ApiError::Unauthorized)
            }
            SessionAction::Keep => Self::decode(response).await,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T>(Method::Get, path, None).await.and_then(required)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let response = self.request::<Vec<T>>(Method::Get, path, None).await?;
        Ok(response.data.unwrap_or_default())
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        self.request::<T>(Method::Post, path, body).await.and_then(required)
    }

    pub async fn get_treatments(&self) -> Result<Vec<Treatment>, ApiError> {
        self.fetch_list("/treatments").await
    }

    pub async fn get_treatments_by_category(
        &self,
        category: TreatmentCategory,
    ) -> Result<Vec<Treatment>, ApiError> {
        self.fetch_list(&format!("/treatments/category/{}", category.wire_name()))
            .await
    }

    pub async fn get_treatment_by_slug(&self, slug: &str) -> Result<Treatment, ApiError> {
        let slug = slug.trim();
        if slug.is_empty() || slug == "undefined" {
            return Err(ApiError::InvalidRequest("Treatment slug is required".to_string()));
        }
        self.fetch(&format!("/treatments/slug/{}", slug)).await
    }

    /// Bookable slots for one treatment on one day
    pub async fn get_slots(
        &self,
        treatment_id: i64,
        date: chrono::NaiveDate,
    ) -> Result<AvailableSlotsResponse, ApiError> {
        if treatment_id <= 0 {
            return Err(ApiError::InvalidRequest(
                "Invalid parameters: treatmentId and date are required".to_string(),
            ));
        }
        self.fetch(&format!(
            "/slots?treatmentId={}&date={}",
            treatment_id,
            shared::calendar::to_iso_date(date)
        ))
        .await
    }

    pub async fn get_weekly_availability(&self) -> Result<Vec<WeeklyAvailability>, ApiError> {
        self.fetch_list("/availability/weekly").await
    }

    pub async fn book_appointment(
        &self,
        request: &BookAppointmentRequest,
    ) -> Result<Appointment, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::Parse(format!("Failed to serialize request: {}", e)))?;
        self.post("/appointments", Some(body)).await
    }

    pub async fn get_my_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        self.fetch_list("/appointments/my").await
    }

    pub async fn cancel_appointment(&self, appointment_id: i64) -> Result<(), ApiError> {
        self.request::<Value>(Method::Delete, &format!("/appointments/{}", appointment_id), None)
            .await
            .map(|_| ())
    }

    pub async fn get_loyalty_status(&self) -> Result<LoyaltyStatus, ApiError> {
        self.fetch("/loyalty/status").await
    }

    pub async fn redeem_loyalty_reward(&self) -> Result<LoyaltyStatus, ApiError> {
        self.post("/loyalty/redeem", None).await
    }

    pub async fn get_current_user(&self) -> Result<User, ApiError> {
        self.fetch("/auth/me").await
    }

    /// Exchange the stored refresh token for a new access token and store it.
    ///
    /// Only a 401 from the refresh endpoint ends the session; other failures leave it alone.
    pub async fn refresh_token(&self) -> Result<String, ApiError> {
        let Some(refresh_token) = SessionStore::refresh_token() else {
            return Err(ApiError::Unauthorized);
        };

        let url = format!("{}/auth/refresh", self.base_url);
        let controller = AbortController::new()
            .map_err(|_| ApiError::Network("Request cancellation unavailable".to_string()))?;
        let deadline = {
            let controller = controller.clone();
            Timeout::new(REFRESH_TIMEOUT_MS, move || controller.abort())
        };

        let sent = Request::post(&url)
            .abort_signal(Some(&controller.signal()))
            .json(&RefreshTokenRequest { refresh_token })
            .map_err(|e| ApiError::Parse(format!("Failed to serialize request: {}", e)))?
            .send()
            .await;
        drop(deadline);

        let response = sent.map_err(|e| {
            if controller.signal().aborted() {
                ApiError::Network(format!("Token refresh timed out after {} ms", REFRESH_TIMEOUT_MS))
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        if !response.ok() {
            let status = response.status();
            if on_refresh_failure(Some(status)) == SessionAction::ClearAndRedirect {
                SessionStore::expire_session();
            }
            return Err(ApiError::Backend {
                status,
                message: "Token refresh failed".to_string(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        let access_token = extract_refreshed_token(&body)
            .ok_or_else(|| ApiError::Parse("No access token in refresh response".to_string()))?;
        let rotated = extract_refreshed_refresh_token(&body);
        SessionStore::store_tokens(&access_token, rotated.as_deref());
        Ok(access_token)
    }

    /// Tell the backend to end the session; local credentials are dropped either way
    pub async fn logout(&self) {
        if let Err(err) = self.request::<Value>(Method::Post, "/auth/logout", None).await {
            Logger::warn_with_component("ApiClient", &format!("Logout request failed: {}", err));
        }
        SessionStore::clear();
    }

    /// Provider login URL, looked up through the relay
    pub async fn get_oauth_url(&self, provider: &str, state: &str) -> Result<String, ApiError> {
        let url = format!(
            "{}/{}/url?state={}",
            OAUTH_RELAY_PATH,
            provider,
            String::from(js_sys::encode_uri_component(state))
        );
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode::<String>(response).await.and_then(required)
    }

    /// Trade the provider's authorization code for a session through the relay
    pub async fn exchange_oauth_code(
        &self,
        provider: &str,
        code: &str,
        state: Option<&str>,
    ) -> Result<AuthResponse, ApiError> {
        if code.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "Kein Autorisierungscode erhalten".to_string(),
            ));
        }

        let url = format!("{}/{}/callback", OAUTH_RELAY_PATH, provider);
        let request = OAuthCallbackRequest {
            code: code.to_string(),
            state: state.map(str::to_string),
        };
        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ApiError::Parse(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(ApiError::Backend {
                status,
                message: error_message_from_body(&text),
            });
        }

        let auth: AuthResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))?;
        if !auth.success {
            let message = auth
                .error
                .clone()
                .or_else(|| auth.message.clone())
                .unwrap_or_else(|| "Authentifizierung fehlgeschlagen".to_string());
            return Err(ApiError::Backend { status, message });
        }
        Ok(auth)
    }
}

fn required<T>(response: ApiResponse<T>) -> Result<T, ApiError> {
    response.into_result().map_err(|message| ApiError::Backend {
        status: 200,
        message,
    })
}
