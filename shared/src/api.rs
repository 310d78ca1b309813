//! Wire types for the studio backend API.
//!
//! The backend wraps every payload in an [`ApiResponse`] envelope and speaks
//! camelCase JSON. These types are shared by the frontend (which consumes
//! them) and the relay server (which forwards OAuth payloads untouched).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Generic message shown when the backend gives no usable error text
pub const GENERIC_ERROR_MESSAGE: &str = "Ein Fehler ist aufgetreten";

/// Envelope returned by every backend endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Some endpoints send a string here, others a structured object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(serde_json::Value::String(message.into())),
        }
    }

    /// Best human-readable failure text: `message` first, then `error`
    pub fn error_message(&self) -> String {
        let from_error = || match &self.error {
            Some(serde_json::Value::String(text)) if !text.is_empty() => Some(text.clone()),
            Some(serde_json::Value::Object(map)) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        };

        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .or_else(from_error)
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
    }

    /// Unwrap the payload, turning `success: false` or a missing `data` into an error message
    pub fn into_result(self) -> Result<T, String> {
        if !self.success {
            return Err(self.error_message());
        }
        let message = self.error_message();
        self.data.ok_or(message)
    }

    /// Like [`ApiResponse::into_result`] for endpoints whose payload may be absent
    pub fn into_optional(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error_message())
        }
    }
}

/// Failure text from a raw error body, which may be an envelope or a bare `{error}` object
pub fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .map(|response| response.error_message())
        .unwrap_or_else(|_| GENERIC_ERROR_MESSAGE.to_string())
}

/// Trim a trailing slash and make sure the URL ends in `/api`
pub fn normalize_api_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.ends_with("/api") {
        trimmed.to_string()
    } else {
        format!("{}/api", trimmed)
    }
}

/// Treatment category as the backend names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreatmentCategory {
    Wimpern,
    Augenbrauen,
    Gesicht,
    Naegel,
    Refill,
    Extras,
}

impl TreatmentCategory {
    pub const ALL: [TreatmentCategory; 6] = [
        TreatmentCategory::Wimpern,
        TreatmentCategory::Augenbrauen,
        TreatmentCategory::Gesicht,
        TreatmentCategory::Naegel,
        TreatmentCategory::Refill,
        TreatmentCategory::Extras,
    ];

    /// Lowercase slug used in URLs and the service mapping table
    pub fn slug(&self) -> &'static str {
        match self {
            TreatmentCategory::Wimpern => "wimpern",
            TreatmentCategory::Augenbrauen => "augenbrauen",
            TreatmentCategory::Gesicht => "gesicht",
            TreatmentCategory::Naegel => "naegel",
            TreatmentCategory::Refill => "refill",
            TreatmentCategory::Extras => "extras",
        }
    }

    /// Upper-case name used in backend paths such as `/treatments/category/WIMPERN`
    pub fn wire_name(&self) -> &'static str {
        match self {
            TreatmentCategory::Wimpern => "WIMPERN",
            TreatmentCategory::Augenbrauen => "AUGENBRAUEN",
            TreatmentCategory::Gesicht => "GESICHT",
            TreatmentCategory::Naegel => "NAEGEL",
            TreatmentCategory::Refill => "REFILL",
            TreatmentCategory::Extras => "EXTRAS",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TreatmentCategory::Wimpern => "Wimpern",
            TreatmentCategory::Augenbrauen => "Augenbrauen",
            TreatmentCategory::Gesicht => "Gesicht",
            TreatmentCategory::Naegel => "Nägel",
            TreatmentCategory::Refill => "Refill",
            TreatmentCategory::Extras => "Extras",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(slug))
    }
}

/// A bookable service offered by the studio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub category: TreatmentCategory,
    pub duration_minutes: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<i64>,
}

fn default_active() -> bool {
    true
}

impl Treatment {
    /// Price formatted the way the studio displays it, e.g. `"89 €"` or `"12,50 €"`
    pub fn formatted_price(&self) -> String {
        if self.price.fract() == 0.0 {
            format!("{:.0} €", self.price)
        } else {
            format!("{:.2} €", self.price).replace('.', ",")
        }
    }

    pub fn formatted_duration(&self) -> String {
        let hours = self.duration_minutes / 60;
        let minutes = self.duration_minutes % 60;
        match (hours, minutes) {
            (0, m) => format!("{} Min.", m),
            (h, 0) => format!("{} Std.", h),
            (h, m) => format!("{} Std. {} Min.", h, m),
        }
    }
}

/// Group treatments by category, keeping the backend's order within each group
pub fn treatments_by_category(
    treatments: &[Treatment],
) -> std::collections::BTreeMap<TreatmentCategory, Vec<Treatment>> {
    let mut grouped = std::collections::BTreeMap::new();
    for treatment in treatments {
        grouped
            .entry(treatment.category)
            .or_insert_with(Vec::new)
            .push(treatment.clone());
    }
    grouped
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Local date-time, e.g. `2025-01-10T09:00:00`
    pub start_time: String,
    pub end_time: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlotsResponse {
    pub date: NaiveDate,
    pub treatment_id: i64,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub treatment_id: i64,
    /// `{date}T{time}:00`, local studio time
    pub scheduled_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rejected,
    NoShow,
}

impl AppointmentStatus {
    /// Still on the calendar and expected to happen
    pub fn is_active(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }

    /// No further transitions expected
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Angefragt",
            AppointmentStatus::Confirmed => "Bestätigt",
            AppointmentStatus::Completed => "Abgeschlossen",
            AppointmentStatus::Cancelled => "Storniert",
            AppointmentStatus::Rejected => "Abgelehnt",
            AppointmentStatus::NoShow => "Nicht erschienen",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub customer_id: i64,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    pub treatment_id: i64,
    pub treatment_name: String,
    pub scheduled_at: String,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl Appointment {
    /// Parse `scheduled_at`, accepting both local and offset-qualified timestamps
    pub fn scheduled_at_local(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.scheduled_at, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(&self.scheduled_at, "%Y-%m-%dT%H:%M"))
            .ok()
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(&self.scheduled_at)
                    .ok()
                    .map(|dt| dt.naive_local())
            })
    }
}

/// Appointments still ahead of `now` and active, soonest first
pub fn upcoming_appointments(appointments: &[Appointment], now: NaiveDateTime) -> Vec<Appointment> {
    let mut upcoming: Vec<Appointment> = appointments
        .iter()
        .filter(|apt| apt.status.is_active())
        .filter(|apt| apt.scheduled_at_local().map_or(false, |at| at > now))
        .cloned()
        .collect();
    upcoming.sort_by_key(|apt| apt.scheduled_at_local());
    upcoming
}

/// Appointments that already happened or reached a terminal status, newest first
pub fn past_appointments(appointments: &[Appointment], now: NaiveDateTime) -> Vec<Appointment> {
    let mut past: Vec<Appointment> = appointments
        .iter()
        .filter(|apt| {
            apt.status.is_terminal() || apt.scheduled_at_local().map_or(false, |at| at <= now)
        })
        .cloned()
        .collect();
    past.sort_by(|a, b| b.scheduled_at_local().cmp(&a.scheduled_at_local()));
    past
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyStatus {
    pub user_id: i64,
    pub current_stamps: u32,
    pub total_stamps: u32,
    pub current_cycle: u32,
    pub reward_available: bool,
    pub reward_discount: f64,
    pub stamps_to_next_reward: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Opening hours for one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailability {
    pub id: i64,
    pub day_of_week: DayOfWeek,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("ADMIN")
    }

    /// First name when known, otherwise the username
    pub fn greeting_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default)]
    pub has_password: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthCallbackRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Log line forwarded from the browser to the relay server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

/// Public runtime configuration the server hands to the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub under_construction: bool,
    pub api_base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn appointment(id: i64, scheduled_at: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            customer_id: 1,
            customer_name: "Anna".to_string(),
            customer_email: "anna@example.com".to_string(),
            treatment_id: 3,
            treatment_name: "Hybrid".to_string(),
            scheduled_at: scheduled_at.to_string(),
            duration_minutes: 120,
            status,
            customer_notes: None,
            owner_notes: None,
            rejection_reason: None,
            confirmed_at: None,
            cancelled_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn test_treatment_deserializes_from_backend_json() {
        let treatment: Treatment = serde_json::from_value(json!({
            "id": 7,
            "name": "Hybrid Neuset",
            "slug": "hybrid",
            "description": "Mix aus Einzel- und Volumentechnik",
            "category": "WIMPERN",
            "durationMinutes": 150,
            "price": 119.0,
            "active": true,
            "sortOrder": 2
        }))
        .unwrap();

        assert_eq!(treatment.category, TreatmentCategory::Wimpern);
        assert_eq!(treatment.duration_minutes, 150);
        assert_eq!(treatment.image_url, None);
        assert_eq!(treatment.formatted_price(), "119 €");
        assert_eq!(treatment.formatted_duration(), "2 Std. 30 Min.");
    }

    #[test]
    fn test_api_response_into_result() {
        let ok: ApiResponse<u32> = serde_json::from_value(json!({"success": true, "data": 5})).unwrap();
        assert_eq!(ok.into_result(), Ok(5));

        let failed: ApiResponse<u32> = serde_json::from_value(json!({
            "success": false,
            "message": "Termin nicht mehr frei"
        }))
        .unwrap();
        assert_eq!(failed.into_result(), Err("Termin nicht mehr frei".to_string()));

        let structured: ApiResponse<u32> = serde_json::from_value(json!({
            "success": false,
            "error": {"message": "Slot taken"}
        }))
        .unwrap();
        assert_eq!(structured.error_message(), "Slot taken");

        let empty: ApiResponse<u32> = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(empty.error_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_api_response_optional_payload() {
        let unit: ApiResponse<serde_json::Value> =
            serde_json::from_value(json!({"success": true, "data": null})).unwrap();
        assert_eq!(unit.into_optional(), Ok(None));
    }

    #[test]
    fn test_error_message_from_raw_bodies() {
        assert_eq!(
            error_message_from_body(r#"{"error":"Authorization code is required"}"#),
            "Authorization code is required"
        );
        assert_eq!(
            error_message_from_body(r#"{"success":false,"message":"Termin belegt","error":"CONFLICT"}"#),
            "Termin belegt"
        );
        assert_eq!(error_message_from_body("<html>502</html>"), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_base_url_normalisation() {
        assert_eq!(normalize_api_base_url("http://localhost:5000"), "http://localhost:5000/api");
        assert_eq!(normalize_api_base_url("http://localhost:5000/api/"), "http://localhost:5000/api");
        assert_eq!(normalize_api_base_url("https://api.studio.de/api"), "https://api.studio.de/api");
    }

    #[test]
    fn test_book_request_omits_missing_notes() {
        let request = BookAppointmentRequest {
            treatment_id: 4,
            scheduled_at: "2025-03-14T10:30:00".to_string(),
            customer_notes: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"treatmentId": 4, "scheduledAt": "2025-03-14T10:30:00"}));
    }

    #[test]
    fn test_category_slugs() {
        assert_eq!(TreatmentCategory::from_slug("wimpern"), Some(TreatmentCategory::Wimpern));
        assert_eq!(TreatmentCategory::from_slug("EXTRAS"), Some(TreatmentCategory::Extras));
        assert_eq!(TreatmentCategory::from_slug("massage"), None);
        assert_eq!(TreatmentCategory::Naegel.wire_name(), "NAEGEL");
    }

    #[test]
    fn test_status_wire_names() {
        let status: AppointmentStatus = serde_json::from_value(json!("NO_SHOW")).unwrap();
        assert_eq!(status, AppointmentStatus::NoShow);
    }

    #[test]
    fn test_upcoming_and_past_appointments() {
        let now = NaiveDateTime::parse_from_str("2025-06-01T12:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
        let appointments = vec![
            appointment(1, "2025-06-20T10:00:00", AppointmentStatus::Confirmed),
            appointment(2, "2025-06-05T09:00:00", AppointmentStatus::Pending),
            appointment(3, "2025-05-10T09:00:00", AppointmentStatus::Completed),
            appointment(4, "2025-06-10T09:00:00", AppointmentStatus::Cancelled),
            appointment(5, "2025-04-01T09:00:00", AppointmentStatus::Completed),
        ];

        let upcoming: Vec<i64> = upcoming_appointments(&appointments, now).iter().map(|a| a.id).collect();
        assert_eq!(upcoming, vec![2, 1]);

        let past: Vec<i64> = past_appointments(&appointments, now).iter().map(|a| a.id).collect();
        assert_eq!(past, vec![4, 3, 5]);
    }

    #[test]
    fn test_treatments_grouped_by_category() {
        let make = |id, category| Treatment {
            id,
            name: format!("T{}", id),
            slug: format!("t{}", id),
            description: String::new(),
            category,
            duration_minutes: 60,
            price: 50.0,
            image_url: None,
            active: true,
            sort_order: 0,
            version_number: None,
        };
        let treatments = vec![
            make(1, TreatmentCategory::Extras),
            make(2, TreatmentCategory::Wimpern),
            make(3, TreatmentCategory::Wimpern),
        ];
        let grouped = treatments_by_category(&treatments);
        assert_eq!(grouped[&TreatmentCategory::Wimpern].len(), 2);
        assert_eq!(grouped[&TreatmentCategory::Wimpern][0].id, 2);
        assert_eq!(grouped[&TreatmentCategory::Extras].len(), 1);
    }
}
