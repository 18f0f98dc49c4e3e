// API client module: a small blocking HTTP client for the WE (TE Data)
// customer self-service REST backend. It is intentionally small and
// synchronous: one login, then up to four sequential fetches per run.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Production base URL of the self-service REST gateway.
pub const BASE_URL: &str = "https://mytedata.net/services/rest";

/// The backend has no cancellation of its own; without a client-side
/// timeout a stalled connection would hang the process.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors reported by [`ApiClient`] operations. All variants are terminal
/// for the calling operation: nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401: bad credentials or an expired session.
    #[error("unauthorized: check your email and password")]
    Unauthorized,

    /// Business failure reported by the backend's error envelope.
    #[error("server error: {0}")]
    Server(String),

    /// DNS, connection or timeout failure before a response was decoded.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body does not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A per-customer endpoint was called before a successful login.
    #[error("not logged in: call login first")]
    NotAuthenticated,
}

/// API client holding the credentials, the base URL and the session key
/// (customer number) once a login has succeeded.
///
/// Deliberately not `Debug`: the stored password must never end up in
/// logs or error output.
pub struct ApiClient {
    client: Client,
    base_url: String,
    email: String,
    password: String,
    customer_number: Option<String>,
}

/// Login request payload. Field names mirror the backend expectations.
#[derive(Serialize)]
struct LoginRequest<'a> {
    uid: &'a str,
    password: &'a str,
}

/// Error envelope returned by the backend on non-200, non-401 responses.
#[derive(Deserialize)]
struct ErrorEnvelope {
    exception: ErrorException,
}

#[derive(Deserialize)]
struct ErrorException {
    #[serde(rename = "messageEn")]
    message_en: String,
}

/// Customer profile as returned by the login endpoint.
#[derive(Debug, Deserialize)]
pub struct CustomerInfo {
    #[serde(rename = "customerInformationDto")]
    pub customer: CustomerProfile,
}

#[derive(Debug, Deserialize)]
pub struct CustomerProfile {
    #[serde(rename = "customerName")]
    pub customer_name: String,
    #[serde(rename = "customerNumber")]
    pub customer_number: String,
    #[serde(rename = "emailAddress")]
    pub email_address: String,
    #[serde(rename = "mobileNumber1WithPrefix")]
    pub mobile_number: String,
    #[serde(rename = "adslNumber")]
    pub adsl_number: i64,
    #[serde(rename = "adslAreaCode")]
    pub adsl_area_code: i64,
    #[serde(rename = "adslSpeed")]
    pub adsl_speed: String,
    #[serde(rename = "cityEN")]
    pub city: String,
    #[serde(rename = "districtEN")]
    pub district: String,
}

/// ADSL usage snapshot for the current subscription period.
#[derive(Debug, Deserialize)]
pub struct UsageInfo {
    #[serde(rename = "adslUsage")]
    pub adsl_usage: AdslUsage,
}

#[derive(Debug, Deserialize)]
pub struct AdslUsage {
    #[serde(rename = "startDate")]
    pub start_date: i64,
    // "quata" is the backend's spelling, kept for wire compatibility.
    #[serde(rename = "quata")]
    pub quota: f64,
    #[serde(rename = "totalUsed")]
    pub total_used: f64,
}

/// Subscription expiry and remaining service days.
#[derive(Debug, Deserialize)]
pub struct RemainingDaysInfo {
    #[serde(rename = "remainingDays")]
    pub remaining_days: RemainingDays,
}

#[derive(Debug, Deserialize)]
pub struct RemainingDays {
    #[serde(rename = "adslExpiryDateString")]
    pub adsl_expiry_date: String,
    #[serde(rename = "remainingDays")]
    pub remaining_days: i64,
    #[serde(rename = "packageName")]
    pub package_name: String,
    #[serde(rename = "amountDue")]
    pub amount_due: f64,
}

/// 4U loyalty points balance.
#[derive(Debug, Deserialize)]
pub struct LoyaltyPointsInfo {
    #[serde(rename = "loyaltyPoints")]
    pub loyalty_points: i64,
}

/// Basic-auth token: standard padded base64 of `username:password`.
fn authorization_token(username: &str, password: &str) -> String {
    BASE64.encode(format!("{}:{}", username, password))
}

/// Classify a response body given its status. The priority is fixed:
/// 401 first, then any other non-200 (decoded as the error envelope),
/// and only then the endpoint's success decoder.
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ApiError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if status != StatusCode::OK {
        let envelope: ErrorEnvelope = serde_json::from_str(body)?;
        return Err(ApiError::Server(envelope.exception.message_en));
    }
    Ok(serde_json::from_str(body)?)
}

/// Read and classify a raw response. On 401 the body is discarded
/// without being read.
fn decode_response<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    let status = res.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    let body = res.text()?;
    decode_body(status, &body)
}

impl ApiClient {
    /// Create a client for the production backend. Credentials are stored
    /// verbatim; no network I/O and no validation happens here.
    pub fn new(email: &str, password: &str) -> Result<Self, ApiError> {
        Self::with_base_url(email, password, BASE_URL)
    }

    /// Create a client against an arbitrary base URL. Used by tests to
    /// point the client at a local stub server.
    pub fn with_base_url(email: &str, password: &str, base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            email: email.to_string(),
            password: password.to_string(),
            customer_number: None,
        })
    }

    /// Headers carried by every request: Basic auth built from the stored
    /// credentials plus a JSON content type, GETs included (the backend
    /// requires both on all endpoints).
    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let token = authorization_token(&self.email, &self.password);
        let val = format!("Basic {}", token);
        // base64 output is plain ASCII, always a valid header value
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&val).unwrap());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Submit the credentials to the backend. On success the returned
    /// customer number is retained as the session key for the
    /// per-customer endpoints.
    pub fn login(&mut self) -> Result<CustomerInfo, ApiError> {
        let url = format!("{}/login/checkPassword", self.base_url);
        let body = LoginRequest {
            uid: &self.email,
            password: &self.password,
        };
        let res = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .json(&body)
            .send()?;
        let info: CustomerInfo = decode_response(res)?;
        self.customer_number = Some(info.customer.customer_number.clone());
        Ok(info)
    }

    /// GET a per-customer subscription resource. Refuses to build a URL
    /// with an empty customer segment: without a prior login this fails
    /// before any network call.
    fn get_subscription<T: DeserializeOwned>(&self, resource: &str) -> Result<T, ApiError> {
        let customer = self
            .customer_number
            .as_deref()
            .ok_or(ApiError::NotAuthenticated)?;
        let url = format!(
            "{}/subscription/customer/{}/{}",
            self.base_url, customer, resource
        );
        let res = self.client.get(&url).headers(self.auth_headers()).send()?;
        decode_response(res)
    }

    /// ADSL usage of the logged-in customer.
    pub fn usage(&self) -> Result<UsageInfo, ApiError> {
        self.get_subscription("ADSLUsage")
    }

    /// Subscription expiry and remaining days of the logged-in customer.
    pub fn remaining_days(&self) -> Result<RemainingDaysInfo, ApiError> {
        self.get_subscription("remainingDays")
    }

    /// 4U points of the logged-in customer.
    pub fn loyalty_points(&self) -> Result<LoyaltyPointsInfo, ApiError> {
        self.get_subscription("loyaltyPoints")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_token_matches_padded_base64() {
        let cases = [
            ("X", "Y", "WDpZ"),
            ("ABC", "DEF", "QUJDOkRFRg=="),
            ("AB123", "CD456", "QUIxMjM6Q0Q0NTY="),
            (
                "abc@xyz.com",
                "abcdef12345",
                "YWJjQHh5ei5jb206YWJjZGVmMTIzNDU=",
            ),
        ];
        for (username, password, expected) in cases {
            assert_eq!(authorization_token(username, password), expected);
        }
    }

    #[test]
    fn unauthorized_wins_over_body_content() {
        // 401 discards the body, even a valid-looking success body
        let body = r#"{"loyaltyPoints": 42}"#;
        let err = decode_body::<LoyaltyPointsInfo>(StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));

        let err =
            decode_body::<LoyaltyPointsInfo>(StatusCode::UNAUTHORIZED, "not json").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn error_envelope_becomes_server_error() {
        let body = r#"{"exception":{"messageEn":"bad state"}}"#;
        let err = decode_body::<UsageInfo>(StatusCode::INTERNAL_SERVER_ERROR, body).unwrap_err();
        match err {
            ApiError::Server(msg) => assert_eq!(msg, "bad state"),
            other => panic!("expected Server, got {:?}", other),
        }
    }

    #[test]
    fn malformed_error_envelope_is_a_decode_error() {
        let err =
            decode_body::<UsageInfo>(StatusCode::BAD_REQUEST, r#"{"oops":true}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn success_body_missing_fields_is_a_decode_error() {
        // profile without customerNumber must not decode to a default
        let body = r#"{"customerInformationDto":{"customerName":"John Doe"}}"#;
        let err = decode_body::<CustomerInfo>(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn success_body_decodes() {
        let body = r#"{"adslUsage":{"startDate":1514764800,"quata":140.0,"totalUsed":72.5}}"#;
        let info: UsageInfo = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(info.adsl_usage.start_date, 1514764800);
        assert_eq!(info.adsl_usage.quota, 140.0);
        assert_eq!(info.adsl_usage.total_used, 72.5);
    }

    #[test]
    fn accessors_before_login_fail_without_network() {
        // unroutable base URL: an attempted request would surface as
        // Transport, not NotAuthenticated
        let client = ApiClient::with_base_url("a@b.c", "secret", "http://127.0.0.1:1").unwrap();
        assert!(matches!(client.usage(), Err(ApiError::NotAuthenticated)));
        assert!(matches!(
            client.remaining_days(),
            Err(ApiError::NotAuthenticated)
        ));
        assert!(matches!(
            client.loyalty_points(),
            Err(ApiError::NotAuthenticated)
        ));
    }
}
