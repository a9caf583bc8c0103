use std::future::Future;
use std::time::Duration;

use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_GEO_ENDPOINT: &str = "https://ipwho.is/";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeoError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP error! status: {0}")]
    Status(StatusCode),
    #[error("lookup service returned success: false ({0})")]
    Rejected(String),
    #[error("lookup response is missing `{0}`")]
    Incomplete(&'static str),
}

impl From<reqwest::Error> for GeoError {
    fn from(err: reqwest::Error) -> Self {
        GeoError::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub region_code: String,
}

impl Location {
    pub fn label(&self) -> String {
        format!("{} - {}", self.city, self.region_code)
    }
}

/// Body returned by the ipwho.is lookup service.
#[derive(Deserialize, Debug, Default)]
struct LookupResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region_code: Option<String>,
}

impl LookupResponse {
    fn into_location(self) -> Result<Location, GeoError> {
        if !self.success {
            return Err(GeoError::Rejected(
                self.message.unwrap_or_else(|| "no message".to_string()),
            ));
        }
        Ok(Location {
            city: self.city.ok_or(GeoError::Incomplete("city"))?,
            region_code: self.region_code.ok_or(GeoError::Incomplete("region_code"))?,
        })
    }
}

/// One attempt at resolving the visitor's approximate location.
#[allow(async_fn_in_trait)]
pub trait LocationSource {
    async fn lookup(&self) -> Result<Location, GeoError>;
}

/// [`LocationSource`] backed by an ipwho.is compatible JSON endpoint.
#[derive(Debug, Clone)]
pub struct IpWhoIs {
    client: reqwest::Client,
    endpoint: String,
}

impl IpWhoIs {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for IpWhoIs {
    fn default() -> Self {
        Self::new(DEFAULT_GEO_ENDPOINT)
    }
}

impl LocationSource for IpWhoIs {
    async fn lookup(&self) -> Result<Location, GeoError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Status(status));
        }
        let body = response.json::<LookupResponse>().await?;
        body.into_location()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made after the first one fails.
    pub retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.retries + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            delay: Duration::from_secs(1),
        }
    }
}

/// Query `source` until it succeeds or the policy runs out of retries.
///
/// Attempts are strictly sequential: after a failure `sleep(policy.delay)` is
/// awaited before the next one. The last error is returned once every attempt
/// has failed. Transport and application failures are treated the same way.
pub async fn locate<S, D, F>(source: &S, policy: RetryPolicy, mut sleep: D) -> Result<Location, GeoError>
where
    S: LocationSource,
    D: FnMut(Duration) -> F,
    F: Future<Output = ()>,
{
    let mut remaining = policy.retries;
    loop {
        match source.lookup().await {
            Ok(location) => return Ok(location),
            Err(err) if remaining > 0 => {
                remaining -= 1;
                log::warn!(
                    "location lookup failed, retrying in {:?} ({remaining} retries left): {err}",
                    policy.delay
                );
                sleep(policy.delay).await;
            }
            Err(err) => {
                log::error!("Failed to fetch location: {err}");
                return Err(err);
            }
        }
    }
}

/// What the status line knows about the visitor's location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GeoStatus {
    #[default]
    Pending,
    Located(String),
    Unavailable,
}

impl GeoStatus {
    /// Record the outcome of a lookup.
    ///
    /// A success always wins over an earlier failure; once located the label
    /// never changes again.
    pub fn apply(&mut self, result: Result<Location, GeoError>) {
        if matches!(self, GeoStatus::Located(_)) {
            return;
        }
        *self = match result {
            Ok(location) => GeoStatus::Located(location.label()),
            Err(_) => GeoStatus::Unavailable,
        };
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            GeoStatus::Located(label) => Some(label),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, GeoStatus::Unavailable)
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, GeoStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use futures::future::{AbortHandle, Abortable, Aborted};

    /// Replays canned results, then keeps failing once the script runs out.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<Location, GeoError>>>,
        attempts: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Location, GeoError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                attempts: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self::new(vec![])
        }

        fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    impl LocationSource for ScriptedSource {
        async fn lookup(&self) -> Result<Location, GeoError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .expect("should be able to lock script")
                .pop_front()
                .unwrap_or_else(|| Err(GeoError::Status(StatusCode::SERVICE_UNAVAILABLE)))
        }
    }

    fn lisbon() -> Location {
        Location {
            city: "Lisbon".to_string(),
            region_code: "11".to_string(),
        }
    }

    #[test]
    fn test_location_label() {
        assert_eq!(lisbon().label(), "Lisbon - 11");
    }

    #[test]
    fn test_lookup_response_parsing() {
        let ok: LookupResponse =
            serde_json::from_str(r#"{"success": true, "city": "Lisbon", "region_code": "11", "ip": "1.2.3.4"}"#)
                .unwrap();
        assert_eq!(ok.into_location(), Ok(lisbon()));

        let rejected: LookupResponse =
            serde_json::from_str(r#"{"success": false, "message": "Reserved range"}"#).unwrap();
        assert_eq!(
            rejected.into_location(),
            Err(GeoError::Rejected("Reserved range".to_string()))
        );

        let missing: LookupResponse =
            serde_json::from_str(r#"{"success": true, "city": "Lisbon"}"#).unwrap();
        assert_eq!(
            missing.into_location(),
            Err(GeoError::Incomplete("region_code"))
        );
    }

    #[tokio::test]
    async fn test_first_attempt_success() {
        let source = ScriptedSource::new(vec![Ok(lisbon())]);
        let mut delays = Vec::new();

        let result = locate(&source, RetryPolicy::default(), |d| {
            delays.push(d);
            async {}
        })
        .await;

        let mut status = GeoStatus::default();
        status.apply(result);
        assert_eq!(status.label(), Some("Lisbon - 11"));
        assert!(!status.is_unavailable());
        assert_eq!(source.attempts(), 1);
        assert!(delays.is_empty());
    }

    #[tokio::test]
    async fn test_all_attempts_fail() {
        let source = ScriptedSource::new(vec![
            Err(GeoError::Rejected("Invalid IP address".to_string())),
            Err(GeoError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
            Err(GeoError::Transport("connection reset".to_string())),
        ]);
        let mut delays = Vec::new();

        let result = locate(&source, RetryPolicy::default(), |d| {
            delays.push(d);
            async {}
        })
        .await;

        assert_eq!(result, Err(GeoError::Transport("connection reset".to_string())));
        assert_eq!(source.attempts(), 3);
        assert_eq!(delays, vec![Duration::from_secs(1); 2]);

        let mut status = GeoStatus::default();
        status.apply(result);
        assert!(status.is_unavailable());
        assert_eq!(status.label(), None);
    }

    #[tokio::test]
    async fn test_fail_once_then_succeed() {
        let source = ScriptedSource::new(vec![
            Err(GeoError::Status(StatusCode::BAD_GATEWAY)),
            Ok(lisbon()),
        ]);
        let mut delays = Vec::new();

        let result = locate(&source, RetryPolicy::default(), |d| {
            delays.push(d);
            async {}
        })
        .await;

        assert_eq!(result, Ok(lisbon()));
        assert_eq!(source.attempts(), 2);
        assert_eq!(delays.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_retries() {
        let source = ScriptedSource::failing();
        let policy = RetryPolicy {
            retries: 0,
            delay: Duration::from_millis(5),
        };

        let result = locate(&source, policy, |_| async {}).await;

        assert!(result.is_err());
        assert_eq!(source.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_are_spaced_by_delay() {
        let source = ScriptedSource::failing();
        let start = tokio::time::Instant::now();

        let result = locate(&source, RetryPolicy::default(), tokio::time::sleep).await;

        assert!(result.is_err());
        assert_eq!(source.attempts(), 3);
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_stops_pending_retry() {
        let source = ScriptedSource::failing();
        let (handle, registration) = AbortHandle::new_pair();
        let lookup = Abortable::new(
            locate(&source, RetryPolicy::default(), tokio::time::sleep),
            registration,
        );
        tokio::pin!(lookup);

        // first attempt fails and the routine parks on the retry delay
        assert!(futures::poll!(&mut lookup).is_pending());
        assert_eq!(source.attempts(), 1);

        handle.abort();
        assert_eq!(lookup.await, Err(Aborted));

        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(source.attempts(), 1);
    }

    #[test]
    fn test_status_transitions() {
        let mut status = GeoStatus::default();
        assert!(!status.is_settled());
        assert_eq!(status.label(), None);
        assert!(!status.is_unavailable());

        status.apply(Err(GeoError::Incomplete("city")));
        assert!(status.is_unavailable());

        // a later success clears the failure
        status.apply(Ok(lisbon()));
        assert_eq!(status, GeoStatus::Located("Lisbon - 11".to_string()));

        // located is terminal
        status.apply(Err(GeoError::Transport("late failure".to_string())));
        status.apply(Ok(Location {
            city: "Porto".to_string(),
            region_code: "13".to_string(),
        }));
        assert_eq!(status.label(), Some("Lisbon - 11"));
        assert!(!status.is_unavailable());
    }
}
