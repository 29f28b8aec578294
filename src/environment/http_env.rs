// HTTP environment - drives the factory simulation server
use crate::environment::{FactoryEnvironment, FeedbackParser, SkillCall};
use crate::models::Observation;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
}

/// Environment implementation over the simulation server's HTTP surface.
/// `POST /api/execute` runs one rendered skill call and returns its
/// stdout/stderr; `GET /api/observe` returns a structured observation
/// without touching the game world.
pub struct HttpEnvironment {
    client: reqwest::Client,
    base_url: String,
    parser: FeedbackParser,
    debug_mode: bool,
    api_logging: bool,
}

impl HttpEnvironment {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, Box<dyn std::error::Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_seconds.max(1)))
            .build()?;

        Ok(HttpEnvironment {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            parser: FeedbackParser::new(),
            debug_mode: false,
            api_logging: false,
        })
    }

    /// When enabled, every call must be approved interactively first.
    pub fn set_debug_mode(&mut self, debug: bool) {
        self.debug_mode = debug;
    }

    pub fn set_api_logging(&mut self, logging: bool) {
        self.api_logging = logging;
    }

    fn request_approval(&self, method: &str, url: &str, body: Option<&str>) -> bool {
        if !self.debug_mode {
            return true;
        }

        println!("\n🐛 DEBUG API CALL:");
        println!("   Method: {}", method);
        println!("   URL: {}", url);
        if let Some(body) = body {
            println!("   Body: {}", body);
        }
        print!("   Approve? (y/n): ");

        use std::io::{self, Write as _};
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }

        matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn log_api_call(&self, method: &str, url: &str, body: Option<&str>, status: u16, response: &str) {
        if !self.api_logging {
            return;
        }

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let log_entry = format!(
            "\n=== API CALL [{timestamp}] ===\n\
             Method: {method}\n\
             URL: {url}\n\
             Request Body: {body}\n\
             Response Status: {status}\n\
             Response Body: {response}\n\
             ========================================\n",
            timestamp = timestamp,
            method = method,
            url = url,
            body = body.unwrap_or("None"),
            status = status,
            response = response,
        );

        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open("api_debug.log")
        {
            let _ = file.write_all(log_entry.as_bytes());
        }
    }
}

#[async_trait]
impl FactoryEnvironment for HttpEnvironment {
    async fn execute(&self, call: &SkillCall) -> Result<Observation, Box<dyn std::error::Error>> {
        let url = format!("{}/api/execute", self.base_url);
        let body = serde_json::json!({ "code": call.to_string() });
        let body_text = body.to_string();

        if !self.request_approval("POST", &url, Some(&body_text)) {
            return Err("API call not approved".into());
        }

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status().as_u16();
        let response_text = response.text().await?;
        self.log_api_call("POST", &url, Some(&body_text), status, &response_text);

        if !(200..300).contains(&status) {
            return Err(format!("execute failed with status {}: {}", status, response_text).into());
        }

        let result: ExecuteResponse = serde_json::from_str(&response_text)?;
        Ok(self.parser.parse(&result.stdout, &result.stderr))
    }

    async fn observe(&self) -> Result<Observation, Box<dyn std::error::Error>> {
        let url = format!("{}/api/observe", self.base_url);

        if !self.request_approval("GET", &url, None) {
            return Err("API call not approved".into());
        }

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let response_text = response.text().await?;
        self.log_api_call("GET", &url, None, status, &response_text);

        if !(200..300).contains(&status) {
            return Err(format!("observe failed with status {}: {}", status, response_text).into());
        }

        let observation: Observation = serde_json::from_str(&response_text)?;
        Ok(observation)
    }
}
