use std::env;

pub const DEFAULT_API_BASE_URL: &str = "https://lab-test-backend-1.onrender.com/api/v1";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
        }
    }
}
