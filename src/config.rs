use std::env;

const DEFAULT_SEATING_MINUTES: i64 = 90;
const MAX_SEATING_MINUTES: i64 = 24 * 60;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,https://your-frontend-url.vercel.app";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub restaurant_name: String,
    pub seating_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            allowed_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string()),
            ),
            restaurant_name: env::var("RESTAURANT_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "Restaurant".to_string()),
            seating_minutes: parse_seating_minutes(env::var("SEATING_MINUTES").ok().as_deref()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            allowed_origins: parse_origins(DEFAULT_ORIGINS),
            restaurant_name: "Restaurant".to_string(),
            seating_minutes: DEFAULT_SEATING_MINUTES,
        }
    }
}

/// A seating lasts between one minute and one day; anything else falls
/// back to the default.
fn parse_seating_minutes(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|m| (1..=MAX_SEATING_MINUTES).contains(m))
        .unwrap_or(DEFAULT_SEATING_MINUTES)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect()
}
