/// Market service configuration loaded from environment variables.
#[derive(Debug)]
pub struct MarketConfig {
    /// TCP port for the HTTP server (default 3001). Env var: `MARKET_PORT`.
    pub market_port: u16,
    /// HS256 secret shared with the identity provider that issues the
    /// bearer tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
}

impl MarketConfig {
    pub fn from_env() -> Self {
        Self {
            market_port: std::env::var("MARKET_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
        }
    }
}
