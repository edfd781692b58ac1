use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Symmetric secret for signing login tokens.
    /// Required for the login route and the ownership gate; `run_server`
    /// refuses to start without it. Admin CLI commands work without one.
    pub jwt_secret: Option<String>,
    /// Lifetime of issued tokens, in seconds.
    /// Set via BANKD_TOKEN_TTL_SECS env var. Default: 900.
    pub token_ttl_secs: i64,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    Ok(Config {
        port: std::env::var("BANKD_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .unwrap_or(3000),
        database_url: std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/bankd".into()),
        jwt_secret: std::env::var("JWT_SECRET").ok(),
        token_ttl_secs: std::env::var("BANKD_TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(900),
    })
}
