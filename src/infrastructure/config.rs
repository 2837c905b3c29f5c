use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// `APP_ENV`; error pages show the underlying error only in `development`
    pub environment: String,
    /// Directory of templates overriding the embedded ones
    pub views_dir: Option<PathBuf>,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://local_library.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            views_dir: env::var("VIEWS_DIR").ok().map(PathBuf::from),
            seed_demo: env::var("SEED_DEMO").is_ok(),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
