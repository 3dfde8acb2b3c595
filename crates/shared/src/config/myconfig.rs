use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub frontend_url: Option<String>,
    pub run_migrations: bool,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub otel_endpoint: Option<String>,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let port = lookup("PORT")
            .unwrap_or_else(|| "4000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("true") => true,
            Some("false") => false,
            Some(other) => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let db_min_conn = lookup("DB_MIN_CONN")
            .unwrap_or_else(|| "1".to_string())
            .parse::<u32>()
            .context("DB_MIN_CONN must be a valid u32 integer")?;

        let db_max_conn = lookup("DB_MAX_CONN")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONN must be a valid u32 integer")?;

        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONN ({db_min_conn}) cannot exceed DB_MAX_CONN ({db_max_conn})"
            ));
        }

        let flag = |key: &str| {
            lookup(key)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false)
        };

        Ok(Self {
            database_url,
            port,
            frontend_url: lookup("FRONTEND_URL").filter(|v| !v.is_empty()),
            run_migrations,
            db_min_conn,
            db_max_conn,
            otel_endpoint: lookup("OTEL_ENDPOINT").filter(|v| !v.is_empty()),
            is_dev: flag("DEV_MODE"),
            enable_file_log: flag("ENABLE_FILE_LOG"),
        })
    }
}
