use std::path::{Path, PathBuf};

/// Server configuration
///
/// # Environment variables
///
/// Every item can be overridden through the environment:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/comanda | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | tracing level filter |
/// | BUS_CAPACITY | 1024 | Broadcast channel capacity |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/comanda HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log level filter
    pub log_level: String,
    /// Broadcast channel capacity for the message bus
    pub bus_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables, defaulting the rest
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/comanda".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            bus_capacity: std::env::var("BUS_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1024),
        }
    }

    /// Override selected values, typically for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Create the work directory layout if it does not exist yet
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        let work_dir = Path::new(&self.work_dir);
        std::fs::create_dir_all(work_dir.join("database"))?;
        std::fs::create_dir_all(work_dir.join("logs"))?;
        Ok(())
    }

    /// Directory holding the SQLite database file
    pub fn database_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("database")
    }

    /// Directory holding rolling log files
    pub fn log_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let config = Config::with_overrides("/tmp/comanda-test", 8080);
        assert_eq!(config.work_dir, "/tmp/comanda-test");
        assert_eq!(config.http_port, 8080);
    }

    #[test]
    fn test_directory_layout() {
        let config = Config::with_overrides("/tmp/comanda-test", 8080);
        assert_eq!(
            config.database_dir(),
            PathBuf::from("/tmp/comanda-test/database")
        );
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/comanda-test/logs"));
    }
}
