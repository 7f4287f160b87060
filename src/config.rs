//! Configuration for sectorfs
//!
//! Centralized configuration with sensible defaults.

/// Default storage server address
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1";

/// Default storage server port
pub const DEFAULT_SERVER_PORT: u16 = 19876;

/// Default number of cache lines held by the sector cache
pub const DEFAULT_CACHE_LINES: usize = 64;

/// Main configuration for a sectorfs driver session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Storage server address
    pub server_addr: String,

    /// Storage server port
    pub server_port: u16,

    // -------------------------------------------------------------------------
    // Cache Configuration
    // -------------------------------------------------------------------------
    /// Number of sector-sized lines in the LRU cache
    pub cache_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            cache_lines: DEFAULT_CACHE_LINES,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the storage server address
    pub fn server_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.server_addr = addr.into();
        self
    }

    /// Set the storage server port
    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    /// Set the number of cache lines
    pub fn cache_lines(mut self, lines: usize) -> Self {
        self.config.cache_lines = lines;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
