//! Server settings chosen at startup.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::{Args, ValueEnum};

/// Where transactions are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// A SQLite database file.
    #[default]
    Sqlite,
    /// Process memory, lost when the server stops.
    Memory,
}

/// The settings for running the server.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Where to keep transactions.
    #[arg(long, value_enum, default_value_t = StorageBackend::Sqlite)]
    pub store: StorageBackend,

    /// File path to the application SQLite database. Ignored for the memory store.
    #[arg(long, default_value = "finance.db")]
    pub db_path: PathBuf,

    /// The IP address to listen on.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// File path for the debug log.
    #[arg(long, default_value = "debug.log")]
    pub log_path: PathBuf,
}

impl ServerConfig {
    /// The address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            store: StorageBackend::default(),
            db_path: PathBuf::from("finance.db"),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            log_path: PathBuf::from("debug.log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        net::{IpAddr, Ipv4Addr, SocketAddr},
        path::PathBuf,
    };

    use clap::Parser;

    use super::{ServerConfig, StorageBackend};

    #[derive(Parser, Debug)]
    struct TestArgs {
        #[command(flatten)]
        config: ServerConfig,
    }

    fn parse(args: &[&str]) -> ServerConfig {
        TestArgs::try_parse_from(std::iter::once("server").chain(args.iter().copied()))
            .expect("Could not parse arguments")
            .config
    }

    #[test]
    fn defaults_match_default_impl() {
        assert_eq!(parse(&[]), ServerConfig::default());
    }

    #[test]
    fn parses_all_options() {
        let config = parse(&[
            "--store",
            "memory",
            "--db-path",
            "/tmp/money.db",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-path",
            "server.log",
        ]);

        assert_eq!(config.store, StorageBackend::Memory);
        assert_eq!(config.db_path, PathBuf::from("/tmp/money.db"));
        assert_eq!(config.log_path, PathBuf::from("server.log"));
        assert_eq!(
            config.socket_addr(),
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080)
        );
    }

    #[test]
    fn rejects_unknown_store() {
        let result = TestArgs::try_parse_from(["server", "--store", "mongodb"]);

        assert!(result.is_err());
    }
}
