// ⚙️ Configuration - where the board keeps its data and log
// Environment overrides first, then the platform data directory.

use std::env;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "TALLY_BOARD_DB";
pub const ENV_LOG_PATH: &str = "TALLY_BOARD_LOG";

const APP_DIR: &str = "tally-board";
const DB_FILE: &str = "tally.db";
const LOG_FILE: &str = "tally-board.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::resolve(
            env::var_os(ENV_DB_PATH).map(PathBuf::from),
            env::var_os(ENV_LOG_PATH).map(PathBuf::from),
            dirs::data_local_dir(),
        )
    }

    fn resolve(db: Option<PathBuf>, log: Option<PathBuf>, data_dir: Option<PathBuf>) -> Self {
        let db_path = db.unwrap_or_else(|| match data_dir {
            Some(base) => base.join(APP_DIR).join(DB_FILE),
            None => PathBuf::from(DB_FILE),
        });

        // log next to the database unless told otherwise
        let log_path = log.unwrap_or_else(|| db_path.with_file_name(LOG_FILE));

        Self { db_path, log_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_under_data_dir() {
        let config = Config::resolve(None, None, Some(PathBuf::from("/data")));
        assert_eq!(config.db_path, PathBuf::from("/data/tally-board/tally.db"));
        assert_eq!(config.log_path, PathBuf::from("/data/tally-board/tally-board.log"));
    }

    #[test]
    fn test_no_data_dir_uses_cwd() {
        let config = Config::resolve(None, None, None);
        assert_eq!(config.db_path, PathBuf::from("tally.db"));
        assert_eq!(config.log_path, PathBuf::from("tally-board.log"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::resolve(
            Some(PathBuf::from("/tmp/board.db")),
            Some(PathBuf::from("/var/log/board.log")),
            Some(PathBuf::from("/data")),
        );
        assert_eq!(config.db_path, PathBuf::from("/tmp/board.db"));
        assert_eq!(config.log_path, PathBuf::from("/var/log/board.log"));
    }
}
