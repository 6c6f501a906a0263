pub mod app_config;
pub mod config;
pub mod records;
pub mod suppliers;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{DealType, ScrapedCoupon, ScrapedDeal, ScrapedProduct, StockStatus};
pub use suppliers::{load_suppliers, parse_suppliers, SupplierConfig, SuppliersFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read suppliers file {path}: {source}")]
    SuppliersFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse suppliers file: {0}")]
    SuppliersFileParse(#[source] serde_yaml::Error),

    #[error("invalid supplier configuration: {0}")]
    Validation(String),
}
