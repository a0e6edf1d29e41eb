//! Adapters layer: Concrete implementations of ports and assets.
//!
//! - `xgboost`: tree-ensemble model read from an XGBoost JSON export
//! - `banner`: optional ASCII-art banner

pub mod banner;
pub mod xgboost;

pub use banner::Banner;
pub use xgboost::XgboostModel;
