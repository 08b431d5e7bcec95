//! Structural Insight Studio: photo captioning plus a rule-based
//! engineering report for civil structures.

pub mod analysis;
pub mod caption;
pub mod config;
pub mod error;
pub mod image_prep;
pub mod report;
pub mod server;

pub use analysis::{engineering_analysis, EngineeringAnalysis, RiskLevel};
pub use caption::{CaptionError, Captioner, GeminiCaptioner};
pub use config::Config;
pub use error::AppError;
pub use image_prep::{decode_upload, ImageError, PreparedImage};
pub use report::generate_engineering_report;
pub use server::{router, AppState};
