pub mod error;
pub mod fetch;
pub mod market;
pub mod range;
pub mod services;

pub use error::{AppError, Result};
pub use fetch::{fetch_all, BarSource, BarsRequest, MAX_BATCH_SIZE};
pub use market::{MarketClass, MarketClassifier};
pub use range::{estimate, Granularity, RequestWindow, SessionProfile, TimeRange};
