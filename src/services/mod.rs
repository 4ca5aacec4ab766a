pub mod history;
pub mod present;

pub use history::{HistoryQuery, HistoryRequest};
pub use present::{columnar, ohlc_mapping, relabel, Record, Table};
