pub mod csv;
pub mod json;

pub use self::csv::export_csv;
pub use self::json::export_json;
pub use crate::error::ExportError;
