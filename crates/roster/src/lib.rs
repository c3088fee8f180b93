//! `rollbook-roster` — Roster classification engine.
//!
//! Pure engine crate: receives a pre-loaded table, returns the classified
//! report bundle. No CLI or IO dependencies.

pub mod category;
pub mod coerce;
pub mod error;
pub mod matrix;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod summary;
pub mod table;

pub use category::{classify, Attendance, Category, ClassifiedRecord, Discipline};
pub use error::{ClassifyError, Field};
pub use matrix::{ClassificationMatrix, CountMatrix, Matrix};
pub use pipeline::{run, validate};
pub use report::ReportBundle;
pub use summary::Summary;
pub use table::Table;
