//! Domain layer - Report model and text transformations

pub mod date_prefix;
pub mod markup;
pub mod post;
pub mod report;
pub mod tags;

pub use date_prefix::{exclusion_cutoff, YearMonth};
pub use post::Post;
pub use report::{MonthReport, ReportBook, TagSection};
pub use tags::{TagSource, TagStyle, TagTranslator};
