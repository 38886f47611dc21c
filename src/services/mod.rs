pub mod answer_clicker;
pub mod answer_matcher;
pub mod cookie_store;
pub mod exporter;
pub mod grading;
pub mod page_parser;
pub mod warn_writer;

pub use answer_clicker::{AnswerClicker, ClickReport};
pub use answer_matcher::{AnswerMatcher, MatchStatus, Resolution, StemPolicy};
pub use exporter::{export_bank, normalize_export_path, ExportColumn, ExportTable};
pub use grading::grade;
pub use page_parser::{PageParser, ParseBatch, SkippedNode};
pub use warn_writer::WarnWriter;
