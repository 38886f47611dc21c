//! 基础设施层
//!
//! 持有稀缺资源（Page），只向上暴露"查节点、读文本、点击"的能力

pub mod chromium;
pub mod driver;
pub mod selectors;

pub use chromium::{ChromiumDriver, ChromiumNode};
pub use driver::{PageDriver, PageNode};
