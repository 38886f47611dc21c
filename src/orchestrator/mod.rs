//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 交互式菜单
//! - 管理应用生命周期（初始化、菜单循环、退出时关闭浏览器）
//! - 唯一持有 Browser 的模块
//!
//! ### `bank_session` - 题库会话
//! - 唯一持有可变题库，决定何时保存
//!
//! ### `page_processor` - 单个页面处理器
//! - 提取当前页面并合并进题库
//! - 逐题调用 workflow::AnswerFlow 自动作答，输出统计
//!
//! ### `quiz_shell` - 终端自测
//! - 驱动 workflow::QuizSession 状态机
//!
//! ## 层次关系
//!
//! ```text
//! app (菜单)
//!     ↓
//! page_processor (处理 Vec<题目节点>)
//!     ↓
//! workflow::AnswerFlow (处理单道题)
//!     ↓
//! services (能力层：parse / match / click / export / grade)
//!     ↓
//! infrastructure (基础设施：PageDriver)
//! ```

pub mod app;
pub mod bank_session;
pub mod page_processor;
pub mod quiz_shell;

// 重新导出主要类型
pub use app::{export_only, quiz_only, App};
pub use bank_session::BankSession;
pub use page_processor::{auto_answer_page, scrape_and_merge, AnswerStats, ScrapeSummary};
