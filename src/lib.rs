//! # Quiz Bank Helper
//!
//! 从答题页面提取题目建立本地题库、按题库自动作答，并提供终端自测
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageDriver` / `PageNode` - 页面驱动能力接口，核心逻辑只依赖它们
//! - `ChromiumDriver` - 基于 chromiumoxide 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单道题目或纯数据
//! - `PageParser` - 题目节点 → `QuestionRecord`
//! - `AnswerMatcher` - 页面答案 / 题库题干匹配
//! - `AnswerClicker` - 清空并点击选项
//! - `grade` - 自测评分
//! - `ExportTable` - 导出 xlsx
//!
//! ### ③ 流程层（Workflow）
//! - `AnswerFlow` - 一道题的作答流程（match → click → warn）
//! - `QuizSession` - 自测状态机
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 交互式菜单
//! - `orchestrator/page_processor` - 单页提取 / 作答
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ChromiumDriver, PageDriver, PageNode};
pub use models::{QuestionBank, QuestionOption, QuestionRecord};
pub use orchestrator::{App, BankSession};
pub use workflow::{AnswerFlow, ProcessResult, QuestionCtx, QuizSession};
