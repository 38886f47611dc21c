//! 题库会话 - 编排层
//!
//! 唯一持有可变题库的地方：启动时加载一次，每次成功合并后立即保存

use crate::error::AppResult;
use crate::models::bank::QuestionBank;
use crate::models::loaders::{load_bank, save_bank, BankLoad};
use crate::models::question::QuestionRecord;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 题库会话
#[derive(Debug)]
pub struct BankSession {
    path: PathBuf,
    bank: QuestionBank,
}

impl BankSession {
    /// 加载题库，文件不存在或损坏时从空题库开始
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let bank = match load_bank(&path).await {
            BankLoad::Loaded { bank, duplicates } => {
                info!("已成功加载本地题库 '{}'，共 {} 道题目。", path.display(), bank.len());
                if duplicates > 0 {
                    warn!("题库中有 {} 道重复题干的题目，已忽略", duplicates);
                }
                bank
            }
            BankLoad::NotFound => {
                info!("本地题库 '{}' 不存在，将在提取后创建。", path.display());
                QuestionBank::new()
            }
            BankLoad::Failed(e) => {
                warn!("警告: 题库文件 '{}' 无法使用: {}", path.display(), e);
                QuestionBank::new()
            }
        };
        Self { path, bank }
    }

    pub fn with_bank(path: impl Into<PathBuf>, bank: QuestionBank) -> Self {
        Self {
            path: path.into(),
            bank,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// 合并新题目并保存
    ///
    /// 保存失败时错误原样返回，内存中的题库保持合并前的状态
    pub async fn merge_and_persist(&mut self, scraped: Vec<QuestionRecord>) -> AppResult<usize> {
        let outcome = self.bank.clone().merge(scraped);
        save_bank(&self.path, &outcome.bank).await?;
        self.bank = outcome.bank;
        Ok(outcome.added)
    }
}
