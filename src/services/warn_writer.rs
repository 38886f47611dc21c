//! 未匹配题目记录 - 业务能力层
//!
//! 页面和题库都找不到答案的题目追加到一个文本文件，方便之后人工补录

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 默认记录文件
pub const DEFAULT_WARN_FILE: &str = "unmatched.txt";

/// 一行记录：`时间 | 页面 URL | 题目 序号 | 题干: ...`
pub fn format_entry(at: DateTime<Local>, page_url: &str, question_index: usize, stem: &str) -> String {
    // 题干中的换行会打乱按行读取
    let stem = stem.replace(['\r', '\n'], " ");
    format!(
        "{} | 页面 {} | 题目 {} | 题干: {}\n",
        at.format("%Y-%m-%d %H:%M:%S"),
        page_url,
        question_index,
        stem
    )
}

/// 未匹配题目写入器
pub struct WarnWriter {
    path: String,
}

impl WarnWriter {
    pub fn new() -> Self {
        Self::with_path(DEFAULT_WARN_FILE)
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 追加一条记录，`question_index` 从 1 开始
    pub fn write(&self, page_url: &str, question_index: usize, stem: &str) -> AppResult<()> {
        debug!("记录未匹配题目: 第 {} 题 -> {}", question_index, self.path);

        let entry = format_entry(Local::now(), page_url, question_index, stem);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(entry.as_bytes()))
            .map_err(|e| AppError::file_write_failed(&self.path, e))
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileError;
    use chrono::TimeZone;

    #[test]
    fn test_format_entry() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let line = format_entry(at, "https://example.com/exam", 3, "第一行\n第二行");
        assert_eq!(
            line,
            "2024-05-01 08:30:00 | 页面 https://example.com/exam | 题目 3 | 题干: 第一行 第二行\n"
        );
    }

    #[test]
    fn test_write_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warn.txt");
        let writer = WarnWriter::with_path(path.to_string_lossy());

        writer.write("https://example.com/exam", 3, "找不到的题目").unwrap();
        writer.write("https://example.com/exam", 5, "另一道").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("| 题目 3 | 题干: 找不到的题目"));
        assert!(lines[1].contains("题目 5"));
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let writer = WarnWriter::with_path(dir.path().join("none").join("w.txt").to_string_lossy());
        let err = writer.write("u", 1, "s").unwrap_err();
        assert!(matches!(err, AppError::File(FileError::WriteFailed { ref path, .. }) if path.ends_with("w.txt")));
        assert!(!err.to_string().contains("题库"));
    }
}
