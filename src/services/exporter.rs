//! 题库导出服务
//!
//! 先把题库整理成二维表（纯函数），再用 umya-spreadsheet 写成 xlsx

use crate::error::{AppResult, ExportError};
use crate::models::bank::QuestionBank;
use crate::models::question::letter_for;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::info;

/// 默认导出文件名
pub const DEFAULT_EXPORT_FILE: &str = "题库.xlsx";

/// 表格列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportColumn {
    Type,
    Stem,
    Option(char),
    Answer,
}

impl ExportColumn {
    pub fn header(&self) -> String {
        match self {
            ExportColumn::Type => "题型".to_string(),
            ExportColumn::Stem => "题干".to_string(),
            ExportColumn::Option(letter) => format!("选项{}", letter),
            ExportColumn::Answer => "答案".to_string(),
        }
    }
}

/// 导出用的二维表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub columns: Vec<ExportColumn>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// 由题库构建表格，选项列数取题库中最多的选项数
    pub fn from_bank(bank: &QuestionBank) -> AppResult<Self> {
        if bank.is_empty() {
            return Err(ExportError::EmptyBank.into());
        }

        let option_columns = bank.max_option_count();
        let mut columns = vec![ExportColumn::Type, ExportColumn::Stem];
        columns.extend((0..option_columns).filter_map(letter_for).map(ExportColumn::Option));
        columns.push(ExportColumn::Answer);

        let rows = bank
            .iter()
            .map(|record| {
                let mut row = Vec::with_capacity(columns.len());
                row.push(record.kind.clone());
                row.push(record.stem.clone());
                for i in 0..option_columns {
                    row.push(
                        record
                            .options
                            .get(i)
                            .map(|opt| opt.text.clone())
                            .unwrap_or_default(),
                    );
                }
                row.push(record.answer_string());
                row
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(ExportColumn::header).collect()
    }

    /// 生成 xlsx 字节
    pub fn to_xlsx_bytes(&self) -> AppResult<Vec<u8>> {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book
            .get_sheet_mut(&0)
            .ok_or_else(|| ExportError::Spreadsheet("默认工作表不存在".to_string()))?;
        sheet.set_name("题库");

        // 表头加粗
        for (col_idx, header) in self.headers().iter().enumerate() {
            let cell = sheet.get_cell_mut(((col_idx as u32) + 1, 1));
            cell.set_value(header.as_str());
            cell.get_style_mut().get_font_mut().set_bold(true);
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            let row_num = (row_idx as u32) + 2;
            for (col_idx, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                sheet
                    .get_cell_mut(((col_idx as u32) + 1, row_num))
                    .set_value(value.as_str());
            }
        }

        let mut buf = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buf)
            .map_err(|e| ExportError::Spreadsheet(format!("XLSX 生成失败: {}", e)))?;
        Ok(buf.into_inner())
    }
}

/// 规范化用户输入的导出文件名：空输入用默认名，补齐 .xlsx 后缀
pub fn normalize_export_path(input: &str) -> PathBuf {
    let name = input.trim();
    if name.is_empty() {
        return PathBuf::from(DEFAULT_EXPORT_FILE);
    }
    if name.to_lowercase().ends_with(".xlsx") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}.xlsx", name))
    }
}

/// 导出题库到 xlsx 文件
pub async fn export_bank(bank: &QuestionBank, path: &Path) -> AppResult<()> {
    info!("正在将 {} 道题目转换为Excel格式...", bank.len());
    let bytes = ExportTable::from_bank(bank)?.to_xlsx_bytes()?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| ExportError::WriteFailed {
            path: path.display().to_string(),
            source: e,
        })?;
    info!("成功！题库已导出到 '{}'。", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::question::{QuestionOption, QuestionRecord};

    fn bank() -> QuestionBank {
        QuestionBank::from_records(vec![
            QuestionRecord::new(
                "单选题",
                "s1",
                vec![
                    QuestionOption::new("a", false),
                    QuestionOption::new("b", true),
                    QuestionOption::new("c", false),
                ],
            ),
            QuestionRecord::new(
                "多选题",
                "s2",
                vec![QuestionOption::new("d", true), QuestionOption::new("e", true)],
            ),
        ])
        .0
    }

    #[test]
    fn test_columns_follow_max_option_count() {
        let table = ExportTable::from_bank(&bank()).unwrap();
        assert_eq!(
            table.columns,
            vec![
                ExportColumn::Type,
                ExportColumn::Stem,
                ExportColumn::Option('A'),
                ExportColumn::Option('B'),
                ExportColumn::Option('C'),
                ExportColumn::Answer,
            ]
        );
        assert_eq!(
            table.headers(),
            vec!["题型", "题干", "选项A", "选项B", "选项C", "答案"]
        );
    }

    #[test]
    fn test_short_rows_leave_option_empty() {
        let table = ExportTable::from_bank(&bank()).unwrap();
        assert_eq!(table.rows[0], vec!["单选题", "s1", "a", "b", "c", "B"]);
        assert_eq!(table.rows[1], vec!["多选题", "s2", "d", "e", "", "AB"]);
    }

    #[test]
    fn test_empty_bank_is_rejected() {
        let err = ExportTable::from_bank(&QuestionBank::new()).unwrap_err();
        assert!(matches!(err, AppError::Export(ExportError::EmptyBank)));
    }

    #[test]
    fn test_normalize_export_path() {
        assert_eq!(normalize_export_path(""), PathBuf::from("题库.xlsx"));
        assert_eq!(normalize_export_path("out"), PathBuf::from("out.xlsx"));
        assert_eq!(normalize_export_path("OUT.XLSX"), PathBuf::from("OUT.XLSX"));
    }

    #[tokio::test]
    async fn test_export_writes_readable_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.xlsx");
        export_bank(&bank(), &path).await.unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).unwrap();
        let sheet = &book.get_sheet_collection()[0];
        let value = |col: u32, row: u32| {
            sheet
                .get_cell((col, row))
                .map(|c| c.get_value().to_string())
                .unwrap_or_default()
        };

        assert_eq!(value(1, 1), "题型");
        assert_eq!(value(6, 1), "答案");
        assert_eq!(value(2, 3), "s2");
        assert_eq!(value(5, 3), "");
        assert_eq!(value(6, 3), "AB");
    }
}
