use crate::error::{AppResult, BankFileError};
use crate::models::bank::QuestionBank;
use crate::models::question::QuestionRecord;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// 题库加载结果
#[derive(Debug)]
pub enum BankLoad {
    /// 成功加载，附带被丢弃的重复题干数量
    Loaded { bank: QuestionBank, duplicates: usize },
    /// 文件不存在
    NotFound,
    /// 文件存在但无法读取或解析
    Failed(BankFileError),
}

impl BankLoad {
    /// 取出题库，失败和不存在时都视为空题库
    pub fn into_bank(self) -> QuestionBank {
        match self {
            BankLoad::Loaded { bank, .. } => bank,
            BankLoad::NotFound | BankLoad::Failed(_) => QuestionBank::new(),
        }
    }
}

/// 从 JSON 文件加载题库
pub async fn load_bank(path: &Path) -> BankLoad {
    let display = path.display().to_string();

    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return BankLoad::NotFound,
        Err(e) => {
            return BankLoad::Failed(BankFileError::ReadFailed {
                path: display,
                source: e,
            })
        }
    };

    match serde_json::from_str::<Vec<QuestionRecord>>(&content) {
        Ok(records) => {
            let (bank, duplicates) = QuestionBank::from_records(records);
            BankLoad::Loaded { bank, duplicates }
        }
        Err(e) => BankLoad::Failed(BankFileError::ParseFailed {
            path: display,
            source: e,
        }),
    }
}

/// 将题库序列化为 4 空格缩进的 JSON，保留非 ASCII 字符
pub fn to_pretty_json(bank: &QuestionBank) -> AppResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    bank.serialize(&mut serializer)
        .map_err(BankFileError::SerializeFailed)?;
    // serde_json 只输出合法 UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// 保存题库，写入错误原样上抛
pub async fn save_bank(path: &Path, bank: &QuestionBank) -> AppResult<()> {
    let json = to_pretty_json(bank)?;
    fs::write(path, json)
        .await
        .map_err(|e| BankFileError::WriteFailed {
            path: path.display().to_string(),
            source: e,
        })?;
    Ok(())
}
