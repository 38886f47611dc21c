use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器 / 页面驱动相关错误
    #[error("浏览器错误: {0}")]
    Driver(#[from] DriverError),
    /// 单道题目结构解析错误
    #[error("题目解析错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// 题库文件错误
    #[error("题库文件错误: {0}")]
    BankFile(#[from] BankFileError),
    /// 导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 自测会话错误
    #[error("测验错误: {0}")]
    Quiz(#[from] QuizError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// cookies、未匹配记录等辅助文件错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum DriverError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed { port: u16, source: BoxedSource },
    /// 启动浏览器失败
    #[error("启动浏览器失败: {message}")]
    LaunchFailed { message: String },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed { url: String, source: BoxedSource },
    /// 执行脚本 / 点击失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed { source: BoxedSource },
    /// 查询元素失败
    #[error("查询元素 '{selector}' 失败: {message}")]
    QueryFailed { selector: String, message: String },
}

/// 题目结构与预期不符
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// 缺少必需的子元素
    #[error("缺少元素: {selector}")]
    MissingElement { selector: String },
    /// 选项数超过可用字母
    #[error("选项数量 {count} 超过字母上限 {max}")]
    TooManyOptions { count: usize, max: usize },
    /// 题干为空
    #[error("题干为空")]
    EmptyStem,
    /// 读取元素时页面驱动报错
    #[error("读取元素失败: {message}")]
    Driver { message: String },
}

/// 题库文件错误
#[derive(Debug, Error)]
pub enum BankFileError {
    /// 读取失败
    #[error("读取题库失败 ({path}): {source}")]
    ReadFailed { path: String, source: std::io::Error },
    /// 写入失败
    #[error("写入题库失败 ({path}): {source}")]
    WriteFailed { path: String, source: std::io::Error },
    /// JSON 格式错误
    #[error("题库格式错误 ({path}): {source}")]
    ParseFailed {
        path: String,
        source: serde_json::Error,
    },
    /// 序列化失败
    #[error("题库序列化失败: {0}")]
    SerializeFailed(#[source] serde_json::Error),
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 题库为空
    #[error("题库为空，无法导出")]
    EmptyBank,
    /// 生成表格失败
    #[error("生成表格失败: {0}")]
    Spreadsheet(String),
    /// 写文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed { path: String, source: std::io::Error },
}

/// 自测会话错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// 抽题数量不在范围内
    #[error("请输入一个介于1和{available}之间的数字 (收到 {requested})")]
    InvalidSampleSize { requested: usize, available: usize },
    /// 当前状态不允许该操作
    #[error("状态 {state} 下不能执行 {action}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
    /// 选项序号越界
    #[error("选项 {option} 超出范围 (共 {count} 个选项)")]
    OptionOutOfRange { option: usize, count: usize },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 延迟不是合法的非负秒数
    #[error("点击延迟必须是合理范围内的非负秒数: {0}")]
    InvalidDelay(f64),
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {message}")]
    FileFailed { path: String, message: String },
}

/// 辅助文件错误，始终带上文件路径
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed { path: String, source: std::io::Error },
    /// 序列化失败
    #[error("序列化失败 ({path}): {source}")]
    SerializeFailed {
        path: String,
        source: serde_json::Error,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Driver(DriverError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建浏览器连接错误
    pub fn browser_connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Driver(DriverError::ConnectionFailed {
            port,
            source: Box::new(source),
        })
    }

    /// 创建导航错误
    pub fn navigation_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Driver(DriverError::NavigationFailed {
            url: url.into(),
            source: Box::new(source),
        })
    }

    /// 创建元素查询错误
    pub fn query_failed(selector: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Driver(DriverError::QueryFailed {
            selector: selector.into(),
            message: message.into(),
        })
    }

    /// 创建缺少元素错误
    pub fn missing_element(selector: impl Into<String>) -> Self {
        AppError::Extraction(ExtractionError::MissingElement {
            selector: selector.into(),
        })
    }

    /// 创建辅助文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 将任意错误折算为题目解析错误（用于跳过原因）
    pub fn into_extraction(self) -> ExtractionError {
        match self {
            AppError::Extraction(e) => e,
            other => ExtractionError::Driver {
                message: other.to_string(),
            },
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_extraction_keeps_extraction_variant() {
        let err = AppError::missing_element("h3.mark_name");
        assert_eq!(
            err.into_extraction(),
            ExtractionError::MissingElement {
                selector: "h3.mark_name".to_string()
            }
        );
    }

    #[test]
    fn test_file_error_names_the_file() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let message = AppError::file_write_failed("unmatched.txt", source).to_string();
        assert!(message.contains("写入文件失败 (unmatched.txt)"));
        assert!(!message.contains("题库"));
    }

    #[test]
    fn test_into_extraction_wraps_driver_error() {
        let err = AppError::query_failed("div.answer_p", "节点已失效");
        match err.into_extraction() {
            ExtractionError::Driver { message } => assert!(message.contains("div.answer_p")),
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
