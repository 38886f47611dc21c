use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 程序配置
///
/// 优先级：默认值 < 配置文件 < 环境变量 < 命令行参数
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库 JSON 文件
    pub bank_path: PathBuf,
    /// 预设要操作的URL
    pub target_url: Option<String>,
    /// Cookies 文件
    pub cookies_path: PathBuf,
    /// 写入 cookies 前先打开的站点
    pub cookie_domain_url: String,
    /// 每次点击操作之间的延迟
    pub click_delay: Duration,
    /// 已运行浏览器的调试端口，未设置时自行启动浏览器
    pub browser_debug_port: Option<u16>,
    /// 浏览器可执行文件
    pub chrome_executable: Option<PathBuf>,
    /// 是否无头启动
    pub headless: bool,
    /// 未匹配题目写入的文件
    pub warn_file: String,
    /// 查题库时是否折叠空白
    pub normalize_stems: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_path: PathBuf::from("题库.json"),
            target_url: None,
            cookies_path: PathBuf::from("cookies.json"),
            cookie_domain_url: "https://mooc1.chaoxing.com/".to_string(),
            click_delay: Duration::ZERO,
            browser_debug_port: None,
            chrome_executable: None,
            headless: false,
            warn_file: crate::services::warn_writer::DEFAULT_WARN_FILE.to_string(),
            normalize_stems: false,
        }
    }
}

/// 配置文件（TOML），所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub bank_path: Option<PathBuf>,
    pub target_url: Option<String>,
    pub cookies_path: Option<PathBuf>,
    pub cookie_domain_url: Option<String>,
    pub click_delay_secs: Option<f64>,
    pub browser_debug_port: Option<u16>,
    pub chrome_executable: Option<PathBuf>,
    pub headless: Option<bool>,
    pub warn_file: Option<String>,
    pub normalize_stems: Option<bool>,
}

/// 把秒数转换为点击延迟，拒绝负数、NaN 和超出 `Duration` 范围的值
pub fn delay_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidDelay(secs))
}

fn parse_var<T: std::str::FromStr>(
    var_name: &str,
    value: String,
    expected_type: &str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::EnvVarParseFailed {
        var_name: var_name.to_string(),
        value,
        expected_type: expected_type.to_string(),
    })
}

impl Config {
    /// 加载配置：默认值 → 配置文件（不存在则忽略）→ 环境变量
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();
        if let Some(path) = config_file {
            if let Some(file) = ConfigFile::read(path)? {
                config.apply_file(file)?;
            }
        }
        config.apply_vars(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn apply_file(&mut self, file: ConfigFile) -> Result<(), ConfigError> {
        if let Some(v) = file.bank_path {
            self.bank_path = v;
        }
        if let Some(v) = file.target_url {
            self.target_url = Some(v);
        }
        if let Some(v) = file.cookies_path {
            self.cookies_path = v;
        }
        if let Some(v) = file.cookie_domain_url {
            self.cookie_domain_url = v;
        }
        if let Some(v) = file.click_delay_secs {
            self.click_delay = delay_from_secs(v)?;
        }
        if let Some(v) = file.browser_debug_port {
            self.browser_debug_port = Some(v);
        }
        if let Some(v) = file.chrome_executable {
            self.chrome_executable = Some(v);
        }
        if let Some(v) = file.headless {
            self.headless = v;
        }
        if let Some(v) = file.warn_file {
            self.warn_file = v;
        }
        if let Some(v) = file.normalize_stems {
            self.normalize_stems = v;
        }
        Ok(())
    }

    /// 用变量查找函数覆盖配置（便于测试时不碰真实环境）
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("BANK_PATH") {
            self.bank_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("TARGET_URL") {
            self.target_url = Some(v);
        }
        if let Some(v) = lookup("COOKIES_PATH") {
            self.cookies_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("COOKIE_DOMAIN_URL") {
            self.cookie_domain_url = v;
        }
        if let Some(v) = lookup("CLICK_DELAY_SECS") {
            self.click_delay = delay_from_secs(parse_var("CLICK_DELAY_SECS", v, "f64")?)?;
        }
        if let Some(v) = lookup("BROWSER_DEBUG_PORT") {
            self.browser_debug_port = Some(parse_var("BROWSER_DEBUG_PORT", v, "u16")?);
        }
        if let Some(v) = lookup("CHROME_EXECUTABLE") {
            self.chrome_executable = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("HEADLESS") {
            self.headless = parse_var("HEADLESS", v, "bool")?;
        }
        if let Some(v) = lookup("WARN_FILE") {
            self.warn_file = v;
        }
        if let Some(v) = lookup("NORMALIZE_STEMS") {
            self.normalize_stems = parse_var("NORMALIZE_STEMS", v, "bool")?;
        }
        Ok(())
    }
}

impl ConfigFile {
    /// 读取配置文件，文件不存在时返回 None
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::FileFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::FileFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_delay_rejects_negative() {
        assert_eq!(delay_from_secs(0.5).unwrap(), Duration::from_millis(500));
        assert_eq!(delay_from_secs(0.0).unwrap(), Duration::ZERO);
        assert!(delay_from_secs(-1.0).is_err());
        assert!(delay_from_secs(f64::NAN).is_err());
        assert!(delay_from_secs(f64::INFINITY).is_err());
    }

    #[test]
    fn test_delay_out_of_range_is_error() {
        let err = delay_from_secs(1e20).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDelay(v) if v == 1e20));

        let mut config = Config::default();
        let err = config
            .apply_vars(|name| (name == "CLICK_DELAY_SECS").then(|| "1e20".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDelay(_)));
        assert_eq!(config.click_delay, Duration::ZERO);
    }

    #[test]
    fn test_vars_override_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("BANK_PATH", "bank.json"),
            ("CLICK_DELAY_SECS", "0.2"),
            ("BROWSER_DEBUG_PORT", "9222"),
            ("NORMALIZE_STEMS", "true"),
        ]);
        let mut config = Config::default();
        config
            .apply_vars(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.bank_path, PathBuf::from("bank.json"));
        assert_eq!(config.click_delay, Duration::from_millis(200));
        assert_eq!(config.browser_debug_port, Some(9222));
        assert!(config.normalize_stems);
        assert_eq!(config.cookies_path, PathBuf::from("cookies.json"));
    }

    #[test]
    fn test_bad_var_is_reported() {
        let mut config = Config::default();
        let err = config
            .apply_vars(|name| (name == "BROWSER_DEBUG_PORT").then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarParseFailed { .. }));
    }

    #[test]
    fn test_config_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(
            &path,
            "bank_path = \"my_bank.json\"\nclick_delay_secs = 1.5\nheadless = true\n",
        )
        .unwrap();

        let mut config = Config::default();
        config
            .apply_file(ConfigFile::read(&path).unwrap().unwrap())
            .unwrap();
        assert_eq!(config.bank_path, PathBuf::from("my_bank.json"));
        assert_eq!(config.click_delay, Duration::from_millis(1500));
        assert!(config.headless);

        assert!(ConfigFile::read(&dir.path().join("absent.toml")).unwrap().is_none());
    }
}
