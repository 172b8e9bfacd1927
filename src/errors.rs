use std::fmt;

#[derive(Debug, Clone)]
pub enum AnalyticsError {
    Config(String),
    FileOperation(String),
    Serialization(String),
    DateParse(String),
    InvalidDateRange(String),
    StoreQuery(String),
}

impl AnalyticsError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AnalyticsError::Config(_) => "E001",
            AnalyticsError::FileOperation(_) => "E002",
            AnalyticsError::Serialization(_) => "E003",
            AnalyticsError::DateParse(_) => "E004",
            AnalyticsError::InvalidDateRange(_) => "E005",
            AnalyticsError::StoreQuery(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            AnalyticsError::Config(_) => "Configuration Error",
            AnalyticsError::FileOperation(_) => "File Operation Error",
            AnalyticsError::Serialization(_) => "Serialization Error",
            AnalyticsError::DateParse(_) => "Date Parse Error",
            AnalyticsError::InvalidDateRange(_) => "Invalid Date Range",
            AnalyticsError::StoreQuery(_) => "Order Store Query Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            AnalyticsError::Config(msg) => msg,
            AnalyticsError::FileOperation(msg) => msg,
            AnalyticsError::Serialization(msg) => msg,
            AnalyticsError::DateParse(msg) => msg,
            AnalyticsError::InvalidDateRange(msg) => msg,
            AnalyticsError::StoreQuery(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于 CLI 终端）
    #[cfg(feature = "cli")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于日志和 JSON 输出）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AnalyticsError {}

// 便捷的构造函数
impl AnalyticsError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        AnalyticsError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        AnalyticsError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        AnalyticsError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        AnalyticsError::DateParse(msg.into())
    }

    pub fn invalid_date_range<T: Into<String>>(msg: T) -> Self {
        AnalyticsError::InvalidDateRange(msg.into())
    }

    pub fn store_query<T: Into<String>>(msg: T) -> Self {
        AnalyticsError::StoreQuery(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for AnalyticsError {
    fn from(err: std::io::Error) -> Self {
        AnalyticsError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        AnalyticsError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for AnalyticsError {
    fn from(err: csv::Error) -> Self {
        AnalyticsError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for AnalyticsError {
    fn from(err: config::ConfigError) -> Self {
        AnalyticsError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
