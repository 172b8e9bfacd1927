use serde::{Deserialize, Serialize};

use crate::errors::{AnalyticsError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀，例如 `OA__ANALYTICS__ASSUMED_UTC_OFFSET_HOURS=2`
pub const ENV_PREFIX: &str = "OA";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - logging: 日志配置
/// - analytics: 统计口径配置（时区偏移、默认区间、排行榜长度）
/// - store: 订单存储配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl StaticConfig {
    /// 从默认路径加载配置
    pub fn load() -> Self {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：OA，分隔符：__
    pub fn load_from(path: &str) -> Self {
        match Self::try_load_from(path) {
            Ok(config) => {
                if std::path::Path::new(path).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", path);
                }
                config
            }
            Err(e) => {
                eprintln!("[ERROR] {}", e);
                Self::default()
            }
        }
    }

    /// 与 `load_from` 相同，但加载失败时返回错误而不是回退到默认值
    pub fn try_load_from(path: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let settings = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize::<StaticConfig>()?)
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<()> {
        self.analytics.validate()?;

        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(AnalyticsError::config(format!(
                    "Invalid logging.format: '{}'. Valid: text, json",
                    other
                )));
            }
        }

        match self.store.backend.as_str() {
            "file" | "json" | "memory" => Ok(()),
            other => Err(AnalyticsError::config(format!(
                "Invalid store.backend: '{}'. Valid: file, memory",
                other
            ))),
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnalyticsError::serialization(format!("Failed to encode config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 统计口径配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// 高峰时段直方图使用的固定 UTC 偏移（小时，不处理夏令时）
    #[serde(default = "default_assumed_utc_offset_hours")]
    pub assumed_utc_offset_hours: i32,
    /// 营收分桶 key 使用的固定 UTC 偏移（小时）
    #[serde(default)]
    pub bucket_utc_offset_hours: i32,
    /// 未指定日期区间时回看的天数
    #[serde(default = "default_range_days")]
    pub default_range_days: i64,
    /// 排行榜默认条数
    #[serde(default = "default_top_limit")]
    pub default_top_limit: u32,
    /// 为没有订单的桶补零
    #[serde(default)]
    pub fill_empty_buckets: bool,
    /// 多日粒度下合并相邻自然日
    #[serde(default)]
    pub merge_multi_day_buckets: bool,
}

impl AnalyticsConfig {
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("assumed_utc_offset_hours", self.assumed_utc_offset_hours),
            ("bucket_utc_offset_hours", self.bucket_utc_offset_hours),
        ] {
            if !(-12..=14).contains(&value) {
                return Err(AnalyticsError::config(format!(
                    "analytics.{} must be within -12..=14, got {}",
                    key, value
                )));
            }
        }
        if self.default_range_days <= 0 {
            return Err(AnalyticsError::config(format!(
                "analytics.default_range_days must be positive, got {}",
                self.default_range_days
            )));
        }
        if self.default_top_limit == 0 {
            return Err(AnalyticsError::config(
                "analytics.default_top_limit must be at least 1",
            ));
        }
        Ok(())
    }
}

/// 订单存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// file | memory
    #[serde(default = "default_store_backend")]
    pub backend: String,
    #[serde(default = "default_orders_file")]
    pub orders_file: String,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_assumed_utc_offset_hours() -> i32 {
    1
}

fn default_range_days() -> i64 {
    30
}

fn default_top_limit() -> u32 {
    10
}

fn default_store_backend() -> String {
    "file".to_string()
}

fn default_orders_file() -> String {
    "orders.json".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            assumed_utc_offset_hours: default_assumed_utc_offset_hours(),
            bucket_utc_offset_hours: 0,
            default_range_days: default_range_days(),
            default_top_limit: default_top_limit(),
            fill_empty_buckets: false,
            merge_multi_day_buckets: false,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            orders_file: default_orders_file(),
        }
    }
}
