//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。所有变量带默认值，
//! 服务在完全没有环境配置时也能启动。

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Environment variable '{}': {}",
            self.variable, self.message
        )
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar {
    type Value;

    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<Self::Value>;

    fn default_value() -> Option<Self::Value> {
        None
    }

    fn get() -> EnvResult<Self::Value> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::default_value().ok_or_else(|| EnvError {
                variable: Self::NAME.to_string(),
                message: "Required environment variable not set".to_string(),
            }),
        }
    }

    /// 可选变量：未设置或解析失败都返回 None
    fn get_opt() -> Option<Self::Value> {
        env::var(Self::NAME).ok().and_then(|v| Self::parse(&v).ok())
    }
}

fn parse_lang(value: &str, variable: &str) -> EnvResult<String> {
    let lang = value.trim().to_lowercase();
    if lang.len() != 2 {
        return Err(EnvError {
            variable: variable.to_string(),
            message: "Language code must be 2 characters (ISO 639-1)".to_string(),
        });
    }
    Ok(lang)
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 绑定地址
    pub struct Host;
    impl EnvVar for Host {
        type Value = String;
        const NAME: &'static str = "PEREVOD_HOST";
        const DESCRIPTION: &'static str = "Address the web server binds to";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }

        fn default_value() -> Option<String> {
            Some("0.0.0.0".to_string())
        }
    }

    /// 监听端口
    pub struct Port;
    impl EnvVar for Port {
        type Value = u16;
        const NAME: &'static str = "PEREVOD_PORT";
        const DESCRIPTION: &'static str = "Port the web server listens on";

        fn parse(value: &str) -> EnvResult<u16> {
            value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: format!("Invalid port '{}'", value),
            })
        }

        fn default_value() -> Option<u16> {
            Some(3000)
        }
    }

    /// 静态前端目录
    pub struct StaticDir;
    impl EnvVar for StaticDir {
        type Value = String;
        const NAME: &'static str = "PEREVOD_STATIC_DIR";
        const DESCRIPTION: &'static str = "Directory with the static front-end";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }

        fn default_value() -> Option<String> {
            Some("public".to_string())
        }
    }

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar for LogLevel {
        type Value = String;
        const NAME: &'static str = "PEREVOD_LOG_LEVEL";
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }

        fn default_value() -> Option<String> {
            Some("info".to_string())
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;

    /// 源语言
    pub struct SourceLang;
    impl EnvVar for SourceLang {
        type Value = String;
        const NAME: &'static str = "PEREVOD_SOURCE_LANG";
        const DESCRIPTION: &'static str = "Source language (ISO 639-1 code)";

        fn parse(value: &str) -> EnvResult<String> {
            parse_lang(value, Self::NAME)
        }

        fn default_value() -> Option<String> {
            Some("en".to_string())
        }
    }

    /// 目标语言
    pub struct TargetLang;
    impl EnvVar for TargetLang {
        type Value = String;
        const NAME: &'static str = "PEREVOD_TARGET_LANG";
        const DESCRIPTION: &'static str = "Target language (ISO 639-1 code)";

        fn parse(value: &str) -> EnvResult<String> {
            parse_lang(value, Self::NAME)
        }

        fn default_value() -> Option<String> {
            Some("ru".to_string())
        }
    }

    /// 主力提供方地址
    pub struct MyMemoryUrl;
    impl EnvVar for MyMemoryUrl {
        type Value = String;
        const NAME: &'static str = "PEREVOD_MYMEMORY_URL";
        const DESCRIPTION: &'static str = "Primary translation provider endpoint";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }

        fn default_value() -> Option<String> {
            Some("https://api.mymemory.translated.net/get".to_string())
        }
    }

    /// 回退提供方地址（可选，未设置时跳过回退层）
    pub struct FallbackUrl;
    impl EnvVar for FallbackUrl {
        type Value = String;
        const NAME: &'static str = "PEREVOD_FALLBACK_URL";
        const DESCRIPTION: &'static str = "Self-hosted fallback translation endpoint";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// 回退提供方 API key（可选）
    pub struct FallbackApiKey;
    impl EnvVar for FallbackApiKey {
        type Value = String;
        const NAME: &'static str = "PEREVOD_FALLBACK_API_KEY";
        const DESCRIPTION: &'static str = "API key for the fallback provider";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }

    /// 天气提供方地址
    pub struct WeatherUrl;
    impl EnvVar for WeatherUrl {
        type Value = String;
        const NAME: &'static str = "PEREVOD_WEATHER_URL";
        const DESCRIPTION: &'static str = "Weather provider base URL";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }

        fn default_value() -> Option<String> {
            Some("https://wttr.in".to_string())
        }
    }
}
