pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 設定ファイルのパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "EC2FLOW_CONFIG";

const CANDIDATES: [&str; 4] = [
    "ec2flow.local.yaml",
    ".ec2flow.local.yaml",
    "ec2flow.yaml",
    ".ec2flow.yaml",
];

/// ec2flowの設定ディレクトリを取得（存在しなければ作成）
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("ec2flow");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// 設定ファイルを探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 EC2FLOW_CONFIG (直接パス指定)
/// 2. カレントディレクトリ: ec2flow.local.yaml, .ec2flow.local.yaml, ec2flow.yaml, .ec2flow.yaml
/// 3. ~/.config/ec2flow/config.yaml (グローバル設定)
pub fn find_config_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
    }

    // 2. カレントディレクトリで検索
    let current_dir = std::env::current_dir()?;
    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    // 3. グローバル設定ファイル
    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("ec2flow").join("config.yaml");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ConfigFileNotFound)
}

/// ポーリング設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitSettings {
    /// describe呼び出しの間隔（ミリ秒）
    pub interval_ms: u64,
    /// タイムアウト（秒）。未指定なら無制限に待つ
    pub timeout_secs: Option<u64>,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            timeout_secs: None,
        }
    }
}

impl WaitSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// ec2flowの設定
///
/// ```yaml
/// region: ap-northeast-1
/// profile: production
/// wait:
///   interval_ms: 5000
///   timeout_secs: 600
/// max_pages: 100
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
    pub wait: WaitSettings,
    pub max_pages: Option<usize>,
}

impl Settings {
    /// 設定ファイルを読み込む。見つからない場合はデフォルト値
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Ok(path) => Self::from_path(&path),
            Err(ConfigError::ConfigFileNotFound) => {
                tracing::debug!("設定ファイルなし、デフォルト設定を使用");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// 指定パスの設定ファイルを読み込む
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("設定ファイルを読み込みました: {}", path.display());
        Ok(settings)
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// 環境変数で上書き (EC2FLOW_REGION, EC2FLOW_PROFILE, EC2FLOW_ENDPOINT_URL)
    pub fn apply_env(mut self) -> Self {
        if let Ok(region) = std::env::var("EC2FLOW_REGION") {
            self.region = Some(region);
        }
        if let Ok(profile) = std::env::var("EC2FLOW_PROFILE") {
            self.profile = Some(profile);
        }
        if let Ok(url) = std::env::var("EC2FLOW_ENDPOINT_URL") {
            self.endpoint_url = Some(url);
        }
        self
    }
}
