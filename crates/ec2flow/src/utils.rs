use colored::Colorize;
use ec2flow_compute::{Filter, InstanceState, Tag};
use serde::Serialize;

/// "KEY=VALUE" 形式のタグをパース
/// 例: "Name=web-1" -> Tag { key: "Name", value: "web-1" }
///     "env" -> Tag { key: "env", value: "" }
pub fn parse_tag(s: &str) -> anyhow::Result<Tag> {
    let (key, value) = s.split_once('=').unwrap_or((s, ""));
    if key.is_empty() {
        anyhow::bail!("タグのキーが空です: '{}'", s);
    }
    Ok(Tag::new(key, value))
}

/// "NAME=V1,V2" 形式のフィルタをパース
/// 例: "instance-state-name=running,stopped"
pub fn parse_filter(s: &str) -> anyhow::Result<Filter> {
    let (name, values) = s
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("フィルタは NAME=VALUE 形式で指定してください: '{}'", s))?;
    if name.is_empty() {
        anyhow::bail!("フィルタ名が空です: '{}'", s);
    }
    let values: Vec<&str> = values.split(',').filter(|v| !v.is_empty()).collect();
    if values.is_empty() {
        anyhow::bail!("フィルタの値が空です: '{}'", s);
    }
    Ok(Filter::new(name, values))
}

/// 進捗メッセージ。--json 時は標準出力を汚さないよう標準エラーへ
pub fn progress(json: bool, message: impl std::fmt::Display) {
    if json {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}

/// JSONで標準出力へ
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 状態に応じて色付け
pub fn colored_state(state: &InstanceState) -> colored::ColoredString {
    let s = state.as_str();
    match state {
        InstanceState::Running => s.green(),
        InstanceState::Pending | InstanceState::Stopping | InstanceState::ShuttingDown => {
            s.yellow()
        }
        InstanceState::Stopped => s.dimmed(),
        InstanceState::Terminated => s.red(),
        InstanceState::Unknown(_) => s.normal(),
    }
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
