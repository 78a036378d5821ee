use crate::utils;
use colored::Colorize;
use ec2flow_compute::{ComputeClient, KeyPair};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// create の JSON 出力。保存しなかった秘密鍵はここでしか受け取れない
#[derive(Serialize)]
struct CreatedKeyPair<'a> {
    #[serde(flatten)]
    key: &'a KeyPair,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_to: Option<&'a Path>,
}

impl<'a> CreatedKeyPair<'a> {
    fn new(key: &'a KeyPair, saved_to: Option<&'a Path>) -> Self {
        Self {
            key,
            private_key: if saved_to.is_some() {
                None
            } else {
                key.material.as_deref()
            },
            saved_to,
        }
    }
}

pub async fn handle_list(client: &dyn ComputeClient, json: bool) -> anyhow::Result<()> {
    let keys = client.key_pairs().await?;

    if json {
        return utils::print_json(&keys);
    }

    println!();
    if keys.is_empty() {
        println!("{}", "キーペアはありません".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!("{:<30} {:<10} {:<60}", "NAME", "TYPE", "FINGERPRINT").bold()
    );
    println!("{}", "─".repeat(100).dimmed());
    for key in &keys {
        println!(
            "{:<30} {:<10} {:<60}",
            key.name.cyan(),
            utils::or_dash(key.key_type.as_deref()),
            utils::or_dash(key.fingerprint.as_deref()).dimmed()
        );
    }
    Ok(())
}

pub async fn handle_create(
    client: &dyn ComputeClient,
    name: &str,
    save: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    if client.key_pair(name).await?.is_some() {
        anyhow::bail!("キーペア '{}' は既に存在します", name);
    }

    let key = client.create_key_pair(name).await?;

    if let Some(path) = &save {
        key.save_material(path)?;
    }

    if json {
        return utils::print_json(&CreatedKeyPair::new(&key, save.as_deref()));
    }

    println!("{}", format!("✓ キーペア '{}' を作成しました", key.name).green().bold());
    if let Some(fingerprint) = &key.fingerprint {
        println!("  fingerprint: {}", fingerprint.dimmed());
    }
    match &save {
        Some(path) => println!("  秘密鍵: {}", path.display().to_string().cyan()),
        None => {
            println!();
            println!(
                "{}",
                "秘密鍵は再取得できません。--save で保存してください:".yellow()
            );
            if let Some(material) = &key.material {
                println!("{}", material);
            }
        }
    }
    Ok(())
}

pub async fn handle_import(
    client: &dyn ComputeClient,
    name: &str,
    public_key_file: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let public_key = std::fs::read(public_key_file).map_err(|e| {
        anyhow::anyhow!(
            "公開鍵を読み込めません ({}): {}",
            public_key_file.display(),
            e
        )
    })?;

    let key = client.import_key_pair(name, &public_key).await?;

    if json {
        return utils::print_json(&key);
    }
    println!(
        "{}",
        format!("✓ キーペア '{}' をインポートしました", key.name)
            .green()
            .bold()
    );
    Ok(())
}

pub async fn handle_delete(client: &dyn ComputeClient, name: &str) -> anyhow::Result<()> {
    client.delete_key_pair(name).await?;
    println!("{}", format!("✓ キーペア '{}' を削除しました", name).green().bold());
    Ok(())
}
