use crate::utils;
use colored::Colorize;
use ec2flow_compute::{ComputeClient, Filter, Tag};

pub async fn handle_list(
    client: &dyn ComputeClient,
    filters: Vec<Filter>,
    json: bool,
) -> anyhow::Result<()> {
    let tags = client.tags(&filters).await?;

    if json {
        return utils::print_json(&tags);
    }

    println!();
    if tags.is_empty() {
        println!("{}", "タグはありません".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!("{:<24} {:<16} {:<28} {:<40}", "RESOURCE", "TYPE", "KEY", "VALUE").bold()
    );
    println!("{}", "─".repeat(108).dimmed());
    for tag in &tags {
        println!(
            "{:<24} {:<16} {:<28} {:<40}",
            tag.resource_id.cyan(),
            utils::or_dash(tag.resource_type.as_deref()),
            tag.key,
            tag.value
        );
    }
    Ok(())
}

pub async fn handle_create(
    client: &dyn ComputeClient,
    resource: String,
    tags: Vec<Tag>,
) -> anyhow::Result<()> {
    if tags.is_empty() {
        anyhow::bail!("タグを1つ以上指定してください (KEY=VALUE)");
    }
    client.create_tags(&[resource.clone()], &tags).await?;
    println!(
        "{}",
        format!("✓ {} に {} 個のタグを設定しました", resource, tags.len())
            .green()
            .bold()
    );
    Ok(())
}

pub async fn handle_delete(
    client: &dyn ComputeClient,
    resource: String,
    tags: Vec<Tag>,
) -> anyhow::Result<()> {
    if tags.is_empty() {
        anyhow::bail!("削除するタグを1つ以上指定してください (KEY=VALUE)");
    }
    client.delete_tags(&[resource.clone()], &tags).await?;
    println!(
        "{}",
        format!("✓ {} から {} 個のタグを削除しました", resource, tags.len())
            .green()
            .bold()
    );
    Ok(())
}
