use crate::utils;
use colored::Colorize;
use ec2flow_compute::ComputeClient;

pub async fn handle(
    client: &dyn ComputeClient,
    ids: Vec<String>,
    all: bool,
    json: bool,
) -> anyhow::Result<()> {
    let statuses = client.instance_statuses(&ids, all).await?;

    if json {
        return utils::print_json(&statuses);
    }

    println!();
    if statuses.is_empty() {
        println!("{}", "ステータスはありません".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<21} {:<16} {:<14} {:<14} {:<14}",
            "INSTANCE ID", "ZONE", "STATE", "INSTANCE", "SYSTEM"
        )
        .bold()
    );
    println!("{}", "─".repeat(82).dimmed());
    for status in &statuses {
        let check = |s: Option<&str>| match s {
            Some("ok") => "ok".green(),
            Some(other) => other.yellow(),
            None => "-".dimmed(),
        };
        println!(
            "{:<21} {:<16} {:<14} {:<14} {:<14}",
            status.instance_id.cyan(),
            utils::or_dash(status.availability_zone.as_deref()),
            utils::colored_state(&status.state),
            check(status.instance_status.as_deref()),
            check(status.system_status.as_deref())
        );
    }
    Ok(())
}
