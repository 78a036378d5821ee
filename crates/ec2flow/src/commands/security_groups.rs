use crate::utils;
use colored::Colorize;
use ec2flow_compute::{ComputeClient, IpPermission, SecurityGroup};

pub async fn handle_list(client: &dyn ComputeClient, json: bool) -> anyhow::Result<()> {
    let groups = client.security_groups().await?;

    if json {
        return utils::print_json(&groups);
    }

    println!();
    if groups.is_empty() {
        println!("{}", "セキュリティグループはありません".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<22} {:<26} {:<23} {:<40}",
            "GROUP ID", "NAME", "VPC", "INGRESS"
        )
        .bold()
    );
    println!("{}", "─".repeat(110).dimmed());
    for group in &groups {
        println!(
            "{:<22} {:<26} {:<23} {:<40}",
            group.group_id.cyan(),
            group.group_name,
            utils::or_dash(group.vpc_id.as_deref()),
            ingress_summary(group).dimmed()
        );
    }
    Ok(())
}

/// 例: "tcp/22 0.0.0.0/0, tcp/443 0.0.0.0/0"
fn ingress_summary(group: &SecurityGroup) -> String {
    group
        .ingress
        .iter()
        .map(|p| {
            let proto = if p.protocol == "-1" { "all" } else { &p.protocol };
            format!("{}/{} {}", proto, p.port_range(), p.cidr_ranges.join(" "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub async fn handle_create(
    client: &dyn ComputeClient,
    name: &str,
    description: &str,
    vpc_id: Option<&str>,
) -> anyhow::Result<()> {
    let group_id = client
        .create_security_group(name, description, vpc_id)
        .await?;
    println!(
        "{}",
        format!("✓ セキュリティグループ '{}' を作成しました", name)
            .green()
            .bold()
    );
    println!("  group id: {}", group_id.cyan());
    Ok(())
}

/// 名前で削除。by_id の場合はグループIDとして扱う
pub async fn handle_delete(
    client: &dyn ComputeClient,
    target: &str,
    by_id: bool,
) -> anyhow::Result<()> {
    if by_id {
        client.delete_security_group(target).await?;
    } else {
        client.delete_security_group_by_name(target).await?;
    }
    println!(
        "{}",
        format!("✓ セキュリティグループ '{}' を削除しました", target)
            .green()
            .bold()
    );
    Ok(())
}

pub fn permission(protocol: &str, from_port: i32, to_port: Option<i32>, cidr: &str) -> IpPermission {
    IpPermission {
        protocol: protocol.to_string(),
        from_port: Some(from_port),
        to_port: Some(to_port.unwrap_or(from_port)),
        cidr_ranges: vec![cidr.to_string()],
    }
}

pub async fn handle_authorize(
    client: &dyn ComputeClient,
    group_id: &str,
    permission: IpPermission,
) -> anyhow::Result<()> {
    client.authorize_ingress(group_id, &permission).await?;
    println!(
        "{}",
        format!(
            "✓ {} に {}/{} を許可しました",
            group_id,
            permission.protocol,
            permission.port_range()
        )
        .green()
        .bold()
    );
    Ok(())
}

pub async fn handle_revoke(
    client: &dyn ComputeClient,
    group_id: &str,
    permission: IpPermission,
) -> anyhow::Result<()> {
    client.revoke_ingress(group_id, &permission).await?;
    println!(
        "{}",
        format!(
            "✓ {} から {}/{} を取り消しました",
            group_id,
            permission.protocol,
            permission.port_range()
        )
        .green()
        .bold()
    );
    Ok(())
}
