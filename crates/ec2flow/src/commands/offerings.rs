use crate::utils;
use colored::Colorize;
use ec2flow_compute::{ComputeClient, OfferingQuery};

pub async fn handle(
    client: &dyn ComputeClient,
    query: OfferingQuery,
    json: bool,
) -> anyhow::Result<()> {
    utils::progress(json, "リザーブドインスタンスのオファリングを取得中...".blue());
    let offerings = client.reserved_instances_offerings(&query).await?;

    if json {
        return utils::print_json(&offerings);
    }

    println!();
    if offerings.is_empty() {
        println!("{}", "該当するオファリングはありません".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<38} {:<12} {:<8} {:<16} {:>10} {:>10} {:<20}",
            "OFFERING ID", "TYPE", "DAYS", "OFFERING", "FIXED", "USAGE", "PRODUCT"
        )
        .bold()
    );
    println!("{}", "─".repeat(120).dimmed());
    for o in &offerings {
        println!(
            "{:<38} {:<12} {:<8} {:<16} {:>10} {:>10} {:<20}",
            o.offering_id.cyan(),
            utils::or_dash(o.instance_type.as_deref()),
            o.duration_days()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            utils::or_dash(o.offering_type.as_deref()),
            price(o.fixed_price),
            price(o.usage_price),
            utils::or_dash(o.product_description.as_deref())
        );
    }
    println!();
    println!("{} 件", offerings.len());
    Ok(())
}

fn price(value: Option<f32>) -> String {
    value
        .map(|v| format!("{:.3}", v))
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price() {
        assert_eq!(price(Some(1.5)), "1.500");
        assert_eq!(price(None), "-");
    }
}
