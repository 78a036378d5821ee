use crate::utils;
use colored::Colorize;
use ec2flow_compute::ComputeClient;

pub async fn handle_regions(client: &dyn ComputeClient, json: bool) -> anyhow::Result<()> {
    let regions = client.describe_regions().await?;
    if json {
        return utils::print_json(&regions);
    }

    println!();
    println!("{}", format!("{:<20} {:<40}", "REGION", "ENDPOINT").bold());
    println!("{}", "─".repeat(60).dimmed());
    for region in &regions {
        println!(
            "{:<20} {:<40}",
            region.name.cyan(),
            utils::or_dash(region.endpoint.as_deref()).dimmed()
        );
    }
    Ok(())
}

pub async fn handle_zones(client: &dyn ComputeClient, json: bool) -> anyhow::Result<()> {
    let zones = client.describe_availability_zones().await?;
    if json {
        return utils::print_json(&zones);
    }

    println!();
    println!(
        "{}",
        format!("{:<20} {:<20} {:<12}", "ZONE", "REGION", "STATE").bold()
    );
    println!("{}", "─".repeat(52).dimmed());
    for zone in &zones {
        let state = utils::or_dash(zone.state.as_deref());
        let state = if zone.is_available() {
            state.green()
        } else {
            state.yellow()
        };
        println!(
            "{:<20} {:<20} {:<12}",
            zone.name.cyan(),
            utils::or_dash(zone.region.as_deref()),
            state
        );
    }
    Ok(())
}
