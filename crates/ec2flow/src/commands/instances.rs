use crate::utils;
use colored::Colorize;
use ec2flow_compute::{ComputeClient, Filter, Instance, InstanceStateChange, RunRequest, WaitConfig};

pub async fn handle_list(
    client: &dyn ComputeClient,
    ids: Vec<String>,
    filters: Vec<Filter>,
    json: bool,
) -> anyhow::Result<()> {
    let instances = client.instances_matching(&ids, &filters).await?;

    if json {
        return utils::print_json(&instances);
    }

    print_instances(&instances);
    Ok(())
}

pub fn print_instances(instances: &[Instance]) {
    println!();
    if instances.is_empty() {
        println!("{}", "インスタンスはありません".dimmed());
        return;
    }

    println!(
        "{}",
        format!(
            "{:<21} {:<20} {:<14} {:<12} {:<16} {:<16}",
            "INSTANCE ID", "NAME", "STATE", "TYPE", "ZONE", "PUBLIC IP"
        )
        .bold()
    );
    println!("{}", "─".repeat(104).dimmed());

    for i in instances {
        println!(
            "{:<21} {:<20} {:<14} {:<12} {:<16} {:<16}",
            i.instance_id.cyan(),
            utils::or_dash(i.name()),
            utils::colored_state(&i.state),
            utils::or_dash(i.instance_type.as_deref()),
            utils::or_dash(i.availability_zone.as_deref()),
            utils::or_dash(i.public_ip_address.as_deref()).dimmed()
        );
    }
}

pub async fn handle_run(
    client: &dyn ComputeClient,
    request: RunRequest,
    wait: Option<WaitConfig>,
    json: bool,
) -> anyhow::Result<()> {
    utils::progress(
        json,
        format!(
            "インスタンスを起動中... ({} x {}, {})",
            request.max_count, request.instance_type, request.image_id
        )
        .blue(),
    );

    let instances = match wait {
        Some(wait) => {
            utils::progress(
                json,
                format!("  {} 起動完了まで {:?} 間隔で確認します", "ℹ".cyan(), wait.interval),
            );
            client.run_and_wait(&request, &wait).await?
        }
        None => {
            request.validate()?;
            client.run_instances(&request).await?
        }
    };

    if json {
        return utils::print_json(&instances);
    }

    print_instances(&instances);
    println!();
    println!(
        "{}",
        format!("✓ {} 台のインスタンスを起動しました", instances.len())
            .green()
            .bold()
    );
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    Stop { force: bool },
    Terminate,
    Reboot,
}

impl Transition {
    fn verb(&self) -> &'static str {
        match self {
            Transition::Start => "起動",
            Transition::Stop { .. } => "停止",
            Transition::Terminate => "削除",
            Transition::Reboot => "再起動",
        }
    }
}

pub async fn handle_transition(
    client: &dyn ComputeClient,
    transition: Transition,
    ids: Vec<String>,
    json: bool,
) -> anyhow::Result<()> {
    if ids.is_empty() {
        anyhow::bail!("インスタンスIDを1つ以上指定してください");
    }

    utils::progress(
        json,
        format!("{} 台のインスタンスを{}中...", ids.len(), transition.verb()).yellow(),
    );

    let changes = match transition {
        Transition::Start => client.start_instances(&ids).await?,
        Transition::Stop { force } => client.stop_instances(&ids, force).await?,
        Transition::Terminate => client.terminate_instances(&ids).await?,
        Transition::Reboot => {
            client.reboot_instances(&ids).await?;
            Vec::new()
        }
    };

    if json {
        return utils::print_json(&changes);
    }

    println!();
    for change in &changes {
        print_change(change);
    }
    println!(
        "{}",
        format!("✓ {}しました", transition.verb()).green().bold()
    );
    Ok(())
}

fn print_change(change: &InstanceStateChange) {
    let state = |s: &Option<ec2flow_compute::InstanceState>| {
        s.as_ref()
            .map(|s| utils::colored_state(s).to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    println!(
        "  {} {} → {}",
        change.instance_id.cyan(),
        state(&change.previous_state),
        state(&change.current_state)
    );
}
