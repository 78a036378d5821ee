mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::instances::Transition;
use ec2flow_aws::{ConnectOptions, Ec2};
use ec2flow_compute::{Filter, OfferingQuery, RunRequest, Tag, WaitConfig};
use ec2flow_config::Settings;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ec2flow")]
#[command(about = "EC2をもっと手軽に。インスタンス・キーペア・セキュリティグループの操作ツール。", long_about = None)]
struct Cli {
    /// リージョン (例: ap-northeast-1)
    #[arg(short, long, global = true, env = "EC2FLOW_REGION")]
    region: Option<String>,
    /// AWSプロファイル名
    #[arg(short, long, global = true, env = "EC2FLOW_PROFILE")]
    profile: Option<String>,
    /// エンドポイントURLの上書き
    #[arg(long, global = true, env = "EC2FLOW_ENDPOINT_URL")]
    endpoint_url: Option<String>,
    /// 設定ファイルのパス
    #[arg(short, long, global = true, env = "EC2FLOW_CONFIG")]
    config: Option<PathBuf>,
    /// JSONで出力
    #[arg(long, global = true)]
    json: bool,
    /// デバッグログを表示
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// インスタンスを管理
    #[command(subcommand)]
    Instances(InstanceCommands),
    /// キーペアを管理
    #[command(subcommand)]
    KeyPairs(KeyPairCommands),
    /// セキュリティグループを管理
    #[command(subcommand)]
    SecurityGroups(SecurityGroupCommands),
    /// タグを管理
    #[command(subcommand)]
    Tags(TagCommands),
    /// インスタンスのステータスチェックを表示
    Statuses {
        /// インスタンスID（省略時は全て）
        #[arg(long = "id")]
        ids: Vec<String>,
        /// 停止中のインスタンスも含める
        #[arg(short, long)]
        all: bool,
    },
    /// リザーブドインスタンスのオファリングを表示
    Offerings {
        /// インスタンスタイプ (例: m5.large)
        #[arg(short = 't', long = "type")]
        instance_type: Option<String>,
        /// アベイラビリティゾーン
        #[arg(short, long)]
        zone: Option<String>,
        /// 製品 (例: Linux/UNIX)
        #[arg(long)]
        product: Option<String>,
        /// 支払いオプション (例: "No Upfront")
        #[arg(long)]
        offering_type: Option<String>,
    },
    /// リージョン一覧を表示
    Regions,
    /// アベイラビリティゾーン一覧を表示
    Zones,
    /// バージョン情報を表示
    Version,
}

#[derive(Subcommand)]
enum InstanceCommands {
    /// インスタンス一覧を表示
    List {
        /// インスタンスID
        #[arg(long = "id")]
        ids: Vec<String>,
        /// フィルタ (NAME=V1,V2 例: instance-state-name=running)
        #[arg(short, long = "filter", value_parser = utils::parse_filter)]
        filters: Vec<Filter>,
    },
    /// インスタンスを起動し、pendingを抜けるまで待つ
    Run {
        /// AMI ID
        #[arg(long)]
        image: String,
        /// インスタンスタイプ
        #[arg(short = 't', long = "type", default_value = ec2flow_compute::DEFAULT_INSTANCE_TYPE)]
        instance_type: String,
        /// キーペア名
        #[arg(short, long)]
        key: Option<String>,
        /// セキュリティグループID
        #[arg(long = "security-group")]
        security_groups: Vec<String>,
        /// サブネットID
        #[arg(long)]
        subnet: Option<String>,
        /// ユーザーデータのファイル
        #[arg(long)]
        user_data_file: Option<PathBuf>,
        /// 起動する台数
        #[arg(short = 'n', long, default_value = "1")]
        count: i32,
        /// タグ (KEY=VALUE)
        #[arg(long = "tag", value_parser = utils::parse_tag)]
        tags: Vec<Tag>,
        /// 起動完了を待たない
        #[arg(long)]
        no_wait: bool,
        /// 待機のタイムアウト（秒）
        #[arg(long)]
        wait_timeout: Option<u64>,
    },
    /// インスタンスを起動（停止中のもの）
    Start {
        /// インスタンスID
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// インスタンスを停止
    Stop {
        /// インスタンスID
        #[arg(required = true)]
        ids: Vec<String>,
        /// 強制停止
        #[arg(short, long)]
        force: bool,
    },
    /// インスタンスを削除（terminate）
    Terminate {
        /// インスタンスID
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// インスタンスを再起動
    Reboot {
        /// インスタンスID
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
enum KeyPairCommands {
    /// キーペア一覧を表示
    List,
    /// キーペアを作成
    Create {
        /// キーペア名
        name: String,
        /// 秘密鍵の保存先
        #[arg(short, long)]
        save: Option<PathBuf>,
    },
    /// 公開鍵をインポート
    Import {
        /// キーペア名
        name: String,
        /// 公開鍵ファイル (例: ~/.ssh/id_ed25519.pub)
        public_key_file: PathBuf,
    },
    /// キーペアを削除
    Delete {
        /// キーペア名
        name: String,
    },
}

#[derive(Subcommand)]
enum SecurityGroupCommands {
    /// セキュリティグループ一覧を表示
    List,
    /// セキュリティグループを作成
    Create {
        /// グループ名
        name: String,
        /// 説明
        #[arg(short, long)]
        description: String,
        /// VPC ID
        #[arg(long)]
        vpc: Option<String>,
    },
    /// セキュリティグループを削除
    Delete {
        /// グループ名（--id 指定時はグループID）
        target: String,
        /// TARGET をグループID (sg-...) として扱う
        #[arg(long)]
        id: bool,
    },
    /// インバウンドルールを追加
    Authorize {
        #[command(flatten)]
        rule: RuleArgs,
    },
    /// インバウンドルールを削除
    Revoke {
        #[command(flatten)]
        rule: RuleArgs,
    },
}

#[derive(clap::Args)]
struct RuleArgs {
    /// グループID (sg-...)
    group_id: String,
    /// ポート（範囲の開始）
    #[arg(long)]
    port: i32,
    /// 範囲の終了ポート
    #[arg(long)]
    to_port: Option<i32>,
    /// プロトコル
    #[arg(long, default_value = "tcp")]
    protocol: String,
    /// 許可するCIDR
    #[arg(long, default_value = "0.0.0.0/0")]
    cidr: String,
}

#[derive(Subcommand)]
enum TagCommands {
    /// タグ一覧を表示
    List {
        /// フィルタ (NAME=V1,V2 例: resource-id=i-0123)
        #[arg(short, long = "filter", value_parser = utils::parse_filter)]
        filters: Vec<Filter>,
    },
    /// タグを付与
    Create {
        /// リソースID
        resource: String,
        /// タグ (KEY=VALUE)
        #[arg(required = true, value_parser = utils::parse_tag)]
        tags: Vec<Tag>,
    },
    /// タグを削除
    Delete {
        /// リソースID
        resource: String,
        /// タグ (KEY=VALUE)
        #[arg(required = true, value_parser = utils::parse_tag)]
        tags: Vec<Tag>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

/// 設定ファイル → 環境変数 → コマンドライン引数 の順で上書き
fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::from_path(path)?,
        None => Settings::load()?,
    };
    let mut settings = settings.apply_env();

    if let Some(region) = &cli.region {
        settings.region = Some(region.clone());
    }
    if let Some(profile) = &cli.profile {
        settings.profile = Some(profile.clone());
    }
    if let Some(url) = &cli.endpoint_url {
        settings.endpoint_url = Some(url.clone());
    }
    Ok(settings)
}

fn wait_config(settings: &Settings, timeout_override: Option<u64>) -> WaitConfig {
    let mut wait = WaitConfig::new(settings.wait.interval());
    if let Some(timeout) = timeout_override
        .map(Duration::from_secs)
        .or(settings.wait.timeout())
    {
        wait = wait.with_timeout(timeout);
    }
    wait
}

fn print_version() {
    println!("ec2flow {}", env!("CARGO_PKG_VERSION"));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Versionコマンドは接続不要
    if matches!(cli.command, Commands::Version) {
        print_version();
        return Ok(());
    }

    let settings = resolve_settings(&cli)?;
    let options = ConnectOptions {
        region: settings.region.clone(),
        profile: settings.profile.clone(),
        endpoint_url: settings.endpoint_url.clone(),
        max_pages: settings.max_pages,
    };
    let ec2 = Ec2::connect(&options).await;
    tracing::debug!("region: {:?}", ec2.region());

    let json = cli.json;

    // コマンドディスパッチ
    match cli.command {
        Commands::Instances(cmd) => match cmd {
            InstanceCommands::List { ids, filters } => {
                commands::instances::handle_list(&ec2, ids, filters, json).await?;
            }
            InstanceCommands::Run {
                image,
                instance_type,
                key,
                security_groups,
                subnet,
                user_data_file,
                count,
                tags,
                no_wait,
                wait_timeout,
            } => {
                let mut request = RunRequest::new(image)
                    .instance_type(instance_type)
                    .count(count);
                request.key_name = key;
                request.security_group_ids = security_groups;
                request.subnet_id = subnet;
                request.tags = tags;
                if let Some(path) = user_data_file {
                    request.user_data = Some(std::fs::read_to_string(&path).map_err(|e| {
                        anyhow::anyhow!(
                            "ユーザーデータを読み込めません ({}): {}",
                            path.display(),
                            e
                        )
                    })?);
                }

                let wait = (!no_wait).then(|| wait_config(&settings, wait_timeout));
                commands::instances::handle_run(&ec2, request, wait, json).await?;
            }
            InstanceCommands::Start { ids } => {
                commands::instances::handle_transition(&ec2, Transition::Start, ids, json).await?;
            }
            InstanceCommands::Stop { ids, force } => {
                commands::instances::handle_transition(
                    &ec2,
                    Transition::Stop { force },
                    ids,
                    json,
                )
                .await?;
            }
            InstanceCommands::Terminate { ids } => {
                commands::instances::handle_transition(&ec2, Transition::Terminate, ids, json)
                    .await?;
            }
            InstanceCommands::Reboot { ids } => {
                commands::instances::handle_transition(&ec2, Transition::Reboot, ids, json)
                    .await?;
            }
        },
        Commands::KeyPairs(cmd) => match cmd {
            KeyPairCommands::List => commands::key_pairs::handle_list(&ec2, json).await?,
            KeyPairCommands::Create { name, save } => {
                commands::key_pairs::handle_create(&ec2, &name, save, json).await?;
            }
            KeyPairCommands::Import {
                name,
                public_key_file,
            } => {
                commands::key_pairs::handle_import(&ec2, &name, &public_key_file, json).await?;
            }
            KeyPairCommands::Delete { name } => {
                commands::key_pairs::handle_delete(&ec2, &name).await?;
            }
        },
        Commands::SecurityGroups(cmd) => match cmd {
            SecurityGroupCommands::List => {
                commands::security_groups::handle_list(&ec2, json).await?;
            }
            SecurityGroupCommands::Create {
                name,
                description,
                vpc,
            } => {
                commands::security_groups::handle_create(&ec2, &name, &description, vpc.as_deref())
                    .await?;
            }
            SecurityGroupCommands::Delete { target, id } => {
                commands::security_groups::handle_delete(&ec2, &target, id).await?;
            }
            SecurityGroupCommands::Authorize { rule } => {
                let permission = commands::security_groups::permission(
                    &rule.protocol,
                    rule.port,
                    rule.to_port,
                    &rule.cidr,
                );
                commands::security_groups::handle_authorize(&ec2, &rule.group_id, permission)
                    .await?;
            }
            SecurityGroupCommands::Revoke { rule } => {
                let permission = commands::security_groups::permission(
                    &rule.protocol,
                    rule.port,
                    rule.to_port,
                    &rule.cidr,
                );
                commands::security_groups::handle_revoke(&ec2, &rule.group_id, permission).await?;
            }
        },
        Commands::Tags(cmd) => match cmd {
            TagCommands::List { filters } => {
                commands::tags::handle_list(&ec2, filters, json).await?;
            }
            TagCommands::Create { resource, tags } => {
                commands::tags::handle_create(&ec2, resource, tags).await?;
            }
            TagCommands::Delete { resource, tags } => {
                commands::tags::handle_delete(&ec2, resource, tags).await?;
            }
        },
        Commands::Statuses { ids, all } => {
            commands::statuses::handle(&ec2, ids, all, json).await?;
        }
        Commands::Offerings {
            instance_type,
            zone,
            product,
            offering_type,
        } => {
            let query = OfferingQuery {
                instance_type,
                availability_zone: zone,
                product_description: product,
                offering_type,
                include_marketplace: None,
            };
            commands::offerings::handle(&ec2, query, json).await?;
        }
        Commands::Regions => commands::regions::handle_regions(&ec2, json).await?,
        Commands::Zones => commands::regions::handle_zones(&ec2, json).await?,
        Commands::Version => print_version(),
    }

    Ok(())
}
