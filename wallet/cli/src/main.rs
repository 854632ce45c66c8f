use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::time::{sleep, Duration};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wallet_core::{
    builtin_campaigns, format_ether, parse_address, short_address, Address, Campaign,
    CampaignClient, Network, RpcClient, Wallet, U256,
};

const BALANCE_ATTEMPTS: u32 = 3;

#[derive(Parser, Debug)]
#[command(name = "wallet-cli")]
#[command(about = "Create or import an Ethereum wallet and browse campaigns", long_about = None)]
struct Cli {
    /// Network used for balance and account queries (mainnet, goerli, hardhat or a chain id)
    #[arg(long, env = "ETH_NETWORK", default_value = "mainnet")]
    network: String,

    /// Explicit JSON-RPC URL, overrides the network's default endpoint
    #[arg(long, env = "ETH_RPC_URL")]
    rpc: Option<String>,

    /// Alchemy API key, needed for goerli
    #[arg(long, env = "ALCHEMY_KEY", hide_env_values = true)]
    alchemy_key: Option<String>,

    /// Campaign backend base URL
    #[arg(long, env = "CAMPAIGN_BACKEND", default_value = "http://localhost:3000")]
    backend: String,

    /// Print addresses as 0x1234…abcd
    #[arg(long)]
    short: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a wallet from a fresh random mnemonic
    New {
        /// Also query the new wallet's balance
        #[arg(long)]
        balance: bool,
    },
    /// Import a wallet from a BIP-39 mnemonic
    ImportMnemonic {
        #[arg(long, env = "WALLET_MNEMONIC", hide_env_values = true)]
        phrase: String,
        #[arg(long)]
        balance: bool,
    },
    /// Import a wallet from a hex private key
    ImportKey {
        #[arg(long, env = "WALLET_PRIVATE_KEY", hide_env_values = true)]
        key: String,
        #[arg(long)]
        balance: bool,
    },
    /// Show the balance of any address
    Balance {
        #[arg(long)]
        address: String,
    },
    /// List the accounts managed by the node (e.g. hardhat dev accounts)
    Accounts,
    /// Browse campaigns
    Campaigns {
        #[command(subcommand)]
        command: CampaignCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CampaignCommand {
    /// List all campaigns
    List {
        /// Show the built-in campaigns instead of asking the backend
        #[arg(long)]
        builtin: bool,
    },
    /// Show one campaign by id
    Show { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::New { balance } => {
            let wallet = Wallet::create_random().context("creating wallet")?;
            print_wallet(&cli, &wallet);
            if let Some(phrase) = wallet.mnemonic() {
                println!("mnemonic: {phrase}");
            }
            if *balance {
                print_balance(&cli, wallet.address()).await?;
            }
        }
        Commands::ImportMnemonic { phrase, balance } => {
            let wallet = Wallet::from_mnemonic(phrase).context("importing mnemonic")?;
            print_wallet(&cli, &wallet);
            if *balance {
                print_balance(&cli, wallet.address()).await?;
            }
        }
        Commands::ImportKey { key, balance } => {
            let wallet = Wallet::from_private_key(key).context("importing private key")?;
            print_wallet(&cli, &wallet);
            if *balance {
                print_balance(&cli, wallet.address()).await?;
            }
        }
        Commands::Balance { address } => {
            let address = parse_address(address)?;
            print_balance(&cli, address).await?;
        }
        Commands::Accounts => {
            let rpc = rpc_client(&cli)?;
            let chain_id = rpc
                .chain_id()
                .await
                .with_context(|| format!("eth_chainId on {}", rpc.url()))?;
            println!("chain id: {chain_id}");
            let accounts = rpc
                .accounts()
                .await
                .with_context(|| format!("eth_accounts on {}", rpc.url()))?;
            for account in accounts {
                println!("{}", render_address(&cli, &account));
            }
        }
        Commands::Campaigns { command } => match command {
            CampaignCommand::List { builtin } => {
                let campaigns = if *builtin {
                    builtin_campaigns()
                } else {
                    CampaignClient::new(&cli.backend)
                        .list()
                        .await
                        .with_context(|| format!("listing campaigns from {}", cli.backend))?
                };
                for campaign in &campaigns {
                    println!("{}", render_campaign(campaign));
                }
            }
            CampaignCommand::Show { id } => {
                let campaign = CampaignClient::new(&cli.backend)
                    .get(id)
                    .await
                    .with_context(|| format!("fetching campaign {id} from {}", cli.backend))?;
                println!("{}", render_campaign(&campaign));
                if let Some(description) = campaign.description() {
                    println!("      {description}");
                }
            }
        },
    }
    Ok(())
}

fn rpc_client(cli: &Cli) -> anyhow::Result<RpcClient> {
    let url = match &cli.rpc {
        Some(url) => url.clone(),
        None => {
            let network: Network = cli.network.parse()?;
            network.rpc_url(cli.alchemy_key.as_deref())?
        }
    };
    Ok(RpcClient::new(url))
}

fn render_address(cli: &Cli, address: &Address) -> String {
    if cli.short {
        short_address(address)
    } else {
        address.to_string()
    }
}

fn print_wallet(cli: &Cli, wallet: &Wallet) {
    println!("address: {}", render_address(cli, &wallet.address()));
}

async fn print_balance(cli: &Cli, address: Address) -> anyhow::Result<()> {
    let rpc = rpc_client(cli)?;
    let wei = fetch_balance(&rpc, address).await?;
    println!("balance: {} ETH", format_ether(wei));
    Ok(())
}

async fn fetch_balance(rpc: &RpcClient, address: Address) -> anyhow::Result<U256> {
    let mut attempt = 1;
    loop {
        match rpc.get_balance(address).await {
            Ok(wei) => return Ok(wei),
            Err(err) if err.is_retryable() && attempt < BALANCE_ATTEMPTS => {
                warn!("balance query attempt {attempt} failed: {err}");
                sleep(Duration::from_millis(250 * u64::from(attempt))).await;
                attempt += 1;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("eth_getBalance on {}", rpc.url()))
            }
        }
    }
}

fn render_campaign(campaign: &Campaign) -> String {
    let id = campaign
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|_| "-".into());
    let name = campaign.name().unwrap_or("(unnamed)");
    let amounts = match (campaign.raised(), campaign.goal()) {
        (Some(raised), Some(goal)) => format!("{raised}/{goal}"),
        _ => "?/?".into(),
    };
    match campaign.progress() {
        Some(pct) => format!("{id:>4}  {name:<24} {amounts:>12} ({pct:.1}%)"),
        None => format!("{id:>4}  {name:<24} {amounts:>12}"),
    }
}
