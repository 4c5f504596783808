//! Entry point for the Neo N3 full node binary.
//!
//! Wires together the ledger, P2P network, and (when enabled) the dBFT
//! consensus service, then runs until a shutdown signal arrives.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use neo_config::NetworkType;
use neo_core::shutdown::{ShutdownCoordinator, SignalHandler};
use neo_ledger::{Blockchain, LedgerConfig, MempoolConfig, MemoryPool};
use neo_network::{NetworkCommand, NetworkConfig, P2pNode};
use tokio::sync::mpsc;
use tracing::{info, warn};

mod config;
#[cfg(feature = "consensus")]
mod consensus_adapter;

use config::RuntimeConfig;

#[derive(Parser, Debug)]
#[command(name = "corona-node", version, about = "Neo N3 full node")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network to join: mainnet, testnet, or private.
    #[arg(short, long, default_value = "testnet")]
    network: String,

    /// Disable consensus participation even if the config enables it.
    #[arg(long)]
    no_consensus: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut runtime_config = match &cli.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    if let Ok(network) = cli.network.parse::<NetworkType>() {
        runtime_config.node.network_type = network;
    }
    if cli.no_consensus {
        runtime_config.node.consensus_enabled = false;
    }

    info!(network = %runtime_config.node.network_type, "starting corona-node");

    let shutdown = Arc::new(ShutdownCoordinator::new());
    SignalHandler::new(shutdown.clone()).start().await;

    let blockchain = Arc::new(Blockchain::new(runtime_config.node.network_type).await?);
    info!(height = blockchain.get_height().await, "ledger ready");

    let network_config = network_config_for(runtime_config.node.network_type);
    let (_command_tx, command_rx) = mpsc::channel::<NetworkCommand>(256);
    let p2p_node = Arc::new(P2pNode::new(network_config, command_rx)?);
    p2p_node.start().await?;
    info!(magic = p2p_node.magic(), "p2p node started");

    let mempool = Arc::new(MemoryPool::new(MempoolConfig::default()));

    #[cfg(feature = "consensus")]
    let mut consensus_service = if runtime_config.node.consensus_enabled {
        Some(
            start_consensus_service(
                &runtime_config,
                blockchain.clone(),
                p2p_node.clone(),
                mempool.clone(),
            )
            .await?,
        )
    } else {
        None
    };
    #[cfg(not(feature = "consensus"))]
    if runtime_config.node.consensus_enabled {
        warn!("consensus requested but this build was compiled without the consensus feature");
    }

    let _ = LedgerConfig::default();

    wait_for_shutdown(&shutdown).await;

    #[cfg(feature = "consensus")]
    if let Some(service) = consensus_service.as_mut() {
        service.stop().await;
    }

    p2p_node.stop().await?;
    info!("corona-node stopped");
    Ok(())
}

/// Builds the ledger/network/mempool adapters and starts the dBFT consensus
/// service. The validator committee and this node's own signing key come
/// from operator configuration rather than protocol constants: the chain's
/// standby committee isn't tracked anywhere in this build, so a node that
/// wants to propose or vote on blocks has to be told who the validators are
/// and which one it is, the same way a real node needs a wallet unlocked
/// before it can participate.
#[cfg(feature = "consensus")]
async fn start_consensus_service(
    runtime_config: &RuntimeConfig,
    blockchain: Arc<Blockchain>,
    p2p_node: Arc<P2pNode>,
    mempool: Arc<MemoryPool>,
) -> anyhow::Result<neo_consensus::ConsensusService> {
    use neo_consensus::mempool_adapter::MempoolAdapter;
    use neo_consensus::signature::ValidatorKey;
    use neo_consensus::{ConsensusConfig, ConsensusService, ConsensusServiceConfig};
    use neo_core::UInt160;
    use neo_cryptography::ECPoint;

    let cfg = &runtime_config.node.consensus_config;

    let mut validators = Vec::with_capacity(cfg.validator_public_keys.len());
    for key in &cfg.validator_public_keys {
        let bytes = hex::decode(key)
            .map_err(|e| anyhow::anyhow!("invalid validator public key '{key}': {e}"))?;
        let point = ECPoint::from_bytes(&bytes)
            .map_err(|e| anyhow::anyhow!("invalid validator public key '{key}': {e}"))?;
        validators.push(point);
    }

    let validator_key = match &cfg.validator_private_key {
        Some(hex_key) => {
            let bytes = hex::decode(hex_key)
                .map_err(|e| anyhow::anyhow!("invalid validator private key: {e}"))?;
            let scalar: [u8; 32] = bytes
                .try_into()
                .map_err(|_| anyhow::anyhow!("validator private key must be 32 bytes"))?;
            Some(
                ValidatorKey::from_private_key(scalar)
                    .map_err(|e| anyhow::anyhow!(e.to_string()))?,
            )
        }
        None => None,
    };

    let my_validator_hash = match &validator_key {
        Some(key) => consensus_adapter::validator_script_hash(key.public_key())
            .map_err(|e| anyhow::anyhow!(e.to_string()))?,
        None => UInt160::zero(),
    };

    let validator_count = if validators.is_empty() { 7 } else { validators.len() };
    let consensus_config = ConsensusConfig {
        validator_count,
        block_time_ms: cfg.block_time_ms,
        view_timeout_ms: cfg.view_timeout_ms,
        ..Default::default()
    };

    let ledger_adapter = Arc::new(consensus_adapter::LedgerAdapter::new(
        blockchain.clone(),
        validators,
    ));
    let network_adapter = Arc::new(consensus_adapter::NetworkAdapter::new(
        p2p_node,
        blockchain,
        my_validator_hash,
        validator_key.clone(),
    ));
    let mempool_adapter = Arc::new(MempoolAdapter::new(mempool));

    let service_config = ConsensusServiceConfig {
        consensus_config,
        ..Default::default()
    };

    let mut service = ConsensusService::new(
        service_config,
        my_validator_hash,
        ledger_adapter,
        network_adapter,
        mempool_adapter,
        validator_key,
    );
    service
        .start()
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    info!(validator_count, %my_validator_hash, "consensus service started");
    Ok(service)
}

fn network_config_for(network: NetworkType) -> NetworkConfig {
    match network {
        NetworkType::MainNet => NetworkConfig::default(),
        NetworkType::TestNet => NetworkConfig::testnet(),
        NetworkType::Private => NetworkConfig::private(),
    }
}

async fn wait_for_shutdown(shutdown: &ShutdownCoordinator) {
    loop {
        if shutdown.is_shutting_down().await {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(250)).await;
    }
}
