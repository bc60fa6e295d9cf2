use tracing::{error, info, instrument};

use crate::actors::LedgerService;
use crate::app_system::MarketplaceConfig;
use crate::clients::LedgerClient;
use crate::error::LedgerError;
use crate::ledger::{ProductLedger, Settlement};

/// Owns the running marketplace: the ledger service task and the client
/// handed out to callers.
pub struct MarketplaceSystem {
    pub ledger_client: LedgerClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketplaceSystem {
    /// Starts a marketplace settling purchases through `settlement`.
    #[instrument(name = "marketplace_system", skip(config, settlement), fields(marketplace = %config.name))]
    pub fn with_settlement<S: Settlement>(config: MarketplaceConfig, settlement: S) -> Self {
        info!("Starting marketplace system");

        let ledger = ProductLedger::new(config.name, settlement).with_policy(config.overpayment_policy);
        let (service, ledger_client) = LedgerService::new(config.mailbox_capacity, ledger);
        let handles = vec![tokio::spawn(service.run())];

        info!("Marketplace system started");

        Self { ledger_client, handles }
    }

    /// Stops the ledger service and waits for it to finish.
    ///
    /// Requests already queued behind the shutdown are dropped and their
    /// callers receive [`LedgerError::ActorCommunicationError`].
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), LedgerError> {
        info!("Shutting down marketplace system");

        let _ = self.ledger_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(LedgerError::ActorCommunicationError(format!("Service task failed: {e}")));
            }
        }

        info!("Marketplace system shutdown complete");
        Ok(())
    }
}
