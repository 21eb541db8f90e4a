//! Sending the creation transaction and waiting for its receipt

use alloy::{
    network::{Ethereum, ReceiptResponse, TransactionBuilder},
    primitives::Bytes,
    providers::{DynProvider, PendingTransactionBuilder, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use tracing::info;

use crate::{deploy::DeploymentResult, errors::DeployError, tx::client::ConfirmationPolicy};

/// A contract creation transaction accepted by the node
pub type PendingDeployment = PendingTransactionBuilder<Ethereum>;

/// Send a contract creation transaction carrying `code`
pub async fn send_deploy_transaction(
    provider: &DynProvider,
    code: Bytes,
) -> Result<PendingDeployment, DeployError> {
    // Build the tx, the wallet filler takes care of nonce, gas and chain id
    let tx_request = TransactionRequest::default().with_deploy_code(code);

    // Send it
    let pending_tx = provider
        .send_transaction(tx_request)
        .await
        .map_err(|e| DeployError::Submission(e.to_string()))?;
    info!("Pending deployment transaction... {}", pending_tx.tx_hash());

    Ok(pending_tx)
}

/// Wait for the deployment to be included, as deep as `policy` asks
pub async fn wait_for_deployment(
    pending_tx: PendingDeployment,
    policy: &ConfirmationPolicy,
) -> Result<DeploymentResult, DeployError> {
    let tx_hash = *pending_tx.tx_hash();

    // Wait for the transaction to be included.
    let receipt = pending_tx
        .with_required_confirmations(policy.confirmations)
        .with_timeout(policy.timeout)
        .get_receipt()
        .await
        .map_err(|e| DeployError::Confirmation(format!("waiting for {tx_hash}: {e}")))?;

    result_from_receipt(&receipt)
}

/// Outcome of a mined deployment: it must have succeeded and created a contract
pub fn result_from_receipt(receipt: &TransactionReceipt) -> Result<DeploymentResult, DeployError> {
    let tx_hash = receipt.transaction_hash;
    if !receipt.status() {
        return Err(DeployError::Confirmation(format!("transaction {tx_hash} reverted")));
    }
    let contract_address = receipt.contract_address.ok_or_else(|| {
        DeployError::Confirmation(format!("receipt of {tx_hash} has no contract address"))
    })?;
    info!(
        "Deployment tx done on block: {}",
        receipt.block_number.unwrap_or_default()
    );

    Ok(DeploymentResult {
        contract_address: contract_address.to_string(),
        transaction_hash: tx_hash.to_string(),
        confirmed: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TX_HASH: &str = "0x8f3d1c9e0a7b6c5d4e3f2a1b0c9d8e7f6a5b4c3d2e1f0a9b8c7d6e5f4a3b2c1d";
    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    /// A contract creation receipt as a node returns it over JSON-RPC
    fn receipt(status: &str, contract_address: Option<&str>) -> TransactionReceipt {
        serde_json::from_value(serde_json::json!({
            "type": "0x2",
            "status": status,
            "cumulativeGasUsed": "0x1e8480",
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "transactionHash": TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": "0x1111111111111111111111111111111111111111111111111111111111111111",
            "blockNumber": "0x2a",
            "gasUsed": "0x1e8480",
            "effectiveGasPrice": "0x5d21dba00",
            "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "to": null,
            "contractAddress": contract_address,
        }))
        .unwrap()
    }

    #[test]
    fn successful_creation_is_confirmed() {
        let result = result_from_receipt(&receipt("0x1", Some(CONTRACT))).unwrap();

        assert!(result.confirmed);
        assert_eq!(result.contract_address, CONTRACT);
        assert_eq!(result.transaction_hash, TX_HASH);
    }

    #[test]
    fn reverted_creation_is_a_confirmation_error() {
        let err = result_from_receipt(&receipt("0x0", Some(CONTRACT))).unwrap_err();

        assert!(matches!(err, DeployError::Confirmation(ref msg) if msg.contains("reverted")));
    }

    #[test]
    fn receipt_without_contract_is_a_confirmation_error() {
        let err = result_from_receipt(&receipt("0x1", None)).unwrap_err();

        assert!(
            matches!(err, DeployError::Confirmation(ref msg) if msg.contains("no contract address"))
        );
    }
}
