//! Signing commands.

use alloy_primitives::U256;
use clap::Args;
use colored::Colorize;
use quill_eth::{RawTransaction, Wallet};

/// Fields of a legacy transaction to sign.
#[derive(Args, Debug)]
pub struct SignTxArgs {
    /// Recipient address; pass an empty string to create a contract.
    #[arg(long)]
    pub to: String,

    /// Value in wei (decimal or 0x hex).
    #[arg(long, value_parser = parse_u256)]
    pub value: U256,

    /// Sender account nonce.
    #[arg(long)]
    pub nonce: u64,

    /// Gas price in wei (decimal or 0x hex).
    #[arg(long, value_parser = parse_u256)]
    pub gas_price: U256,

    /// Gas limit.
    #[arg(long, default_value_t = RawTransaction::TRANSFER_GAS_LIMIT)]
    pub gas_limit: u64,

    /// Call data in hex.
    #[arg(long)]
    pub data: Option<String>,
}

impl SignTxArgs {
    /// Assemble the unsigned transaction.
    pub fn to_transaction(&self) -> quill::Result<RawTransaction> {
        let data = match &self.data {
            Some(data) => quill::decode_hex(data)?,
            None => Vec::new(),
        };
        Ok(RawTransaction {
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: self.to.clone(),
            value: self.value,
            data,
        })
    }

    /// Sign with `wallet` and print the raw transaction.
    pub fn execute(self, wallet: &Wallet) -> Result<(), Box<dyn std::error::Error>> {
        let transaction = self.to_transaction()?;
        let signed = wallet.sign_transaction_raw(&transaction)?;
        print_transaction(wallet, &signed);
        Ok(())
    }
}

fn parse_u256(s: &str) -> Result<U256, String> {
    s.parse::<U256>().map_err(|e| format!("invalid amount {s:?}: {e}"))
}

#[rustfmt::skip]
pub fn print_signature(wallet: &Wallet, signature: &str) {
    println!();
    println!("      {}      {}", "Address".cyan().bold(), wallet.address().green());
    println!("      {}    {}", "Signature".cyan().bold(), signature);
    println!();
}

#[rustfmt::skip]
fn print_transaction(wallet: &Wallet, signed: &quill_eth::SignedTransaction) {
    println!();
    println!("      {}         {}", "From".cyan().bold(), wallet.address().green());
    println!("      {}     {}", "Chain ID".cyan().bold(), signed.chain_id());
    println!("      {}      0x{}", "Tx Hash".cyan().bold(), hex::encode(signed.tx_hash()).dimmed());
    println!("      {}          {}", "Raw".cyan().bold(), signed.to_hex());
    println!();
}
