//! CLI command definitions and handlers.

mod key;
mod sign;

use clap::{ArgGroup, Parser, Subcommand};
use colored::Colorize;

pub use key::{KeySource, NetworkArgs};
pub use sign::SignTxArgs;

/// Quill - a single-key Ethereum signing wallet.
#[derive(Parser)]
#[command(name = "quill")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["seed", "mnemonic", "key"])
))]
pub struct Cli {
    #[command(flatten)]
    pub network: NetworkArgs,

    #[command(flatten)]
    pub source: KeySource,

    /// Report wallet events on stderr (includes the private key).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available wallet commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the address and public key.
    Address,

    /// Print the private key.
    DumpKey,

    /// Sign a plain text message (EIP-191).
    SignMessage {
        /// Message text, signed as its UTF-8 bytes.
        message: String,
    },

    /// Sign hex-encoded bytes as a message (EIP-191).
    SignHex {
        /// Message bytes in hex (with or without 0x prefix).
        hex: String,
    },

    /// Sign a legacy transaction (EIP-155).
    SignTx(SignTxArgs),
}

impl Cli {
    /// Execute the selected command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let network = self.network.resolve();
        let wallet = self.source.load(network, self.debug)?;

        match self.command {
            Commands::Address => print_address(&wallet),
            Commands::DumpKey => print_private_key(&wallet),
            Commands::SignMessage { message } => {
                let signature = wallet.sign_message(&message)?;
                sign::print_signature(&wallet, &signature);
            }
            Commands::SignHex { hex } => {
                let signature = wallet.sign_hex(&hex)?;
                sign::print_signature(&wallet, &signature);
            }
            Commands::SignTx(args) => args.execute(&wallet)?,
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn print_address(wallet: &quill_eth::Wallet) {
    println!();
    println!("      {}      {}", "Network".cyan().bold(), key::describe(wallet.network()).dimmed());
    println!("      {}      {}", "Address".cyan().bold(), wallet.address().green());
    println!("      {}   0x{}", "Public Key".cyan().bold(), wallet.public_key_hex().dimmed());
    println!();
}

#[rustfmt::skip]
fn print_private_key(wallet: &quill_eth::Wallet) {
    println!();
    println!("      {}      {}", "Address".cyan().bold(), wallet.address().green());
    println!("      {}  0x{}", "Private Key".cyan().bold(), wallet.dump_private_key().as_str());
    println!();
}
