//! Human readable instruction output

use colored::Colorize;
use solana_sdk::instruction::{AccountMeta, Instruction};

fn account_flags(meta: &AccountMeta) -> &'static str {
    match (meta.is_signer, meta.is_writable) {
        (true, true) => "signer, writable",
        (true, false) => "signer",
        (false, true) => "writable",
        (false, false) => "readonly",
    }
}

pub fn print_instruction(title: &str, instruction: &Instruction) {
    println!("{}", format!("=== {} ===", title).bright_green().bold());
    println!("{} {}", "Program:".bright_cyan(), instruction.program_id);

    println!("{}", "Accounts:".bright_cyan());
    for (i, meta) in instruction.accounts.iter().enumerate() {
        println!(
            "  {:>2}. {} {}",
            i,
            meta.pubkey,
            format!("[{}]", account_flags(meta)).dimmed()
        );
    }

    println!(
        "{} {} bytes",
        "Data length:".bright_cyan(),
        instruction.data.len()
    );
    println!("{} {}", "Data (hex):".bright_cyan(), hex::encode(&instruction.data));
    println!(
        "{} {}",
        "Data (base58):".bright_cyan(),
        bs58::encode(&instruction.data).into_string()
    );
}
