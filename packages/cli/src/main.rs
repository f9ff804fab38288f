use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{CommandFactory, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use fully_backed_amm_sdk::{
    derive_pool_addresses, derive_pool_config, derive_share_mint, parse_pool_config,
    quote_deposit, quote_swap, quote_withdraw, DEFAULT_PROGRAM_ID,
};

/// Print the banner to stdout.
fn print_banner() {
    let ver = env!("CARGO_PKG_VERSION");
    println!();
    println!("  fba  v{ver}  ·  fully-backed constant-product AMM");
    println!("  {}", "─".repeat(62));
    println!("  Program   {DEFAULT_PROGRAM_ID}");
    println!("  Fees      none  (x·y=k, output truncated in the pool's favour)");
    println!("  Mode      offline: no RPC, nothing is signed or sent");
    println!();
}

fn parse_pubkey(s: &str, flag: &str) -> Result<Pubkey> {
    Pubkey::from_str(s).map_err(|_| anyhow!("{flag}: '{s}' is not a base-58 public key"))
}

// ─── CLI definition ───────────────────────────────────────────────────────────

/// fba: offline toolkit for the fully-backed AMM.
///
/// Every command supports --json for machine-readable output.
#[derive(Parser)]
#[command(
    name    = "fba",
    version = env!("CARGO_PKG_VERSION"),
    about   = "Derive pool addresses, quote deposits/swaps/withdrawals and decode pool accounts.",
    after_help = "\
ENVIRONMENT:
  FBA_PROGRAM_ID   Program id pools are derived under  [default: deployed id]

QUICK START:
  fba derive         --seed 42 --mint-a <MINT> --mint-b <MINT>
  fba quote-deposit  --reserve-a 1000 --reserve-b 1000 --supply 1000 --amount-a 100
  fba quote-swap     --reserve-in 1100 --reserve-out 1100 --amount-in 10
  fba quote-withdraw --reserve-a 1110 --reserve-b 1091 --supply 1100 --shares 110"
)]
struct Cli {
    /// Program id used for PDA derivation
    #[arg(long, global = true, value_name = "PUBKEY", env = "FBA_PROGRAM_ID")]
    program_id: Option<String>,

    /// Output machine-readable JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the PoolConfig, share mint and vault addresses for a seed
    #[command(
        after_help = "\
EXAMPLES:
  fba derive --seed 42
  fba derive --seed 42 --mint-a <MINT_A> --mint-b <MINT_B> --json

NOTES:
  Vaults are only printed when both mints are given."
    )]
    Derive {
        /// Admin-chosen pool seed
        #[arg(long)]
        seed: u64,
        #[arg(long, value_name = "PUBKEY", requires = "mint_b")]
        mint_a: Option<String>,
        #[arg(long, value_name = "PUBKEY", requires = "mint_a")]
        mint_b: Option<String>,
    },

    /// Quote a deposit: shares minted and B required
    #[command(
        name = "quote-deposit",
        after_help = "\
NOTES:
  An empty pool (--supply 0) takes both amounts as given and mints
  --amount-a shares. Otherwise B is matched to the reserve ratio and
  --amount-b is the most you are willing to put in (default: unlimited)."
    )]
    QuoteDeposit {
        #[arg(long)]
        reserve_a: u64,
        #[arg(long)]
        reserve_b: u64,
        /// Current share supply
        #[arg(long)]
        supply: u64,
        #[arg(long)]
        amount_a: u64,
        /// B contribution (bootstrap) or ceiling (proportional)
        #[arg(long)]
        amount_b: Option<u64>,
    },

    /// Quote a swap: output, price impact and the reserve product
    #[command(name = "quote-swap")]
    QuoteSwap {
        #[arg(long)]
        reserve_in: u64,
        #[arg(long)]
        reserve_out: u64,
        #[arg(long)]
        amount_in: u64,
        /// Minimum acceptable output (0 disables the guard)
        #[arg(long, default_value_t = 0)]
        min_out: u64,
    },

    /// Quote a withdrawal: the pro-rata slice of both reserves
    #[command(name = "quote-withdraw")]
    QuoteWithdraw {
        #[arg(long)]
        reserve_a: u64,
        #[arg(long)]
        reserve_b: u64,
        #[arg(long)]
        supply: u64,
        #[arg(long)]
        shares: u64,
    },

    /// Decode a base64 PoolConfig account
    #[command(
        name = "decode-pool",
        after_help = "\
EXAMPLES:
  solana account <POOL> --output json | jq -r '.account.data[0]' | xargs fba decode-pool --data"
    )]
    DecodePool {
        #[arg(long, value_name = "BASE64")]
        data: String,
    },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // When invoked with no arguments, show banner + full help and exit cleanly.
    if std::env::args().len() == 1 {
        print_banner();
        Cli::command().print_long_help().ok();
        println!();
        return Ok(());
    }

    let cli = Cli::parse();
    let program_id = match &cli.program_id {
        Some(s) => parse_pubkey(s, "--program-id")?,
        None => DEFAULT_PROGRAM_ID,
    };

    match &cli.command {
        Commands::Derive { seed, mint_a, mint_b } => {
            cmd_derive(&program_id, *seed, mint_a.as_deref(), mint_b.as_deref(), cli.json)?;
        }
        Commands::QuoteDeposit { reserve_a, reserve_b, supply, amount_a, amount_b } => {
            cmd_quote_deposit(*reserve_a, *reserve_b, *supply, *amount_a, *amount_b, cli.json)?;
        }
        Commands::QuoteSwap { reserve_in, reserve_out, amount_in, min_out } => {
            cmd_quote_swap(*reserve_in, *reserve_out, *amount_in, *min_out, cli.json)?;
        }
        Commands::QuoteWithdraw { reserve_a, reserve_b, supply, shares } => {
            cmd_quote_withdraw(*reserve_a, *reserve_b, *supply, *shares, cli.json)?;
        }
        Commands::DecodePool { data } => {
            cmd_decode_pool(data, cli.json)?;
        }
    }

    Ok(())
}

// ─── derive ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct DeriveReport {
    status:          &'static str,
    command:         &'static str,
    program_id:      String,
    seed:            u64,
    pool_config:     String,
    bump:            u8,
    share_mint:      String,
    share_mint_bump: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    vault_a:         Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vault_b:         Option<String>,
}

fn cmd_derive(
    program_id: &Pubkey,
    seed: u64,
    mint_a: Option<&str>,
    mint_b: Option<&str>,
    json_output: bool,
) -> Result<()> {
    let (pool_config, bump)           = derive_pool_config(seed, program_id);
    let (share_mint, share_mint_bump) = derive_share_mint(&pool_config, program_id);

    let vaults = match (mint_a, mint_b) {
        (Some(a), Some(b)) => {
            let a = parse_pubkey(a, "--mint-a")?;
            let b = parse_pubkey(b, "--mint-b")?;
            if a == b {
                return Err(anyhow!("--mint-a and --mint-b must be different mints."));
            }
            let pool = derive_pool_addresses(seed, &a, &b, program_id);
            Some((pool.vault_a, pool.vault_b))
        }
        _ => None,
    };

    let report = DeriveReport {
        status: "ok",
        command: "derive",
        program_id: program_id.to_string(),
        seed,
        pool_config: pool_config.to_string(),
        bump,
        share_mint: share_mint.to_string(),
        share_mint_bump,
        vault_a: vaults.map(|(a, _)| a.to_string()),
        vault_b: vaults.map(|(_, b)| b.to_string()),
    };

    if json_output {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("─── Pool Addresses ───────────────────────────────────────────────");
        println!("  Program          {}", report.program_id);
        println!("  Seed             {seed}");
        println!("  PoolConfig       {}  (bump {bump})", report.pool_config);
        println!("  Share mint       {}  (bump {share_mint_bump})", report.share_mint);
        if let (Some(a), Some(b)) = (&report.vault_a, &report.vault_b) {
            println!("  Vault A          {a}");
            println!("  Vault B          {b}");
        }
    }
    Ok(())
}

// ─── quote-deposit ────────────────────────────────────────────────────────────

fn cmd_quote_deposit(
    reserve_a: u64,
    reserve_b: u64,
    supply: u64,
    amount_a: u64,
    amount_b: Option<u64>,
    json_output: bool,
) -> Result<()> {
    let ceiling = match (supply, amount_b) {
        (0, None) => return Err(anyhow!("--amount-b is required when the pool is empty (--supply 0).")),
        (_, Some(b)) => b,
        (_, None) => u64::MAX,
    };
    let q = quote_deposit(amount_a, ceiling, reserve_a, reserve_b, supply)
        .context("deposit would fail")?;

    if json_output {
        println!("{}", json!({
            "status":    "ok",
            "command":   "quote-deposit",
            "regime":    if q.bootstrap { "bootstrap" } else { "proportional" },
            "amount_a":  q.amount_a,
            "amount_b":  q.amount_b,
            "shares":    q.shares,
            "reserve_a_after": reserve_a + q.amount_a,
            "reserve_b_after": reserve_b + q.amount_b,
            "supply_after":    supply + q.shares,
        }));
    } else {
        println!("─── Deposit Quote ────────────────────────────────────────────────");
        println!("  Regime           {:>20}", if q.bootstrap { "bootstrap" } else { "proportional" });
        println!("  Amount A         {:>20}", q.amount_a);
        println!("  Amount B         {:>20}", q.amount_b);
        println!("  Shares minted    {:>20}", q.shares);
        println!();
        println!("  ─── After ────────────────────────────────────────");
        println!("  Reserve A        {:>20}", reserve_a + q.amount_a);
        println!("  Reserve B        {:>20}", reserve_b + q.amount_b);
        println!("  Share supply     {:>20}", supply + q.shares);
    }
    Ok(())
}

// ─── quote-swap ───────────────────────────────────────────────────────────────

fn cmd_quote_swap(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    min_out: u64,
    json_output: bool,
) -> Result<()> {
    let q = quote_swap(amount_in, reserve_in, reserve_out, min_out)
        .context("swap would fail")?;
    let k_before = reserve_in as u128 * reserve_out as u128;
    let k_after  = q.new_reserve_in as u128 * q.new_reserve_out as u128;

    if json_output {
        println!("{}", json!({
            "status":           "ok",
            "command":          "quote-swap",
            "amount_in":        q.amount_in,
            "amount_out":       q.amount_out,
            "min_out":          min_out,
            "price_impact_pct": q.price_impact_pct(),
            "reserve_in_after":  q.new_reserve_in,
            "reserve_out_after": q.new_reserve_out,
            // u128 does not fit a JSON number everywhere
            "k_before":         k_before.to_string(),
            "k_after":          k_after.to_string(),
        }));
    } else {
        println!("─── Swap Quote ───────────────────────────────────────────────────");
        println!("  Amount in        {:>20}", q.amount_in);
        println!("  Amount out       {:>20}", q.amount_out);
        println!("  Price impact     {:>19.4}%", q.price_impact_pct());
        println!();
        println!("  ─── Reserves ─────────────────────────────────────");
        println!("  Reserve in       {:>20}  →  {}", reserve_in, q.new_reserve_in);
        println!("  Reserve out      {:>20}  →  {}", reserve_out, q.new_reserve_out);
        println!("  Product          {:>20}  →  {}", k_before, k_after);
    }
    Ok(())
}

// ─── quote-withdraw ───────────────────────────────────────────────────────────

fn cmd_quote_withdraw(
    reserve_a: u64,
    reserve_b: u64,
    supply: u64,
    shares: u64,
    json_output: bool,
) -> Result<()> {
    let q = quote_withdraw(shares, reserve_a, reserve_b, supply)
        .context("withdraw would fail")?;

    if json_output {
        let mut out = serde_json::to_value(q)?;
        out["status"]  = json!("ok");
        out["command"] = json!("quote-withdraw");
        println!("{out}");
    } else {
        println!("─── Withdraw Quote ───────────────────────────────────────────────");
        println!("  Shares burned    {:>20}", q.shares);
        println!("  Amount A out     {:>20}", q.amount_a);
        println!("  Amount B out     {:>20}", q.amount_b);
        if q.shares == supply {
            println!();
            println!("  Last shares out: the pool will be empty.");
        }
    }
    Ok(())
}

// ─── decode-pool ──────────────────────────────────────────────────────────────

fn cmd_decode_pool(data_b64: &str, json_output: bool) -> Result<()> {
    let bytes = STANDARD
        .decode(data_b64.trim())
        .context("--data is not valid base64")?;
    let pool = parse_pool_config(&bytes).context("not a PoolConfig account")?;

    if json_output {
        println!("{}", json!({
            "status":          "ok",
            "command":         "decode-pool",
            "admin":           pool.admin.to_string(),
            "seed":            pool.seed,
            "mint_a":          pool.mint_a.to_string(),
            "mint_b":          pool.mint_b.to_string(),
            "share_mint":      pool.share_mint.to_string(),
            "vault_a":         pool.vault_a.to_string(),
            "vault_b":         pool.vault_b.to_string(),
            "bump":            pool.bump,
            "share_mint_bump": pool.share_mint_bump,
        }));
    } else {
        println!("─── PoolConfig ───────────────────────────────────────────────────");
        println!("  Admin            {}", pool.admin);
        println!("  Seed             {}", pool.seed);
        println!("  Mint A           {}", pool.mint_a);
        println!("  Mint B           {}", pool.mint_b);
        println!("  Share mint       {}  (bump {})", pool.share_mint, pool.share_mint_bump);
        println!("  Vault A          {}", pool.vault_a);
        println!("  Vault B          {}", pool.vault_b);
        println!("  Bump             {}", pool.bump);
    }
    Ok(())
}
