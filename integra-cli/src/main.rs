use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use integra_core::{AccountCode, ClientProfile, Dialect, Transaction};
use integra_ingest::diagnostics::inspect_page;
use integra_ledger::{
    ClientRegistry, CsvRuleStore, LedgerError, NewClient, RuleStore, export_file_name,
    export_lines, render, review,
};
use std::fs;
use std::path::{Path, PathBuf};

mod config;
mod input;
mod state;

use input::{Document, load_document, parse_document};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("INTEGRA_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "integra",
    version = VERSION,
    about = "Bank statement layout reconstruction and ledger export"
)]
struct Cli {
    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse extracted statement tokens and print the transactions
    Parse {
        /// Token JSON (or plain text with --text)
        input: PathBuf,

        /// Layout dialect: columnar or positional
        #[arg(long)]
        dialect: Option<Dialect>,

        /// Take the dialect from this client's profile (id or name)
        #[arg(long)]
        client: Option<String>,

        /// Input is plain text, pages separated by form feed
        #[arg(long)]
        text: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show clustered rows and header detection for each page
    Diagnose {
        input: PathBuf,

        /// Only this page (1-based)
        #[arg(long)]
        page: Option<usize>,
    },

    /// Client registry
    Client {
        #[command(subcommand)]
        command: ClientCommand,
    },

    /// Description → account rules of a client
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },

    /// Split a statement into mapped entries and descriptions still lacking a rule
    Review {
        input: PathBuf,

        #[arg(long)]
        client: String,

        #[arg(long)]
        text: bool,
    },

    /// Write the accounting import file for a statement
    Export {
        input: PathBuf,

        #[arg(long)]
        client: String,

        #[arg(long)]
        text: bool,

        /// Output file (default: <output_dir>/dominio_<system code>.txt)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Engine and export settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ClientCommand {
    /// Register a client
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        cnpj: Option<String>,

        /// Company code in the accounting system
        #[arg(long)]
        system_code: String,

        /// Ledger account of the client's bank
        #[arg(long)]
        bank_account: String,

        #[arg(long, default_value_t = Dialect::Columnar)]
        dialect: Dialect,
    },

    /// List registered clients
    List,
}

#[derive(Subcommand, Debug)]
enum RulesCommand {
    /// Map a description to an account, replacing any existing rule
    Set {
        #[arg(long)]
        client: String,

        description: String,

        account: String,
    },

    /// List the rules of a client
    List {
        #[arg(long)]
        client: String,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.integra/config.toml with defaults
    Init,

    /// Print the effective config
    Show,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Parse {
            input,
            dialect,
            client,
            text,
            json,
        } => {
            let dialect = match (dialect, client) {
                (Some(d), _) => d,
                (None, Some(c)) => load_registry()?.find(&c)?.dialect,
                (None, None) => Dialect::Columnar,
            };
            let txns = parse_input(&input, text, dialect)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&txns)?);
            } else {
                print_transactions(&txns);
            }
        }

        Command::Diagnose { input, page } => diagnose(&input, page)?,

        Command::Client { command } => match command {
            ClientCommand::Add {
                name,
                cnpj,
                system_code,
                bank_account,
                dialect,
            } => {
                let mut registry = load_registry()?;
                let added = registry.add(NewClient {
                    name,
                    cnpj,
                    system_code,
                    bank_account: AccountCode::new(&bank_account)?,
                    dialect,
                })?;
                println!("Added client {} ({})", added.id, added.name);
                registry.save()?;
            }
            ClientCommand::List => {
                let registry = load_registry()?;
                let clients = registry.list();
                if clients.is_empty() {
                    println!("No clients registered (integra client add ...)");
                }
                for c in clients {
                    println!(
                        "{:>4}  {:<30} code={:<8} bank={:<8} {}",
                        c.id,
                        c.name,
                        c.system_code,
                        c.bank_account,
                        c.dialect.label()
                    );
                }
            }
        },

        Command::Rules { command } => match command {
            RulesCommand::Set {
                client,
                description,
                account,
            } => {
                let client = load_registry()?.find(&client)?.clone();
                let mut rules = open_rules(&client)?;
                rules.upsert(&description, AccountCode::new(&account)?);
                rules.save()?;
                println!("{} → {} ({})", description.trim(), account.trim(), client.name);
            }
            RulesCommand::List { client } => {
                let client = load_registry()?.find(&client)?.clone();
                let rules = open_rules(&client)?;
                for (description, account) in rules.entries() {
                    println!("{:<8} {}", account, description);
                }
            }
        },

        Command::Review {
            input,
            client,
            text,
        } => {
            let client = load_registry()?.find(&client)?.clone();
            let txns = parse_input(&input, text, client.dialect)?;
            let rules = open_rules(&client)?;
            let result = review(&txns, &rules);

            println!("Mapped: {}", result.mapped.len());
            for m in &result.mapped {
                println!(
                    "  #{:<4} {} {:<8} {:>12.2}  {}",
                    m.seq, m.date, m.account, m.value, m.description
                );
            }
            println!("Pending: {}", result.pending.len());
            for p in &result.pending {
                println!(
                    "  x{:<3} {:>12.2}  {}",
                    p.occurrences, p.example_value, p.description
                );
            }
            if !result.is_complete() {
                println!("\nAdd rules with: integra rules set --client {} <description> <account>", client.id);
            }
        }

        Command::Export {
            input,
            client,
            text,
            out,
        } => {
            let client = load_registry()?.find(&client)?.clone();
            let txns = parse_input(&input, text, client.dialect)?;
            let rules = open_rules(&client)?;

            let lines = match export_lines(&txns, &rules, &client.bank_account) {
                Ok(lines) => lines,
                Err(LedgerError::Unmapped {
                    count,
                    descriptions,
                }) => {
                    for d in &descriptions {
                        eprintln!("  no rule: {d}");
                    }
                    bail!(
                        "{count} transaction(s) without an account rule; nothing written (see integra review)"
                    );
                }
                Err(e) => return Err(e.into()),
            };

            let out = match out {
                Some(p) => p,
                None => config::load_config()?
                    .export
                    .output_dir
                    .join(export_file_name(&client)),
            };
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            fs::write(&out, render(&lines)).with_context(|| format!("write {}", out.display()))?;
            println!("Wrote {} line(s) to {}", lines.len(), out.display());
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn load_registry() -> Result<ClientRegistry> {
    let path = state::clients_path()?;
    ClientRegistry::load(&path).with_context(|| format!("load {}", path.display()))
}

fn open_rules(client: &ClientProfile) -> Result<CsvRuleStore> {
    let path = state::rules_path(client.id)?;
    CsvRuleStore::open(&path).with_context(|| format!("load {}", path.display()))
}

fn parse_input(input: &Path, text: bool, dialect: Dialect) -> Result<Vec<Transaction>> {
    let cfg = config::load_config()?;
    let doc = load_document(input, text)?;
    log::info!(
        "{}: {} page(s), dialect {}",
        input.display(),
        doc.page_count(),
        dialect.key()
    );
    parse_document(&doc, dialect, &cfg.engine_options())
        .with_context(|| format!("parse {}", input.display()))
}

fn print_transactions(txns: &[Transaction]) {
    for t in txns {
        println!(
            "{:>4}  {:<10}  {:>12.2}  {}",
            t.seq, t.date, t.value, t.description_final
        );
    }
    let credits: f64 = txns.iter().filter(|t| t.is_credit()).map(|t| t.value).sum();
    let debits: f64 = txns.iter().filter(|t| t.is_debit()).map(|t| t.value).sum();
    println!(
        "\n{} transaction(s)  credits={:.2}  debits={:.2}",
        txns.len(),
        credits,
        debits
    );
}

fn diagnose(input: &Path, only: Option<usize>) -> Result<()> {
    let cfg = config::load_config()?;
    let Document::Tokens(pages) = load_document(input, false)? else {
        bail!("diagnose needs token JSON");
    };
    if let Some(n) = only {
        if n == 0 || n > pages.len() {
            bail!("page {n} out of range (document has {} page(s))", pages.len());
        }
    }

    for (i, page) in pages.iter().enumerate() {
        let number = i + 1;
        if only.is_some_and(|n| n != number) {
            continue;
        }
        let report = inspect_page(page, cfg.engine.y_tolerance);
        println!("=== page {number}: {} token(s), {} row(s)", report.token_count, report.rows.len());
        if report.is_blank() {
            println!("  (no text; image-only page?)");
            continue;
        }
        for (r, row) in report.rows.iter().enumerate() {
            println!("  [{r:>3}] y={:>7.1}  {}", row.top, row.text);
        }
        match (&report.header, &report.layout) {
            (Some(h), Some(layout)) => {
                println!(
                    "  header rows {}..={} at y={:.1}",
                    h.first_row, h.last_row, h.anchor_y
                );
                for spec in layout.specs() {
                    println!("    {:<10} x={:.1}", spec.name, spec.anchor_x);
                }
                println!("    boundaries {:?}", layout.boundaries());
            }
            (Some(h), None) => println!(
                "  header rows {}..={} found but columns incomplete",
                h.first_row, h.last_row
            ),
            (None, _) => println!("  no header"),
        }
    }
    Ok(())
}
