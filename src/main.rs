//! # Chequebook CLI
//!
//! Command-line interface for cheque layout and printing.
//!
//! ## Usage
//!
//! ```bash
//! # Run the browser editor
//! chequebook serve --template cheque.png --accounts accounts.json
//!
//! # Spell out an amount
//! chequebook words 12345.67 --currency AED
//!
//! # Build a print document offline, nudging the amount field
//! chequebook render --template cheque.png --payee "ABC Suppliers Ltd." \
//!     --amount 15000 --currency KWD --date 2025-11-01 --move amount:20,-10 --out cheque.html
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use chequebook::{
    ChequeEditor, ChequeFormData, ChequebookError, Field, Orientation,
    server::{self, ServerConfig},
    template::{RenderedTemplate, Size, TemplateImage},
    words,
};

/// Chequebook - cheque layout and print utility
#[derive(Parser, Debug)]
#[command(name = "chequebook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the browser cheque editor
    Serve {
        /// Address to listen on
        #[arg(long, env = "CHEQUEBOOK_LISTEN", default_value = "127.0.0.1:8080")]
        listen: String,

        /// Cheque template image (path or http(s) URL)
        #[arg(long, env = "CHEQUEBOOK_TEMPLATE")]
        template: Option<String>,

        /// JSON file listing bank accounts
        #[arg(long, env = "CHEQUEBOOK_ACCOUNTS")]
        accounts: Option<PathBuf>,
    },

    /// Print an amount in words
    Words {
        /// Amount, e.g. 12345.67
        amount: String,

        /// Currency code
        #[arg(long, default_value = "USD")]
        currency: String,

        /// Ignore cents
        #[arg(long)]
        whole: bool,
    },

    /// Build a print document without the browser editor
    Render {
        /// Cheque template image (path or http(s) URL)
        #[arg(long, env = "CHEQUEBOOK_TEMPLATE")]
        template: Option<String>,

        /// Payee name
        #[arg(long)]
        payee: String,

        /// Amount, at most two decimal places
        #[arg(long)]
        amount: String,

        /// Currency code
        #[arg(long, default_value = "USD")]
        currency: String,

        /// Cheque date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// horizontal or vertical
        #[arg(long, default_value = "horizontal")]
        orientation: Orientation,

        /// Move a field from its default, e.g. amount:20,-10 (repeatable)
        #[arg(long = "move", value_name = "FIELD:DX,DY", value_parser = parse_move)]
        moves: Vec<(Field, f64, f64)>,

        /// On-screen template size the layout was made at, e.g. 600x280
        #[arg(long, value_name = "WxH", value_parser = parse_size)]
        display: Option<Size>,

        /// Write the document here instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,chequebook=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ChequebookError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            template,
            accounts,
        } => {
            server::serve(ServerConfig {
                listen_addr: listen,
                template,
                accounts_path: accounts,
            })
            .await?;
        }
        Commands::Words {
            amount,
            currency,
            whole,
        } => {
            let text = if whole {
                words::to_words_whole(amount.as_str(), &currency)
            } else {
                words::to_words(amount.as_str(), &currency)
            };
            println!("{}", text);
        }
        Commands::Render {
            template,
            payee,
            amount,
            currency,
            date,
            orientation,
            moves,
            display,
            out,
        } => {
            let mut form = ChequeFormData::default();
            form.payee_name = payee;
            form.amount = amount;
            form.currency = currency;
            form.date = date.unwrap_or_else(|| {
                chrono::Local::now()
                    .date_naive()
                    .format(chequebook::form::DATE_FORMAT)
                    .to_string()
            });
            form.orientation = orientation;

            let mut editor = ChequeEditor::new(form);
            editor.generate_preview()?;
            for (field, dx, dy) in moves {
                if let Some(payload) = editor.begin_drag(field) {
                    editor.drop_field(&payload, dx, dy);
                }
            }

            let template = match template {
                Some(location) => match TemplateImage::load(&location).await {
                    Ok(template) => Some(template),
                    Err(e) => {
                        tracing::warn!(error = %e, "rendering without a template");
                        None
                    }
                },
                None => None,
            };
            let rendered = template.as_ref().map(|t| {
                let rendered = RenderedTemplate::new(t, orientation);
                match display {
                    Some(size) => rendered.with_display(size),
                    None => rendered,
                }
            });

            let html = editor.print_document(rendered.as_ref());
            match out {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    println!("Saved to {}", path.display());
                }
                None => print!("{}", html),
            }
        }
    }

    Ok(())
}

/// Parse `field:dx,dy`.
fn parse_move(s: &str) -> Result<(Field, f64, f64), String> {
    let (field, delta) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FIELD:DX,DY, got '{}'", s))?;
    let (dx, dy) = delta
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{}'", delta))?;
    let dx = dx.trim().parse().map_err(|_| format!("invalid dx '{}'", dx))?;
    let dy = dy.trim().parse().map_err(|_| format!("invalid dy '{}'", dy))?;
    Ok((field.parse()?, dx, dy))
}

/// Parse `WIDTHxHEIGHT`.
fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{}'", s))?;
    let width = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
    let height = h.trim().parse().map_err(|_| format!("invalid height '{}'", h))?;
    Ok(Size::new(width, height))
}
