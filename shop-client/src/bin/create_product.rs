//! create-product: drive the product wizard from the command line
//!
//! ```text
//! create-product --draft product.json --image cover.jpg --image back.png --primary 0
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use product_wizard::{
    BookField, FileHandle, PreviewPool, SubmitOutcome, WizardConfig, WizardController, WizardStep,
};
use serde::Deserialize;
use shared::models::{ProductStatus, ProductType};
use shop_client::logger::init_logger;
use shop_client::ClientConfig;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "create-product", version, about = "Create a storefront product")]
struct Args {
    /// Storefront API base URL
    #[arg(long, env = "SHOP_BASE_URL")]
    base_url: Option<String>,

    /// Bearer token
    #[arg(long, env = "SHOP_TOKEN")]
    token: Option<String>,

    /// Product draft (JSON)
    #[arg(long)]
    draft: PathBuf,

    /// Image file to attach; repeat for several
    #[arg(long = "image")]
    images: Vec<PathBuf>,

    /// Index (in --image order) of the primary image
    #[arg(long)]
    primary: Option<usize>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

/// Product draft as read from disk
#[derive(Debug, Deserialize)]
struct DraftFile {
    name: String,
    /// Decimal text, e.g. "12.50"
    price: String,
    #[serde(default)]
    status: ProductStatus,
    #[serde(default)]
    product_type: ProductType,
    /// Categories to select; ancestors are pulled in automatically
    #[serde(default)]
    categories: Vec<i64>,
    #[serde(default)]
    book: HashMap<BookField, String>,
}

fn load_draft(path: &Path) -> Result<DraftFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid draft {}", path.display()))
}

fn load_image(path: &Path) -> Result<FileHandle> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(FileHandle::new(name, mime.essence_str(), data))
}

fn print_errors(wizard: &WizardController) {
    for (field, message) in wizard.errors().iter() {
        eprintln!("  {field}: {message}");
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_logger(Some(&args.log_level), args.json_logs)?;

    let mut client_config = ClientConfig::from_env();
    if let Some(base_url) = args.base_url {
        client_config = client_config.with_base_url(base_url);
    }
    if let Some(token) = args.token {
        client_config = client_config.with_token(token);
    }
    let client = client_config.build_http_client()?;

    let draft = load_draft(&args.draft)?;

    let wizard_config = WizardConfig::from_env();
    let pool = PreviewPool::new(wizard_config.max_preview_handles);
    let mut wizard = WizardController::new(wizard_config, pool);

    if let Some(notice) = wizard.open(&client).await {
        eprintln!("warning: {}", notice.message);
    }

    wizard.set_name(draft.name);
    wizard.set_price(draft.price);
    wizard.set_status(draft.status);
    wizard.set_product_type(draft.product_type);
    for (field, value) in draft.book {
        wizard.set_book_field(field, value);
    }
    for id in draft.categories {
        if !wizard.draft().categories.contains(id) {
            wizard.toggle_category(id);
        }
    }

    let mut added = Vec::new();
    for path in &args.images {
        let file = load_image(path)?;
        match wizard.add_image(file) {
            Ok(id) => added.push(id),
            Err(e) => eprintln!("skipped {}: {}", path.display(), e),
        }
    }
    if let Some(index) = args.primary {
        match added.get(index) {
            Some(&id) => wizard.set_primary_image(id)?,
            None => eprintln!("warning: --primary {index} does not match an added image"),
        }
    }

    while wizard.step() != WizardStep::Review {
        let step = wizard.step();
        if !wizard.next() {
            eprintln!("{step} is incomplete:");
            print_errors(&wizard);
            return Ok(ExitCode::FAILURE);
        }
    }

    let outcome = wizard.submit(&client, &client).await;
    println!("{}", outcome.message());
    match outcome {
        SubmitOutcome::Created { product_id, .. } => {
            println!("product id: {product_id}");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Invalid { .. } | SubmitOutcome::Rejected { .. } => {
            print_errors(&wizard);
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::NotReady => Ok(ExitCode::FAILURE),
    }
}
