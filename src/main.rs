//! MLGCL Librarian - interactive terminal client
//!
//! Thin prompt/print glue over the service layer: login + OTP, a
//! dashboard menu, and the scan-driven borrow and return flows. Scanned
//! codes are entered as lines, standing in for decoded camera frames.

use std::io::Write as _;
use std::time::Instant;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mlgcl_librarian::{
    api::ApiClient,
    config::AppConfig,
    error::AppError,
    models::record::BorrowingRecord,
    services::{
        auth::AuthService,
        borrow::BorrowService,
        records::{self, ITEMS_PER_PAGE},
        returns::ReturnService,
        session::SessionStore,
        Services,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("mlgcl_librarian={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MLGCL Librarian v{}", env!("CARGO_PKG_VERSION"));

    let session = SessionStore::new(&config.session.store_path);
    let api = ApiClient::new(&config, session.clone())?;
    let mut services = Services::new(api.clone(), &config, session);
    let mut prompt = Prompt::new();

    if services.auth.has_device_session().await.unwrap_or(false) {
        println!("Welcome back.");
    } else if !login_flow(&mut prompt, &services.auth).await? {
        return Ok(());
    }

    dashboard_loop(&mut prompt, &mut services, &api).await
}

/// Line-based prompt standing in for the touch UI
struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, label: &str) -> anyhow::Result<String> {
        print!("{}: ", label);
        std::io::stdout().flush()?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => anyhow::bail!("input closed"),
        }
    }
}

fn alert(err: &AppError) {
    println!("Error: {}", err.user_message());
}

/// Login + OTP screens. Returns false when the user backs out.
async fn login_flow(prompt: &mut Prompt, auth: &AuthService) -> anyhow::Result<bool> {
    loop {
        println!("\n-- Sign in (empty email to quit) --");
        let email = prompt.ask("Email").await?;
        if email.is_empty() {
            return Ok(false);
        }
        let password = prompt.ask("Password").await?;

        match auth.login(&email, &password).await {
            Ok(response) => {
                if let Some(message) = response.message {
                    println!("{}", message);
                }
            }
            Err(e) => {
                alert(&e);
                continue;
            }
        }

        // OTP screen
        loop {
            let code = prompt.ask("OTP code (empty to start over)").await?;
            if code.is_empty() {
                break;
            }
            let code: u32 = match code.parse() {
                Ok(code) => code,
                Err(_) => {
                    println!("The code is digits only.");
                    continue;
                }
            };

            match auth.verify_otp(code).await {
                Ok(_) => {
                    println!("Signed in.");
                    return Ok(true);
                }
                Err(e) => alert(&e),
            }
        }
    }
}

async fn dashboard_loop(
    prompt: &mut Prompt,
    services: &mut Services,
    api: &ApiClient,
) -> anyhow::Result<()> {
    loop {
        println!("\n-- Dashboard --");
        match api.library.fetch_stats().await {
            Ok(stats) => println!(
                "Books: {}   Copies: {}   Borrowed: {}",
                stats.book_count, stats.copy_count, stats.borrowed_count
            ),
            Err(e) => alert(&e),
        }
        println!("[1] Search  [2] Borrow  [3] Return  [4] Borrowings  [5] Reservations  [6] Logout  [q] Quit");

        match prompt.ask("Choice").await?.as_str() {
            "1" => search_flow(prompt, api).await?,
            "2" => borrow_flow(prompt, &mut services.borrow).await?,
            "3" => return_flow(prompt, &mut services.returns).await?,
            "4" => borrowings_flow(prompt, api).await?,
            "5" => reservations_flow(prompt, api).await?,
            "6" => {
                if let Err(e) = services.auth.logout().await {
                    alert(&e);
                }
                if !login_flow(prompt, &services.auth).await? {
                    return Ok(());
                }
            }
            "q" => return Ok(()),
            _ => {}
        }
    }
}

async fn search_flow(prompt: &mut Prompt, api: &ApiClient) -> anyhow::Result<()> {
    loop {
        let query = prompt.ask("\nSearch books (empty to go back)").await?;
        if query.is_empty() {
            return Ok(());
        }

        match api.library.search_books(&query).await {
            Ok(books) if books.is_empty() => println!("No books found."),
            Ok(books) => {
                for book in &books {
                    println!(
                        "#{} {} — {} | {} | {} copies",
                        book.id,
                        book.title,
                        book.author,
                        book.published
                            .map(|y| y.to_string())
                            .unwrap_or_else(|| "n/a".to_string()),
                        book.available_copies
                    );
                }
            }
            Err(e) => alert(&e),
        }
    }
}

async fn borrow_flow(
    prompt: &mut Prompt,
    borrow: &mut BorrowService<ApiClient>,
) -> anyhow::Result<()> {
    // Phase 1: book scan
    println!("\n-- Borrow: scan the book copy --");
    loop {
        let code = prompt.ask("Book code (empty to cancel)").await?;
        if code.is_empty() {
            borrow.cancel();
            return Ok(());
        }

        match borrow.handle_book_scan(&code, Instant::now()).await {
            Ok(Some(t)) => {
                println!("{}", t.book_title);
                if !t.book_subtitle.is_empty() {
                    println!("{}", t.book_subtitle);
                }
                println!(
                    "By {} | {} | {} | {}",
                    t.book_author, t.book_classification, t.book_language, t.book_published
                );
                println!(
                    "Available: {}   Reserved: {}",
                    t.available_copies, t.reserved
                );
                break;
            }
            Ok(None) => println!("Scanner not ready, try again."),
            Err(e) => alert(&e),
        }
    }

    // Phase 2: borrower scan
    println!("-- Scan the borrower's portal QR --");
    loop {
        let payload = prompt.ask("Borrower QR (empty to cancel)").await?;
        if payload.is_empty() {
            borrow.cancel();
            println!("Borrow cancelled.");
            return Ok(());
        }

        match borrow.handle_borrower_scan(&payload, Instant::now()).await {
            Ok(Some(borrower)) => {
                println!(
                    "{} ({})",
                    borrower.name,
                    borrower.borrower_type.to_uppercase()
                );
                break;
            }
            Ok(None) => println!("Scanner not ready, try again."),
            Err(e) => alert(&e),
        }
    }

    // Phase 3: confirmation
    loop {
        match prompt.ask("Confirm borrow? [y/n]").await?.as_str() {
            "y" => match borrow.confirm().await {
                Ok(message) => {
                    println!("Success: {}", message);
                    return Ok(());
                }
                // Transaction stays intact; confirmation can be retried.
                Err(e) => alert(&e),
            },
            "n" => {
                borrow.cancel();
                println!("Borrow cancelled.");
                return Ok(());
            }
            _ => {}
        }
    }
}

async fn return_flow(
    prompt: &mut Prompt,
    returns: &mut ReturnService<ApiClient>,
) -> anyhow::Result<()> {
    println!("\n-- Return: scan the book copy --");
    loop {
        let code = prompt.ask("Book code (empty to go back)").await?;
        if code.is_empty() {
            return Ok(());
        }

        match returns.handle_scan(&code, Instant::now()).await {
            Ok(Some(message)) => println!("{}", message),
            Ok(None) => println!("Scanner not ready, try again."),
            Err(e) => alert(&e),
        }
    }
}

async fn borrowings_flow(prompt: &mut Prompt, api: &ApiClient) -> anyhow::Result<()> {
    let records = match api.library.fetch_borrowings().await {
        Ok(records) => records,
        Err(e) => {
            alert(&e);
            return Ok(());
        }
    };

    let mut query = String::new();
    let mut page = 1usize;
    loop {
        let filtered = records::filter_borrowings(&records, &query);
        let current = records::paginate(&filtered, page, ITEMS_PER_PAGE);
        page = current.page;

        if query.is_empty() {
            println!("\nTotal: {} borrowings", current.total);
        } else {
            println!("\nFound: {} borrowings for '{}'", current.total, query);
        }
        for record in &current.items {
            println!(
                "#{} {} — {} | borrowed {}",
                record.id,
                record.book_copy.book.title,
                record.user.name,
                format_date(record)
            );
        }
        println!("Page {} of {}", current.page, current.total_pages);

        let command = prompt
            .ask("[n]ext [p]rev /text to filter, empty to clear, [q] back")
            .await?;
        match command.as_str() {
            "q" => return Ok(()),
            "n" => page += 1,
            "p" => page = page.saturating_sub(1).max(1),
            "" => {
                query.clear();
                page = 1;
            }
            text => {
                if let Some(filter) = text.strip_prefix('/') {
                    query = filter.to_string();
                    page = 1;
                }
            }
        }
    }
}

fn format_date(record: &BorrowingRecord) -> String {
    record.borrowed_at.format("%b %e, %Y %H:%M").to_string()
}

async fn reservations_flow(prompt: &mut Prompt, api: &ApiClient) -> anyhow::Result<()> {
    let reservations = match api.library.fetch_reservations().await {
        Ok(reservations) => reservations,
        Err(e) => {
            alert(&e);
            return Ok(());
        }
    };

    let refs: Vec<_> = reservations.iter().collect();
    let mut page = 1usize;
    loop {
        let current = records::paginate(&refs, page, ITEMS_PER_PAGE);
        page = current.page;

        println!("\nTotal: {} reservations", current.total);
        for r in &current.items {
            let expires = r
                .expires_at_utc()
                .map(|d| d.format("%b %e, %Y %H:%M").to_string())
                .unwrap_or_else(|| "n/a".to_string());
            println!(
                "#{} user {} copy {} | expires {} | {}",
                r.id,
                r.user_id,
                r.book_copy_id,
                expires,
                if r.is_claimed() { "claimed" } else { "pending" }
            );
        }
        println!("Page {} of {}", current.page, current.total_pages);

        match prompt.ask("[n]ext [p]rev [q] back").await?.as_str() {
            "q" => return Ok(()),
            "n" => page += 1,
            "p" => page = page.saturating_sub(1).max(1),
            _ => {}
        }
    }
}
