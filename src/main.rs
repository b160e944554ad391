//! Biblio - command-line front end for the library management server

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblio_client::{
    config::AppConfig,
    models::{BookQuery, Credentials},
    views::{self, Banner, Palette, PasswordResetForm},
    AppState,
};

#[derive(Parser)]
#[command(name = "biblio", version, about = "Biblio library management client")]
struct Cli {
    /// Server root URL, overrides the configuration
    #[arg(long, global = true, env = "BIBLIO_URL")]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(short, long, env = "BIBLIO_USERNAME")]
        username: String,
        #[arg(short, long, env = "BIBLIO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Change the signed-in user's password
    Password {
        #[arg(long, env = "BIBLIO_CURRENT_PASSWORD", hide_env_values = true)]
        current: Option<String>,
        #[arg(long, env = "BIBLIO_NEW_PASSWORD", hide_env_values = true)]
        new: String,
        #[arg(long, env = "BIBLIO_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm: String,
    },
    /// Search the catalog
    Books {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        page: Option<i64>,
    },
    /// List the copies of one book
    Specimens { book_id: i32 },
    /// List members
    Members,
    /// List librarians
    Librarians,
    /// List loans, active ones by default
    Loans {
        #[arg(long)]
        member: Option<i32>,
        /// Only show overdue loans
        #[arg(long)]
        overdue: bool,
    },
    /// Show the dashboard
    Stats,
    /// Show the active palette
    Theme {
        /// Switch between the light and dark palettes first
        #[arg(long)]
        toggle: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(url) = cli.url {
        config.api.base_url = url;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblio_client={},biblio={}", config.logging.level, config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Using server {}", config.api.base_url);
    let state = AppState::connect(config)?;

    run(cli.command, &state).await
}

async fn run(command: Command, state: &AppState) -> anyhow::Result<()> {
    let services = &state.services;

    match command {
        Command::Login { username, password } => {
            let result = services.auth.login(&Credentials { username, password }).await;
            print_session_banner(state);
            result?;
        }
        Command::Logout => {
            services.auth.logout();
            println!("Signed out");
        }
        Command::Whoami => match state.store.session.select(|s| s.user.clone()) {
            Some(user) => println!("{} ({})", user.display_name(), user.role),
            None => println!("Not signed in"),
        },
        Command::Password { current, new, confirm } => {
            let mut form = PasswordResetForm::new();
            form.set_password(new);
            form.set_confirmation(confirm);
            if let Some(message) = form.mismatch_message() {
                anyhow::bail!(message);
            }
            let Some(password) = form.confirm() else {
                anyhow::bail!("A new password is required");
            };
            let result = services.auth.reset_password(current, password).await;
            print_session_banner(state);
            result?;
            println!("Password changed");
        }
        Command::Books { title, author, page } => {
            let query = BookQuery {
                title,
                author,
                page,
                ..Default::default()
            };
            let result = services.catalog.load_books(&query).await;
            print_list_banner(services.catalog.books());
            result?;
            for book in services.catalog.books().select(|s| s.entities.clone()) {
                let marker = if book.is_available() { ' ' } else { '*' };
                println!("{:>6} {} {}", book.id, marker, book.title_or_placeholder());
            }
        }
        Command::Specimens { book_id } => {
            let fetched = services.catalog.specimens(book_id).settled().await;
            if let Some(error) = fetched.error {
                anyhow::bail!(error);
            }
            for specimen in fetched.data {
                let shelf = if specimen.can_borrow() { "available" } else { "out" };
                println!(
                    "{:>6} {:<16} {}",
                    specimen.id,
                    specimen.barcode.as_deref().unwrap_or("-"),
                    shelf
                );
            }
        }
        Command::Members => {
            let result = services.members.load().await;
            print_list_banner(services.members.members());
            result?;
            for member in services.members.members().select(|s| s.entities.clone()) {
                let late = if member.has_late_loans() { " (late)" } else { "" };
                println!("{:>6} {}{}", member.id, member.display_name(), late);
            }
        }
        Command::Librarians => {
            let result = services.librarians.load().await;
            print_list_banner(services.librarians.librarians());
            result?;
            for librarian in services.librarians.librarians().select(|s| s.entities.clone()) {
                println!("{:>6} {}", librarian.id, librarian.display_name());
            }
        }
        Command::Loans { member, overdue } => {
            let result = match member {
                Some(id) => services.loans.load_for_member(id).await,
                None => services.loans.load_active().await,
            };
            print_list_banner(services.loans.loans());
            result?;
            let loans = if overdue {
                services.loans.overdue()
            } else {
                services.loans.loans().select(|s| s.entities.clone())
            };
            for loan in loans {
                println!(
                    "{:>6} {} due {}",
                    loan.id,
                    loan.title().unwrap_or("(untitled)"),
                    loan.issue_date.format("%Y-%m-%d")
                );
            }
        }
        Command::Stats => {
            let fetched = services.stats.dashboard().settled().await;
            if let Some(error) = fetched.error {
                anyhow::bail!(error);
            }
            for tile in views::tiles(&fetched.data) {
                println!("{}", tile);
            }
        }
        Command::Theme { toggle } => {
            let dark_mode = if toggle {
                services.auth.toggle_dark_mode()
            } else {
                state.store.session.select(|s| s.dark_mode)
            };
            let palette = Palette::for_mode(dark_mode);
            println!(
                "{}: background {} foreground {} accent {}",
                palette.name, palette.background, palette.foreground, palette.accent
            );
        }
    }

    Ok(())
}

fn print_session_banner(state: &AppState) {
    if let Some(banner) = state.store.session.select(Banner::for_session) {
        println!("{}", banner);
    }
}

fn print_list_banner<T>(list: &biblio_client::store::EntityList<T>)
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    if let Some(banner) = list.select(Banner::for_list) {
        println!("{}", banner);
    }
}
