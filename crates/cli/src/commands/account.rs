//! Account and session commands.

use clap::Subcommand;
use secrecy::SecretString;

use voltpeak_storefront::auth;
use voltpeak_storefront::state::StorefrontApp;

#[derive(Subcommand)]
pub enum AccountAction {
    /// Sign in and persist the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (at least 6 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show who is signed in and the current preferences
    Status,
    /// Switch the theme preference
    Theme {
        /// `dark` or `light`
        value: String,
    },
    /// Toggle admin surfaces on or off
    AdminMode,
}

pub async fn account(
    app: &mut StorefrontApp,
    action: AccountAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AccountAction::Login { email, password } => {
            let identity =
                auth::login(app.client(), &email, &SecretString::from(password)).await?;
            let is_admin = identity.role.is_admin();
            let name = identity.display_name.clone();
            app.session_mut().sign_in(identity)?;

            if is_admin {
                println!("welcome back, {name} - admin access granted");
            } else {
                println!("welcome, {name}");
            }
        }
        AccountAction::Register {
            name,
            email,
            password,
        } => {
            auth::register(app.client(), &name, &email, &SecretString::from(password)).await?;
            println!("account created - you can sign in now");
        }
        AccountAction::Logout => {
            app.session_mut().sign_out()?;
            println!("signed out");
        }
        AccountAction::Status => {
            let session = app.session();
            println!("signed in: {}", session.is_logged_in());
            println!("name:      {}", session.display_name());
            println!(
                "theme:     {}",
                if session.is_dark() { "dark" } else { "light" }
            );
            println!("admin:     {}", session.admin_mode());
            println!("cart:      {} line(s)", app.cart().len());
            println!("wishlist:  {} item(s)", app.wishlist().len());
        }
        AccountAction::Theme { value } => {
            let dark = match value.as_str() {
                "dark" => true,
                "light" => false,
                other => return Err(format!("unknown theme: {other}").into()),
            };
            app.session_mut().set_dark(dark)?;
            println!("theme set to {value}");
        }
        AccountAction::AdminMode => {
            let enabled = app.session_mut().toggle_admin_mode()?;
            println!(
                "admin surfaces {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
    }
    Ok(())
}
