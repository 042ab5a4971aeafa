use anyhow::Context;
use clap::{Parser, Subcommand};
use nearby::{App, AuthMode, ClientConfig, SearchRadius};
use nearby::services::location::checked_coordinates;

#[derive(Parser)]
#[command(name = "nearby")]
#[command(about = "Find places around you and save favorites")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with email and password
    Login { email: String, password: String },
    /// Create an account
    Signup {
        name: String,
        email: String,
        password: String,
    },
    /// Sign in with a Google ID token
    Google { id_token: String },
    /// Forget the stored credential
    Logout,
    /// Show the signed-in profile
    Whoami,
    /// Search for places (the default command)
    Search {
        /// Radius in km: 1, 5, 10 or 25
        #[arg(short, long, default_value_t = 5)]
        radius: u32,
        #[arg(long, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },
    /// Save a place as a favorite (requires a session)
    Favorite { place_id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("invalid configuration")?;
    let _log_guard = nearby::debug::init(&nearby::debug::LogConfig::from_env());

    let app = App::from_config(&config)?;
    app.start().await;

    match cli.command.unwrap_or(Command::Search {
        radius: 5,
        lat: None,
        lon: None,
    }) {
        Command::Login { email, password } => {
            if app.auth.mode() != AuthMode::Login {
                app.auth.toggle_mode();
            }
            app.auth.set_email(email);
            app.auth.set_password(password);
            authenticate(&app).await?;
        }
        Command::Signup {
            name,
            email,
            password,
        } => {
            if app.auth.mode() != AuthMode::Signup {
                app.auth.toggle_mode();
            }
            app.auth.set_name(name);
            app.auth.set_email(email);
            app.auth.set_password(password);
            authenticate(&app).await?;
        }
        Command::Google { id_token } => {
            let outcome = app.auth.federated_login(&id_token).await;
            app.process_events();
            report_auth(&app, outcome.is_ok())?;
        }
        Command::Logout => {
            app.logout()?;
            println!("Signed out");
        }
        Command::Whoami => match app.profile() {
            Some(profile) => println!(
                "{} <{}> plan: {}",
                profile.name,
                profile.email,
                profile.plan.as_deref().unwrap_or("-")
            ),
            None => println!("Not signed in"),
        },
        Command::Search { radius, lat, lon } => {
            if let (Some(lat), Some(lon)) = (lat, lon) {
                app.discovery.set_coordinates(checked_coordinates(lat, lon)?);
            }
            app.discovery.set_radius(SearchRadius::try_from(radius)?);

            let here = app.discovery.coordinates();
            match app.discovery.search().await {
                Ok(results) => {
                    println!(
                        "{} places within {} km of {:.4}, {:.4}",
                        results.len(),
                        radius,
                        here.latitude,
                        here.longitude
                    );
                    for place in results {
                        println!(
                            "  [{}] {} ({}) {:.1} km",
                            place.id, place.name, place.category, place.distance_km
                        );
                    }
                }
                Err(err) => anyhow::bail!("search failed: {}", err.message()),
            }
        }
        Command::Favorite { place_id } => {
            if !app.favorite(&place_id).await {
                anyhow::bail!("sign in to save favorites");
            }
            for toast in app.notifications().active() {
                println!("{}", toast.message);
            }
        }
    }
    Ok(())
}

async fn authenticate(app: &App) -> anyhow::Result<()> {
    let outcome = app.auth.submit().await;
    app.process_events();
    report_auth(app, outcome.is_ok())
}

fn report_auth(app: &App, succeeded: bool) -> anyhow::Result<()> {
    match (succeeded, app.profile()) {
        (true, Some(profile)) => {
            println!("Signed in as {} <{}>", profile.name, profile.email);
            Ok(())
        }
        _ => anyhow::bail!(app.auth.error().unwrap_or_else(|| "authentication failed".to_string())),
    }
}
