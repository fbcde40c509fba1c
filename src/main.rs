//! NCAA Field Hockey Roster Scraper CLI
//!
//! Collects team rosters from collegiate athletics sites and writes
//! per-season JSON/CSV snapshots.

use clap::{Parser, Subcommand};
use fhockey::{Config, Result};

#[derive(Parser)]
#[command(name = "fhockey")]
#[command(about = "NCAA field hockey roster scraper", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "fhockey.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape season rosters for every team in the team list
    Scrape {
        /// Season year, e.g. 2026
        #[arg(long)]
        season: Option<String>,
        /// Only scrape the team with this NCAA ID
        #[arg(long)]
        team: Option<u32>,
        /// Stop after this many teams
        #[arg(long)]
        limit: Option<usize>,
        /// Team list CSV path
        #[arg(long)]
        teams_csv: Option<String>,
        /// Output directory
        #[arg(long)]
        output_dir: Option<String>,
        /// Skip player profile pages
        #[arg(long)]
        no_profiles: bool,
        /// Delay between requests in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Fill missing fields in an existing roster CSV from profile pages
    Enhance {
        /// Input roster CSV
        #[arg(long)]
        input: String,
        /// Output CSV path
        #[arg(long)]
        output: String,
        /// Revisit profiles even for rows that already have data
        #[arg(long)]
        force: bool,
        /// Only process rows for this team name
        #[arg(long)]
        team: Option<String>,
        /// Delay between requests in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Initialize a new project with default config
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Run command
    let result = match cli.command {
        Commands::Scrape {
            season,
            team,
            limit,
            teams_csv,
            output_dir,
            no_profiles,
            delay_ms,
        } => commands::scrape(
            &config, season, team, limit, teams_csv, output_dir, no_profiles, delay_ms,
        ),
        Commands::Enhance {
            input,
            output,
            force,
            team,
            delay_ms,
        } => commands::enhance(&config, &input, &output, force, team, delay_ms),
        Commands::Init { force } => commands::init(&cli.config, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use std::time::Duration;

    use fhockey::data::scrapers::{HttpFetcher, RosterScraper};
    use fhockey::data::{load_teams, OutputWriter};
    use fhockey::enhance::{enhance_csv, EnhanceOptions};
    use fhockey::runner::RosterRunner;
    use fhockey::FhockeyError;

    #[allow(clippy::too_many_arguments)]
    pub fn scrape(
        config: &Config,
        season: Option<String>,
        team: Option<u32>,
        limit: Option<usize>,
        teams_csv: Option<String>,
        output_dir: Option<String>,
        no_profiles: bool,
        delay_ms: Option<u64>,
    ) -> Result<()> {
        let season = season.unwrap_or_else(|| config.scrape.season.clone());
        let teams_csv = teams_csv.unwrap_or_else(|| config.scrape.teams_csv.clone());
        let output_dir = output_dir.unwrap_or_else(|| config.output.dir.clone());
        let delay = Duration::from_millis(delay_ms.unwrap_or(config.scrape.delay_ms));
        let timeout = Duration::from_secs(config.scrape.timeout_secs);
        let scrape_profiles = !no_profiles && config.scrape.scrape_profiles;

        let mut teams = load_teams(&teams_csv)?;
        if let Some(id) = team {
            teams.retain(|t| t.ncaa_id == id);
            if teams.is_empty() {
                return Err(FhockeyError::TeamNotFound(id));
            }
            log::info!("Scraping single team: {}", teams[0].team);
        }
        if teams.is_empty() {
            return Err(FhockeyError::Config(format!(
                "No teams to scrape in {}",
                teams_csv
            )));
        }

        let fetcher = HttpFetcher::new(delay, timeout);
        let scraper = RosterScraper::new(Box::new(fetcher), scrape_profiles);
        let runner = RosterRunner::new(scraper, season.clone());
        let (players, report) = runner.run(&teams, limit);

        let writer = OutputWriter::new(&output_dir, season.clone());
        if players.is_empty() {
            log::warn!("No players scraped - roster files not written");
        } else {
            writer.write_rosters(&players)?;
        }
        writer.write_reports(&report)?;

        println!("\n{}", "=".repeat(80));
        println!("SCRAPING SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Season: {}", season);
        println!("Teams attempted: {}", report.attempted());
        println!("Successful: {} teams", report.successful.len());
        println!("Total players: {}", players.len());
        println!("Zero players: {} teams", report.zero_players.len());
        println!("Failed: {} teams", report.failed.len());
        println!("{}", "=".repeat(80));

        Ok(())
    }

    pub fn enhance(
        config: &Config,
        input: &str,
        output: &str,
        force: bool,
        team: Option<String>,
        delay_ms: Option<u64>,
    ) -> Result<()> {
        let delay = Duration::from_millis(delay_ms.unwrap_or(config.scrape.delay_ms));
        let timeout = Duration::from_secs(config.scrape.timeout_secs);

        let fetcher = HttpFetcher::new(delay, timeout);
        let options = EnhanceOptions { force, team };
        let outcome = enhance_csv(&fetcher, input, output, &options)?;

        println!("\n{}", "=".repeat(80));
        println!("ENHANCEMENT COMPLETE");
        println!("{}", "=".repeat(80));
        println!("Input: {}", input);
        println!("Output: {}", output);
        println!("Players written: {}", outcome.rows_written);
        println!("Players enhanced: {}", outcome.rows_enhanced);
        println!("{}", "=".repeat(80));

        Ok(())
    }

    pub fn init(config_path: &str, force: bool) -> Result<()> {
        if std::path::Path::new(config_path).exists() && !force {
            return Err(FhockeyError::Config(format!(
                "{} already exists (use --force to overwrite)",
                config_path
            )));
        }

        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        // Create output directory
        std::fs::create_dir_all(&config.output.dir)?;
        println!("Created {} directory", config.output.dir);

        println!("\nNext steps:");
        println!("  1. Edit {} to adjust the season and delays", config_path);
        println!(
            "  2. List teams in {} (columns: school, org_id, url)",
            config.scrape.teams_csv
        );
        println!("  3. Run 'fhockey scrape' to collect rosters");

        Ok(())
    }
}
