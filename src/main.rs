use anyhow::Result;
use clap::Parser;
use log::info;

use zsb_cli::category::CategoryMap;
use zsb_cli::cli::commands::{
    by_major::handle_by_major_command, by_undergraduate::handle_by_undergraduate_command,
    directory::handle_directory_command, import::handle_import_command,
    options::handle_options_command, plan::handle_plan_command, print_response,
    school_total::handle_school_total_command, search::handle_search_command,
    status::handle_status_command, subjects::handle_subjects_command,
};
use zsb_cli::cli::{Cli, Commands};
use zsb_cli::config::Config;
use zsb_cli::db;
use zsb_cli::resolver::{ApiResponse, Resolver};
use zsb_cli::store::SqliteStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to file so stdout stays pure JSON (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("zsb-cli.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    info!("Starting zsb-cli");

    let db_path = config.database_path(cli.database.as_ref())?;
    let pool = db::connect(&db_path).await?;
    db::run_migrations(&pool).await?;

    let resolver = Resolver::new(SqliteStore::new(pool), CategoryMap::builtin().clone());

    let result = match cli.command {
        Commands::Search(args) => handle_search_command(args, &resolver).await,
        Commands::ByMajor(args) => handle_by_major_command(args, &resolver).await,
        Commands::ByUndergraduate(args) => handle_by_undergraduate_command(args, &resolver).await,
        Commands::Directory(args) => {
            handle_directory_command(args, &resolver, config.default_query_limit).await
        }
        Commands::Plan(args) => {
            handle_plan_command(args, &resolver, config.default_query_limit).await
        }
        Commands::SchoolTotal(args) => handle_school_total_command(args, &resolver).await,
        Commands::Subjects(args) => handle_subjects_command(args, &resolver).await,
        Commands::Options => handle_options_command(&resolver).await,
        Commands::Import(args) => handle_import_command(args, &resolver).await,
        Commands::Status => handle_status_command(&resolver, &db_path).await,
    };

    // Failures are reported through the same envelope the queries use;
    // each invocation fails independently, none is fatal.
    if let Err(err) = result {
        log::error!("Command failed: {err:#}");
        print_response(&ApiResponse::error(format!("{err:#}")));
    }

    Ok(())
}
