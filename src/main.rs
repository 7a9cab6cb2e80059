use std::process::ExitCode;

use clap::Parser;

use popclock::cli::{app, config_cmd, Cli, Commands, Presenter};
use popclock::infrastructure::XdgConfigStore;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new(cli.verbose);

    let code = match cli.command {
        Commands::Tick => app::run_tick(&presenter).await,
        Commands::Wake => app::run_wake(&presenter).await,
        Commands::Play => app::run_play(&presenter).await,
        Commands::Pause { minutes, until } => app::run_pause(minutes, until, &presenter).await,
        Commands::Resume => app::run_resume(&presenter).await,
        Commands::Status => app::run_status(&presenter).await,
        Commands::Build => app::run_build(&presenter).await,
        Commands::Doctor => app::run_doctor(&presenter).await,
        Commands::Install { plist_path, force } => {
            app::run_install(plist_path, force, &presenter).await
        }
        Commands::Uninstall { plist_path } => {
            app::run_uninstall_cmd(plist_path, &presenter).await
        }
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            config_cmd::handle_config_command(action, &store, &presenter).await
        }
    };

    ExitCode::from(code)
}
