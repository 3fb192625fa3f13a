use finledger::{cli::run_cli, config::ConfigManager, utils::init_tracing};

fn main() {
    let config = match ConfigManager::from_env().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_filter);

    if let Err(err) = run_cli(config) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
