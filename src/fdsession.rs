use fdsession::config::Options;
use fdsession::logger::Logger;
use fdsession::run_scenario;
use fdsession::utils::{DEFAULT_PATH, DEMO_PAYLOAD};
use log::LevelFilter;
use std::path::PathBuf;

fn main() {
    let opt = Options::from_env();
    let logger = Logger::init().add_file(&opt.log_path, true);
    if opt.level >= LevelFilter::Debug {
        logger.add_console();
    }
    log::set_max_level(opt.level);

    if std::env::args().len() > 2 {
        eprintln!("{} [path]", std::env::args().next().unwrap_or_default());
        std::process::exit(1);
    }
    let path = PathBuf::from(std::env::args().nth(1).unwrap_or(DEFAULT_PATH.to_string()));

    match run_scenario(&path, DEMO_PAYLOAD, &opt) {
        Err(e) => {
            log::error!("{} on {} fail, error {}", e.op(), path.display(), e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(data) => {
            log::info!("read back {} bytes from {}", data.len(), path.display());
            println!("{}", String::from_utf8_lossy(&data));
        }
    }
}
