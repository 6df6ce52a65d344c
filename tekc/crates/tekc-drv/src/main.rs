use anyhow::Result;

use tekc_drv::Config;

fn run() -> Result<()> {
    let config = Config::from_args(std::env::args().skip(1))?;
    tekc_drv::run(&config)?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
