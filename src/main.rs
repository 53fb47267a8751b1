use anyhow::Result;

use bc_group_export::config::Config;
use bc_group_export::run;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cfg = Config::from_env()?;
    run::run(&cfg)
}
