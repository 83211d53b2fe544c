use weld::config::Config;

fn main() -> anyhow::Result<()> {
    weld::app::run(Config::default())
}
