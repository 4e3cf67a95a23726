//! rightturn demo - entry point

use rightturn::Args;

fn main() -> anyhow::Result<()> {
    let code = rightturn_demo::run(Args::from_env())?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
