use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = stage_todos::cli::parse();
    app::run(args)
}
