mod command;
mod planner;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
