use std::path::PathBuf;

use gridsurge_engine::EngineConfig;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowConfigArg {
    /// File to write the settings to; stdout when omitted
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(config: &EngineConfig, arg: &ShowConfigArg) -> anyhow::Result<()> {
    let ShowConfigArg { output } = arg;
    Output::save_json(config, output.clone())
}
