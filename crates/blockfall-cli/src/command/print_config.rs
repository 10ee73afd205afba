use std::io;

use blockfall_engine::GameConfig;

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PrintConfigArg {}

pub(crate) fn run(PrintConfigArg {}: &PrintConfigArg) -> anyhow::Result<()> {
    util::write_json_pretty(&mut io::stdout().lock(), "stdout", &GameConfig::default())
}
