mod json;

use anyhow::Result;

use crate::cli::Args;
use crate::i18n::Catalog;

pub fn run_non_interactive(args: &Args, catalog: &Catalog) -> Result<()> {
    json::run(args, catalog)
}
