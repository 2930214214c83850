use std::{fs::File, path::Path};

use anyhow::{Context, Result as AnyResult};
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Installs the global logger, honouring `RUST_LOG` when it is set.
///
/// Records go to `path` rather than stderr, which shares the terminal with
/// the game screen.
pub(crate) fn init(path: &Path) -> AnyResult<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let env = Env::default().default_filter_or(LevelFilter::Warn.to_string());
    let mut builder = Builder::from_env(env);
    let _ = builder.target(Target::Pipe(Box::new(file)));

    // A logger may already be installed; keep whichever came first.
    let _ = builder.try_init();
    Ok(())
}
