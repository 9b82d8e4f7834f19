use env_logger::{Builder, Env};
use std::io::Write;

/// Initialises the global logger. The default level is `info`, or `debug`
/// when `verbose` is set; `RUST_LOG` takes precedence over both.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let logging_env = Env::default().filter_or("RUST_LOG", default_level);
    Builder::from_env(logging_env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{:<5} {} {}",
                record.level(),
                record.target().trim_start_matches("markblog::"),
                record.args()
            )
        })
        .init();
}
