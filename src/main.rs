use clap::{App, Arg, ArgMatches};
use log::{debug, error};
use markblog::build::{build_site, Error};
use markblog::config::{parse_threads, Config};
use markblog::logging::init_logging;
use std::path::Path;

fn main() {
    let matches = App::new("markblog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds a static blog from date-prefixed Markdown files")
        .arg(
            Arg::with_name("env-file")
                .long("env-file")
                .value_name("PATH")
                .takes_value(true)
                .help("Loads configuration from this dotenv file instead of ./.env"),
        )
        .arg(
            Arg::with_name("threads")
                .short("j")
                .long("threads")
                .value_name("N")
                .takes_value(true)
                .help("Number of worker threads used to parse articles (default: 1)"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Logs per-file detail and full error causes"),
        )
        .get_matches();

    init_logging(matches.is_present("verbose"));

    if let Err(e) = run(&matches) {
        error!("{}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            debug!("caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let threads = match matches.value_of("threads") {
        Some(value) => Some(parse_threads(value)?),
        None => None,
    };
    let config = Config::from_env(matches.value_of("env-file").map(Path::new), threads)?;
    build_site(&config)?;
    Ok(())
}
