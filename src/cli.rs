use lexopt::{Arg, Parser};
use std::path::PathBuf;

/// What the program was asked to do on the command line
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Arguments {
    Run {
        /// Configuration file given with `--config`, which must then exist
        config: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Arguments {
    pub(crate) fn from_env() -> anyhow::Result<Arguments> {
        Arguments::from_parser(Parser::from_env())
    }

    fn from_parser(mut parser: Parser) -> anyhow::Result<Arguments> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected().into()),
            }
        }
        Ok(Arguments::Run { config })
    }

    pub(crate) fn usage() -> String {
        format!(
            "Usage: {} [-c|--config <path>]\n\
             \n\
             Play snake on a grid in your terminal\n\
             \n\
             Options:\n\
             \x20 -c, --config <path>  Read configuration from the given file\n\
             \x20 -h, --help           Display this help message and exit\n\
             \x20 -V, --version        Show the program version and exit",
            env!("CARGO_PKG_NAME")
        )
    }
}
