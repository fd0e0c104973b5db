use std::ffi::OsString;
use std::path::PathBuf;

use clap::{App, ArgMatches};
use log::LevelFilter;

use shading::StageKind;

/// Everything the command line configures.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub shaders: Vec<(StageKind, PathBuf)>,
    pub gl_version: (u8, u8),
    pub verbosity: u64,
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Args(#[from] clap::Error),
    #[error("can't tell which stage {} is for; use a .vert, .frag, .geom or .comp extension", .0.display())]
    UnknownStage(PathBuf),
    #[error("\"{0}\" is not an OpenGL version; expected MAJOR.MINOR, e.g. 3.3")]
    BadVersion(String),
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, CliError> {
        let shaders = matches
            .values_of("SHADERS")
            .into_iter()
            .flatten()
            .map(|path| {
                let path = PathBuf::from(path);
                match StageKind::from_path(&path) {
                    Some(kind) => Ok((kind, path)),
                    None => Err(CliError::UnknownStage(path)),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let gl_version = parse_version(matches.value_of("gl-version").unwrap_or("3.3"))?;

        Ok(Self {
            shaders,
            gl_version,
            verbosity: matches.occurrences_of("verbose"),
        })
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_version(text: &str) -> Result<(u8, u8), CliError> {
    let bad = || CliError::BadVersion(text.to_string());

    let mut parts = text.trim().splitn(2, '.');
    let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;
    let minor = parts.next().and_then(|p| p.parse().ok()).ok_or_else(bad)?;

    Ok((major, minor))
}

/// Parses `args` (program name first) against the definition in `cli.yaml`.
pub fn parse_args<I, T>(args: I) -> Result<Config, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let yaml = load_yaml!("cli.yaml");
    let matches = App::from_yaml(yaml)
        .version(crate_version!())
        .get_matches_from_safe(args)?;

    Config::from_matches(&matches)
}

pub fn cli_main() -> Result<Config, CliError> {
    parse_args(std::env::args_os())
}
