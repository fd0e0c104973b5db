#[macro_use] extern crate clap;

pub mod graphics;
pub mod interface;
pub mod report;

use std::process;

use log::{debug, error, info};

use shading::{load_or_empty, FileSource, ShaderProgram, StageSource};

use graphics::HeadlessContext;
use interface::cli::{cli_main, CliError, Config};

const EXIT_BUILD_FAILED: i32 = 1;
const EXIT_BAD_ARGUMENTS: i32 = 2;
const EXIT_NO_CONTEXT: i32 = 3;

fn init_logging(config: &Config) {
    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();
}

fn run(config: &Config) -> i32 {
    let files = FileSource::new();
    let texts: Vec<String> = config
        .shaders
        .iter()
        .map(|(_, path)| load_or_empty(&files, &path.to_string_lossy()))
        .collect();

    let context = match HeadlessContext::create(config.gl_version) {
        Ok(context) => context,
        Err(e) => {
            error!("{}", e);
            return EXIT_NO_CONTEXT;
        }
    };
    info!("{}", context.description());

    let stages: Vec<StageSource> = config
        .shaders
        .iter()
        .zip(&texts)
        .map(|((kind, _), text)| StageSource::new(*kind, text))
        .collect();

    let mut program = ShaderProgram::new(context.driver());
    match program.build_stages(&stages) {
        Ok(handle) => {
            program.set_used();
            debug!("program {} is active", handle.id());
            println!("{}", report::success(handle, program.attached_stages()));
            0
        }
        Err(e) => {
            eprint!("{}", report::failure(&e, &config.shaders));
            EXIT_BUILD_FAILED
        }
    }
}

fn main() {
    let config = match cli_main() {
        Ok(config) => config,
        Err(CliError::Args(e)) => e.exit(),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(EXIT_BAD_ARGUMENTS);
        }
    };

    init_logging(&config);
    process::exit(run(&config));
}
