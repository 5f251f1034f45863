use std::io::{self, Write as _};

use clap::Parser;
use omaze::{
    core::Error,
    logging,
    maze::{Addressing, ExitMode},
    settings::Settings,
};

#[derive(Parser, Debug)]
#[clap(version, about, name = "omaze")]
struct Args {
    #[clap(short, long, help = "Number of grid rows, outline included")]
    rows: Option<usize>,
    #[clap(short, long, help = "Number of grid columns, outline included")]
    cols: Option<usize>,
    #[clap(short, long, help = "Seed for the random carve")]
    seed: Option<u64>,
    #[clap(long, action, help = "Always carve the first candidate wall")]
    no_rng: bool,
    #[clap(short, long, action, help = "Wrap coordinates around the grid edges")]
    wrap: bool,
    #[clap(
        long,
        action,
        conflicts_with = "no_exit",
        help = "Carve the exit before generating, it may end up unreachable"
    )]
    seed_exit: bool,
    #[clap(long, action, help = "Leave the maze without an exit")]
    no_exit: bool,
    #[clap(short = 'n', long, help = "Number of mazes to generate")]
    count: Option<usize>,
    #[clap(long, action, help = "Color walls and outline")]
    color: bool,
    #[clap(long, help = "Settings in RON format, override the defaults")]
    settings: Option<String>,
    #[clap(long, action, help = "Show effective settings in RON format and quit")]
    debug_config: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "Log more, can be repeated")]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> Settings {
        let mut settings = Settings::new();
        settings.rows = self.rows;
        settings.cols = self.cols;
        settings.seed = self.seed;
        settings.count = self.count;

        if self.no_rng {
            settings = settings.set_no_rng(true);
        }
        if self.wrap {
            settings = settings.set_addressing(Addressing::Wrap);
        }
        if self.seed_exit {
            settings = settings.set_exit(ExitMode::PreSeeded);
        }
        if self.no_exit {
            settings = settings.set_exit(ExitMode::None);
        }
        if self.color {
            settings = settings.set_color(true);
        }

        settings
    }
}

fn main() -> Result<(), Error> {
    better_panic::install();

    let args = Args::parse();
    logging::init(logging::level_from_verbosity(args.verbose));

    let mut settings = Settings::load_default()?;
    if let Some(text) = &args.settings {
        settings = settings.merge(Settings::from_ron(text)?);
    }
    let settings = settings.merge(args.overrides());

    if args.debug_config {
        println!("{}", settings.to_ron()?);
        return Ok(());
    }

    let mazes = settings.maze_spec().build_many(
        settings.get_count(),
        settings.get_seed(),
        settings.get_no_rng(),
    )?;

    let printer = settings.printer();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, maze) in mazes.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        printer.print(maze, &mut out)?;
    }
    out.flush()?;

    Ok(())
}
