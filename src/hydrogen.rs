use std::path::{ Path, PathBuf };
use anyhow::Context;
use clap::{ Args, Parser, Subcommand };
use log::{ info, LevelFilter };
use ndarray as nd;
use simplelog::{ ColorChoice, ConfigBuilder, TermLogger, TerminalMode };
use hshoot::{
    analytic,
    config::Config,
    model::Coulomb,
    search::{ self, AbortReason, Outcome },
    shoot::{ self, Grid },
};

/// Hydrogen bound-state energies by the shooting method.
#[derive(Parser)]
#[command(name = "hydrogen")]
struct Cli {
    /// TOML configuration file; missing values take reference defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Overrides {
    /// Angular quantum number.
    #[arg(short, long, global = true)]
    l: Option<u32>,

    /// Number of radial grid points.
    #[arg(long, global = true)]
    num_points: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Search for the lowest bound-state energies.
    Search {
        /// Number of levels to search for.
        #[arg(short, long)]
        num_levels: Option<usize>,

        /// Also write every level and its outcome to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Integrate once at a fixed trial energy and write the trajectory as CSV.
    Trajectory {
        /// Trial energy (eV).
        #[arg(short, long, allow_hyphen_values = true)]
        energy: f64,

        /// Output file.
        #[arg(short, long, default_value = "output/trajectory.csv")]
        output: PathBuf,
    },
    /// Sample the analytic radial wavefunctions on the grid and write them as
    /// CSV, one column per principal quantum number.
    ///
    /// The angular quantum number is taken from `-l` if given and is otherwise
    /// 2; the `l` of the config file does not apply here.
    Analytic {
        /// Largest principal quantum number.
        #[arg(short, long, default_value_t = 10)]
        n_max: usize,

        /// Output file.
        #[arg(short, long, default_value = "output/analytic.csv")]
        output: PathBuf,
    },
}

// angular quantum number plotted by `analytic` unless overridden
const ANALYTIC_L: u32 = 2;

fn analytic_l(overrides: &Overrides) -> u32 {
    overrides.l.unwrap_or(ANALYTIC_L)
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        .context("failed to initialize logger")
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(l) = cli.overrides.l { config.search.l = l; }
    if let Some(n) = cli.overrides.num_points { config.grid.num_points = n; }
    if let Command::Search { num_levels: Some(n), .. } = &cli.command {
        config.search.num_levels = *n;
    }
    config.validate()?;
    Ok(config)
}

fn csv_writer(path: &Path) -> anyhow::Result<csv::Writer<std::fs::File>> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    csv::Writer::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))
}

fn write_levels(path: &Path, spectrum: &search::Spectrum) -> anyhow::Result<()> {
    let mut writer = csv_writer(path)?;
    writer.write_record(["n", "l", "status", "energy_ev", "iters"])?;
    for level in spectrum.levels.iter() {
        let (status, energy, iters) = match level.outcome {
            Outcome::Accepted { energy, iters } => ("accepted", energy, iters),
            Outcome::Aborted(reason @ AbortReason::StepUnderflow { .. }) =>
                ("step_underflow", reason.energy(), reason.iters()),
            Outcome::Aborted(reason @ AbortReason::MaxIters { .. }) =>
                ("max_iters", reason.energy(), reason.iters()),
        };
        writer.write_record([
            level.n.to_string(),
            level.l.to_string(),
            status.to_string(),
            energy.to_string(),
            iters.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_columns(path: &Path, headers: &[String], cols: &[nd::ArrayView1<f64>])
    -> anyhow::Result<()>
{
    let mut writer = csv_writer(path)?;
    writer.write_record(headers)?;
    let n = cols.first().map(|col| col.len()).unwrap_or(0);
    for k in 0..n {
        writer.write_record(cols.iter().map(|col| col[k].to_string()))?;
    }
    writer.flush()?;
    info!("wrote {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let config = load_config(&cli)?;
    let grid = Grid::new(&config.grid)?;
    let model = Coulomb::new(config.constants);

    match &cli.command {
        Command::Search { csv: csv_path, .. } => {
            let spectrum = search::search_levels(
                &model, &grid, &config.constants, &config.search);
            println!("Energy eigenvalues for l = {} and n :", config.search.l);
            for (k, e) in spectrum.accepted() {
                println!("Eigenvalue {}: {} eV", k, e);
            }
            for level in spectrum.aborted() {
                if let Outcome::Aborted(reason) = level.outcome {
                    println!(
                        "n = {}: not converged after {} shots (stopped at {} eV)",
                        level.n, reason.iters(), reason.energy(),
                    );
                }
            }
            if let Some(path) = csv_path {
                write_levels(path, &spectrum)?;
                info!("wrote {}", path.display());
            }
        },
        Command::Trajectory { energy, output } => {
            let y0 = [config.search.psi_init, config.search.dpsi_init];
            let traj = shoot::shoot(&model, &grid, y0, *energy, config.search.l);
            match traj.node {
                Some(i) => {
                    info!("node at grid index {} (r = {:e} m)", i, traj.r[i]);
                    let rn = traj.node_radius()?.unwrap_or(traj.r[i]);
                    info!("interpolated node radius {:e} m", rn);
                },
                None => info!("no node; far-field psi = {:e}", traj.last_recorded()),
            }
            let headers: Vec<String>
                = ["r", "psi", "dpsi"].into_iter().map(String::from).collect();
            write_columns(
                output,
                &headers,
                &[traj.r.view(), traj.psi.view(), traj.dpsi.view()],
            )?;
        },
        Command::Analytic { n_max, output } => {
            let l = analytic_l(&cli.overrides);
            info!("sampling analytic wavefunctions for l = {}", l);
            let wfs = analytic::hydrogen_wfs(*n_max, l, &grid);
            let headers: Vec<String>
                = std::iter::once("r".to_string())
                .chain((1..=*n_max).map(|n| format!("n={}", n)))
                .collect();
            let cols: Vec<nd::ArrayView1<f64>>
                = std::iter::once(grid.get_r().view())
                .chain(wfs.outer_iter())
                .collect();
            write_columns(output, &headers, &cols)?;
        },
    }
    Ok(())
}
