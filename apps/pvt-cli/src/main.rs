use clap::{Parser, Subcommand, ValueEnum};
use pvt_eval::{EvalError, FluidReference};
use pvt_fluids::canned::pseudo_water;
use pvt_fluids::{CoolPropOracle, PropertyOracle, Quantity, Species, parse_quantity};
use pvt_scene::{SceneConfig, SceneData, SceneError, build_timeline, load_yaml, save_yaml};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "pvt-cli")]
#[command(about = "Pressure-volume diagram of a real fluid vs. an ideal gas", long_about = None)]
struct Cli {
    /// Scene configuration YAML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fluid override (e.g. water, CO2, R134a)
    #[arg(long, global = true)]
    fluid: Option<String>,

    /// Isotherm temperature override with unit (e.g. "300 C", "573.15 K")
    #[arg(long, global = true)]
    isotherm: Option<String>,

    /// Pressure axis tick step with unit (e.g. "5 MPa"); the axis top rounds up to it
    #[arg(long, global = true)]
    pressure_step: Option<String>,

    /// Answer property queries from the built-in analytic water dome instead of CoolProp
    #[arg(long, global = true)]
    offline: bool,

    /// Debug-level logging unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fluid reference constants
    Constants {
        #[arg(long)]
        json: bool,
    },
    /// Export the sampled dome and isotherms
    Curves {
        #[arg(long, value_enum, default_value_t = CurveFormat::Csv)]
        format: CurveFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the timed steps of the scene
    Script,
    /// Dump the visible scene at a time as JSON
    Frame {
        /// Time in seconds from the start of the scene
        time: f64,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the effective configuration to a YAML file
    InitConfig {
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CurveFormat {
    Csv,
    Json,
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "pvt_cli=debug,pvt_scene=debug,pvt_eval=debug,info"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Data goes to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = resolve_config(&cli)?;
    let oracle = make_oracle(cli.offline);
    info!(oracle = oracle.name(), fluid = %config.fluid, "configuration resolved");

    match cli.command {
        Commands::Constants { json } => cmd_constants(oracle.as_ref(), &config, json),
        Commands::Curves { format, output } => {
            cmd_curves(oracle.as_ref(), &config, format, output.as_deref())
        }
        Commands::Script => cmd_script(oracle.as_ref(), &config),
        Commands::Frame { time, output } => {
            cmd_frame(oracle.as_ref(), &config, time, output.as_deref())
        }
        Commands::InitConfig { path } => cmd_init_config(&config, &path),
    }
}

fn resolve_config(cli: &Cli) -> CliResult<SceneConfig> {
    let mut config = match &cli.config {
        Some(path) => load_yaml(path)?,
        None => SceneConfig::default(),
    };

    if let Some(fluid) = &cli.fluid {
        let species = fluid
            .parse::<Species>()
            .map_err(|e| CliError::InvalidInput(format!("fluid '{fluid}': {e}")))?;
        config.set_fluid(species);
    }
    if let Some(text) = &cli.isotherm {
        config.isotherm_temperature_k = parse_quantity(text, Quantity::Temperature)
            .map_err(|e| CliError::InvalidInput(format!("isotherm '{text}': {e}")))?;
    }
    if let Some(text) = &cli.pressure_step {
        config.axes.pressure_step_pa = parse_quantity(text, Quantity::Pressure)
            .map_err(|e| CliError::InvalidInput(format!("pressure step '{text}': {e}")))?;
    }

    config.validate()?;
    Ok(config)
}

fn make_oracle(offline: bool) -> Box<dyn PropertyOracle> {
    if offline {
        Box::new(pseudo_water::oracle())
    } else {
        Box::new(CoolPropOracle::new())
    }
}

fn write_output(content: &str, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("✓ Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn cmd_constants(oracle: &dyn PropertyOracle, config: &SceneConfig, json: bool) -> CliResult<()> {
    let reference = FluidReference::from_oracle(oracle, config.fluid, &config.reference)?;
    if json {
        let content = serde_json::to_string_pretty(&reference)?;
        return write_output(&(content + "\n"), None);
    }

    println!("Fluid: {}", reference.species().display_name());
    println!("  pmin  = {:.6e} Pa", reference.p_min_pa());
    println!("  pmax  = {:.6e} Pa (critical)", reference.p_max_pa());
    println!("  Tcrit = {:.3} K", reference.t_crit_k());
    println!("  vmin  = {:.6e} m³/kg", reference.v_min());
    println!("  vcrit = {:.6e} m³/kg", reference.v_crit());
    println!("  vmax  = {:.6e} m³/kg", reference.v_max());
    println!("  R     = {:.4} J/(kg·K)", reference.r_specific());
    Ok(())
}

fn curves_csv(data: &SceneData) -> String {
    let mut csv = String::from("group,curve,x,pressure_pa\n");
    let groups = [
        ("dome_v", &data.dome[..]),
        ("real_isotherm_log_v", &data.isotherm[..]),
        ("ideal_isotherm_log_v", std::slice::from_ref(&data.ideal)),
    ];
    for (group, curves) in groups {
        for curve in curves {
            for [x, p] in &curve.points {
                csv.push_str(&format!("{},{},{},{}\n", group, curve.label, x, p));
            }
        }
    }
    csv
}

fn cmd_curves(
    oracle: &dyn PropertyOracle,
    config: &SceneConfig,
    format: CurveFormat,
    output: Option<&Path>,
) -> CliResult<()> {
    let data = SceneData::build(oracle, config)?;
    let content = match format {
        CurveFormat::Csv => curves_csv(&data),
        CurveFormat::Json => serde_json::to_string_pretty(&data)? + "\n",
    };
    write_output(&content, output)
}

fn cmd_script(oracle: &dyn PropertyOracle, config: &SceneConfig) -> CliResult<()> {
    let timeline = build_timeline(oracle, config)?;
    println!("{:>7}  {:>6}  step", "start", "dur");
    for (start, step) in timeline.steps() {
        println!("{:>7.2}  {:>6.2}  {}", start, step.duration, step.label);
    }
    println!("Total: {:.2} s", timeline.duration());
    Ok(())
}

fn cmd_frame(
    oracle: &dyn PropertyOracle,
    config: &SceneConfig,
    time: f64,
    output: Option<&Path>,
) -> CliResult<()> {
    if !time.is_finite() {
        return Err(CliError::InvalidInput(format!("frame time {time}")));
    }
    let timeline = build_timeline(oracle, config)?;
    let frame = timeline.frame_at(time);
    let content = serde_json::to_string_pretty(&frame)? + "\n";
    write_output(&content, output)
}

fn cmd_init_config(config: &SceneConfig, path: &Path) -> CliResult<()> {
    save_yaml(path, config)?;
    println!("✓ Wrote configuration to {}", path.display());
    Ok(())
}
