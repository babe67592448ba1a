use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rayon::prelude::*;

use filmcam::{
    BeautyLevel, CaptureOutcome, CardLabel, FilterPreset, GradingConfig, Settings,
    grading::catalog::{grain_amplitude, recipe_for},
};

#[derive(Parser, Debug)]
#[command(name = "filmcam", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Develop still images into graded JPEG prints.
    Grade(GradeArgs),
    /// Export a print onto a captioned instant-film card (PNG).
    Card(CardArgs),
    /// List the filter presets.
    Presets,
}

#[derive(Parser, Debug)]
struct GradeArgs {
    /// Input images (any format the decoder understands).
    #[arg(long = "in", required = true, num_args = 1..)]
    in_paths: Vec<PathBuf>,

    /// Output directory for `<stem>.jpg` prints.
    #[arg(long)]
    out_dir: PathBuf,

    /// Filter preset id (e.g. `retro_noir`). Overrides the settings file.
    #[arg(long)]
    filter: Option<FilterPreset>,

    /// Beauty level 0-100. Overrides the settings file.
    #[arg(long)]
    beauty: Option<u8>,

    /// Fixed grain seed for reproducible prints.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Develop files in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Parser, Debug)]
struct CardArgs {
    /// Input JPEG print.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Caption text. Defaults to the placeholder caption from the settings.
    #[arg(long)]
    caption: Option<String>,

    /// Optional footer line under the caption.
    #[arg(long)]
    footer: Option<String>,

    /// Settings JSON (card template).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("filmcam=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Grade(args) => cmd_grade(args),
        Command::Card(args) => cmd_card(args),
        Command::Presets => cmd_presets(),
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(p) => Settings::from_path(p).with_context(|| format!("load settings '{}'", p.display())),
        None => Ok(Settings::default()),
    }
}

fn cmd_grade(args: GradeArgs) -> anyhow::Result<()> {
    let settings = load_settings(args.config.as_deref())?;
    let mut config = settings.grading;
    if let Some(filter) = args.filter {
        config.filter = filter;
    }
    if let Some(beauty) = args.beauty {
        config.beauty_level = BeautyLevel::new(beauty);
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let develop = |path: &PathBuf| {
        develop_file(path, &args.out_dir, config, &settings, args.seed)
    };
    let results: Vec<anyhow::Result<PathBuf>> = if args.parallel {
        args.in_paths.par_iter().map(develop).collect()
    } else {
        args.in_paths.iter().map(develop).collect()
    };

    for res in results {
        let out = res?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn develop_file(
    in_path: &Path,
    out_dir: &Path,
    config: GradingConfig,
    settings: &Settings,
    seed: Option<u64>,
) -> anyhow::Result<PathBuf> {
    let bytes =
        std::fs::read(in_path).with_context(|| format!("read image '{}'", in_path.display()))?;

    let mut shutter = settings.shutter();
    if let Some(seed) = seed {
        shutter = shutter.with_seed(seed);
    }
    let outcome = shutter.capture(&bytes, config)?;
    if let CaptureOutcome::PassThrough(_) = &outcome {
        tracing::warn!(path = %in_path.display(), "input not developed, copied unchanged");
    }

    let stem = in_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "print".to_string());
    let out_path = out_dir.join(format!("{stem}.jpg"));
    std::fs::write(&out_path, outcome.into_bytes())
        .with_context(|| format!("write print '{}'", out_path.display()))?;
    Ok(out_path)
}

fn cmd_card(args: CardArgs) -> anyhow::Result<()> {
    let settings = load_settings(args.config.as_deref())?;
    let jpeg = std::fs::read(&args.in_path)
        .with_context(|| format!("read print '{}'", args.in_path.display()))?;

    let caption = args
        .caption
        .unwrap_or_else(|| settings.caption_for(None, &jpeg));
    let label = CardLabel {
        caption,
        footer: args.footer,
    };
    let png = filmcam::export_card(&jpeg, &label, &settings.card)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for preset in FilterPreset::ALL {
        let recipe = recipe_for(preset);
        println!(
            "{:<18} {:<14} grain={:<3} tints={}",
            preset.id(),
            preset.label(),
            grain_amplitude(preset),
            recipe.tints.len()
        );
    }
    Ok(())
}
