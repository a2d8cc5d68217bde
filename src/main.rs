use artist_rename::config::{self, RenameConfig};
use artist_rename::{Renamer, output};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Flags shared by commands that walk the tree.
#[derive(clap::Args, Clone)]
struct RunArgs {
    /// Known artist folder name (repeatable; adds to the config file list)
    #[arg(long = "artist", value_name = "NAME")]
    artists: Vec<String>,

    /// Artist used when no folder name matches
    #[arg(long, value_name = "NAME")]
    default_artist: Option<String>,

    /// Deepest folder level to process below the root (0 = immediate subfolders only)
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ARTIST_RENAME_ON_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("ARTIST_RENAME_GIT_HASH");
        if hash.is_empty() {
            concat!(env!("CARGO_PKG_VERSION"), "-dev")
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "artist-rename")]
#[command(about = "Rename image files to <artist>_<project>_<NN>.<ext>")]
#[command(long_about = "\
Rename image files to <artist>_<project>_<NN>.<ext>

Every subfolder below the root is processed. The artist is the first folder
name on the path that matches a known artist (or the default artist); the
project is the name of the folder holding the images.

  art/                              --root art --artist Alice
  ├── Alice/
  │   └── Sketchbook/
  │       ├── IMG_0001.JPG   →   Alice_Sketchbook_01.JPG
  │       └── scan-002.png   →   Alice_Sketchbook_02.png
  ├── cover.jpg                  (root images are left alone)
  └── .thumbs/                   (hidden folders are skipped)

Files already named for their folder are skipped, so re-running is safe.
Taken names get a random 8-character suffix instead of being overwritten.

Settings can live in <root>/artist-rename.toml; run 'artist-rename gen-config'
for a documented template.")]
#[command(version = version_string())]
struct Cli {
    /// Root folder to walk
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (default: <root>/artist-rename.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show what would be renamed without touching any file
    Plan(RunArgs),
    /// Rename image files across the tree
    Rename {
        #[command(flatten)]
        run: RunArgs,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Print a stock artist-rename.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Plan(run) => {
            let config = load_run_config(&cli.root, cli.config.as_deref(), &run)?;
            if !run.json {
                print_settings(&cli.root, &config);
            }
            run_walk(&cli.root, config, run.json, true)?;
        }
        Command::Rename { run, yes } => {
            let config = load_run_config(&cli.root, cli.config.as_deref(), &run)?;
            // Keep unattended JSON runs machine-readable.
            if !(run.json && yes) {
                print_settings(&cli.root, &config);
            }
            if !yes && !confirm()? {
                println!("Operation cancelled.");
                return Ok(());
            }
            run_walk(&cli.root, config, run.json, false)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file for `root` and apply command-line overrides.
fn load_run_config(
    root: &Path,
    file: Option<&Path>,
    run: &RunArgs,
) -> Result<RenameConfig, config::ConfigError> {
    config::load_config(root, file)?
        .with_overrides(&run.artists, run.default_artist.as_deref(), run.max_depth)
        .validate()
}

fn print_settings(root: &Path, config: &RenameConfig) {
    if config.artists.is_empty() {
        println!("Warning: No artist folders specified.");
    } else {
        println!("Artist folders to look for: {}", config.artists.join(", "));
    }
    println!("Will process image files in: {}", root.display());
    println!(
        "Default artist (if none detected): {}",
        config.default_artist.as_deref().unwrap_or("None")
    );
    match config.max_depth {
        Some(depth) => println!("Maximum folder depth: {}", depth),
        None => println!("Maximum folder depth: Unlimited"),
    }
}

/// Ask before renaming. Anything but `y` cancels.
fn confirm() -> io::Result<bool> {
    println!();
    println!("WARNING: This will rename multiple files across multiple folders!");
    print!("Proceed? (y/n): ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Walk the tree, streaming events to a printer thread.
fn run_walk(
    root: &Path,
    config: RenameConfig,
    json: bool,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_event(&event, json);
        }
    });

    let total = Renamer::new(config)
        .dry_run(dry_run)
        .with_events(tx)
        .walk(root);

    // The renamer (and its sender) is gone, so the printer drains and exits.
    printer
        .join()
        .map_err(|_| io::Error::other("output thread panicked"))?;

    if !json {
        output::print_summary(&total, dry_run);
    }
    Ok(())
}
