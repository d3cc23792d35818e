//! SVG in CSS CLI - file system bridge for the engine
//!
//! Commands: css, export-config, validate, import, extract
//! Prints CSS or JSON to stdout
//! Returns 2 on validation failure

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use svgincss_core::{
    config::{self, CONFIG_FILE_NAME},
    AppState, PrefixIds, Settings, StateError,
};

#[derive(Parser)]
#[command(name = "svgincss-cli")]
#[command(about = "SVG in CSS - embed SVG icons in CSS with URL encoding and masks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print CSS for a set of SVG files
    Css {
        #[command(flatten)]
        upload: UploadArgs,
    },

    /// Print or write the config.json for a set of SVG files
    ExportConfig {
        #[command(flatten)]
        upload: UploadArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a config.json without importing it
    Validate {
        /// Config file
        config_file: PathBuf,
    },

    /// Import a config.json and print the regenerated CSS
    Import {
        /// Config file
        config_file: PathBuf,
    },

    /// Write every original SVG from a config.json into a directory
    Extract {
        /// Config file
        config_file: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Args)]
struct UploadArgs {
    /// SVG files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Class name prefix
    #[arg(long, default_value = "icon")]
    prefix: String,

    /// Icon size, e.g. 1em, 24px or 24x16
    #[arg(long, default_value = "1em")]
    size: String,

    /// Embed the original markup instead of the optimized one
    #[arg(long)]
    no_svgo: bool,

    /// Omit -webkit- prefixed mask declarations
    #[arg(long)]
    no_webkit_prefix: bool,

    /// Target the ::before pseudo-element
    #[arg(long)]
    before: bool,

    /// Preview color stored in the config
    #[arg(long, default_value = "#000000")]
    preview_color: String,

    /// Sort icons alphabetically
    #[arg(long)]
    sort: bool,
}

impl UploadArgs {
    fn settings(&self) -> Settings {
        Settings {
            prefix: self.prefix.clone(),
            size: self.size.clone(),
            enable_svgo: !self.no_svgo,
            enable_webkit_prefix: !self.no_webkit_prefix,
            enable_before_pseudo: self.before,
            preview_color: self.preview_color.clone(),
            ..Settings::default()
        }
    }

    fn load(&self) -> Result<AppState, String> {
        // `--no-svgo` only picks the embedded variant; both are always stored.
        let mut state = AppState::with_settings(self.settings());

        for path in &self.files {
            if path.extension().map_or(true, |e| e != "svg") {
                log::warn!("skipping {}: not an .svg file", path.display());
                continue;
            }
            let markup = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            state
                .upload(&file_name, &markup, &PrefixIds)
                .map_err(|e| format!("{}: {}", path.display(), e))?;
        }

        if self.sort {
            state.sort_alphabetically();
        }
        Ok(state)
    }
}

fn read_state(path: &Path) -> Result<AppState, StateError> {
    let text = fs::read_to_string(path).map_err(config::ConfigError::from)?;
    let mut state = AppState::new();
    state.import_config(&text)?;
    Ok(state)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Css { upload } => match upload.load() {
            Ok(state) => {
                print!("{}", state.css());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },

        Commands::ExportConfig { upload, output } => {
            let state = match upload.load() {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}", e);
                    return ExitCode::FAILURE;
                }
            };
            let content = match state.export_config() {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{}", e);
                    return ExitCode::FAILURE;
                }
            };

            match output {
                Some(path) => {
                    let path = if path.is_dir() { path.join(CONFIG_FILE_NAME) } else { path };
                    if let Err(e) = fs::write(&path, content) {
                        eprintln!("Failed to write {}: {}", path.display(), e);
                        return ExitCode::FAILURE;
                    }
                    ExitCode::SUCCESS
                }
                None => {
                    println!("{}", content);
                    ExitCode::SUCCESS
                }
            }
        }

        Commands::Validate { config_file } => {
            let result = fs::read_to_string(&config_file)
                .map_err(config::ConfigError::from)
                .and_then(|text| Ok(serde_json::from_str::<serde_json::Value>(&text)?))
                .and_then(|doc| config::validate(&doc));

            let output = match &result {
                Ok(()) => serde_json::json!({ "valid": true, "error": null }),
                Err(e) => serde_json::json!({ "valid": false, "error": e.to_string() }),
            };
            println!("{}", output);

            if result.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2) // Validation failure
            }
        }

        Commands::Import { config_file } => match read_state(&config_file) {
            Ok(state) => {
                print!("{}", state.css());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::from(2)
            }
        },

        Commands::Extract { config_file, dir } => {
            let state = match read_state(&config_file) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}", e);
                    return ExitCode::from(2);
                }
            };

            match config::write_svg_files(&dir, state.assets()) {
                Ok(paths) => {
                    for path in paths {
                        println!("{}", path.display());
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
