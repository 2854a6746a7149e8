//! Build script for tamara-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml and embeds it as `BOARD`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tamara_core::config::{BoardConfig, ConfigError, MAX_TICK_PERIOD_MS, MIN_TICK_PERIOD_MS};

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate board.toml
fn load_config() -> BoardConfig {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the tamara-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: BoardConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid board.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&describe(e))
        );
    }

    println!("cargo:warning=board.toml validated successfully");
    config
}

/// Human-readable validation failure
fn describe(error: ConfigError) -> String {
    match error {
        ConfigError::InvalidTickPeriod(period) => format!(
            "[control] tick_period_ms = {} is outside {}-{}",
            period, MIN_TICK_PERIOD_MS, MAX_TICK_PERIOD_MS
        ),
        ConfigError::InvalidCalibration => {
            "[touch] x_span and y_span must be non-zero".to_string()
        }
        other => format!("{:?}", other),
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `board_config.rs` with the parsed configuration as a constant
fn generate_config(config: &BoardConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let touch = &config.touch;

    let source = format!(
        "/// Board configuration compiled from board.toml\n\
        pub const BOARD: BoardConfig = BoardConfig {{\n    \
            control: ControlConfig {{ tick_period_ms: {} }},\n    \
            outputs: OutputConfig {{ active_low: {} }},\n    \
            touch: TouchCalibration {{\n        \
                x_offset: {},\n        \
                x_span: {},\n        \
                y_offset: {},\n        \
                y_span: {},\n        \
                swap_xy: {},\n        \
                invert_x: {},\n        \
                invert_y: {},\n        \
                pressure_threshold: {},\n    \
            }},\n\
        }};\n",
        config.control.tick_period_ms,
        config.outputs.active_low,
        touch.x_offset,
        touch.x_span,
        touch.y_offset,
        touch.y_span,
        touch.swap_xy,
        touch.invert_x,
        touch.invert_y,
        touch.pressure_threshold,
    );

    let mut f = File::create(out_dir.join("board_config.rs")).unwrap();
    f.write_all(source.as_bytes()).unwrap();
}
