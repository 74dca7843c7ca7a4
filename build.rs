use anyhow::{bail, Result};
use bootgate_config::{board::Board, codegen::generate_modules, ensure_feature_flags, Configuration};
use std::{
    env,
    fs::File,
    io::{BufReader, Read},
    path::PathBuf,
};

fn main() -> Result<()> {
    match selected_board() {
        Some(board) => process_configuration_file(board),
        None if env::var("CARGO_FEATURE_NRF51").is_ok() => {
            bail!("The `nrf51` feature needs a board feature: one of arch_ble, ble_smurfs, grove_node.")
        }
        // Host builds (unit tests, docs) need no generated code.
        None => Ok(()),
    }
}

fn selected_board() -> Option<Board> {
    Board::boards().find(|board| {
        env::var(format!("CARGO_FEATURE_{}", board.feature_name().to_uppercase())).is_ok()
    })
}

fn process_configuration_file(board: Board) -> Result<()> {
    println!("cargo:rerun-if-env-changed=BOOTGATE_CONFIG");

    let filename = if let Ok(filename) = env::var("BOOTGATE_CONFIG") {
        filename
    } else {
        format!("./bootgate_config/sample_configurations/{}", board.sample_configuration())
    };
    println!("cargo:rerun-if-changed={}", filename);

    let file = File::open(&filename)?;
    let mut buf_reader = BufReader::new(file);
    let mut contents = String::new();
    buf_reader.read_to_string(&mut contents)?;
    let configuration: Configuration = ron::from_str(&contents)?;
    configuration.validate()?;

    let supplied_flags: Vec<String> = env::vars()
        .filter_map(|(k, _)| Some(k.strip_prefix("CARGO_FEATURE_")?.to_lowercase()))
        .collect();
    ensure_feature_flags(&configuration, supplied_flags.iter().map(String::as_str))?;

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    generate_modules(&out_dir, &configuration)?;

    // Let cortex-m-rt's link.x find the generated memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    Ok(())
}
