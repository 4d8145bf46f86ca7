use std::path::PathBuf;
use std::process::Command;

use anyhow::Result;

fn run_cli(out_dir: &PathBuf, tag: &str, seed: &str) -> Result<(String, String)> {
    let cli_path = env!("CARGO_BIN_EXE_peakrando-cli");
    let options_path = out_dir.join("options.json");
    std::fs::write(
        &options_path,
        r#"{"goal": "reach_peak", "ascent_count": 6, "trap_percentage": 35, "poison_trap_weight": "high"}"#,
    )?;
    let slot_data_path = out_dir.join(format!("slot_data_{tag}.json"));
    let spoiler_path = out_dir.join(format!("spoiler_{tag}.json"));
    let status = Command::new(cli_path)
        .arg("--options")
        .arg(&options_path)
        .args(["--random-seed", seed, "--player-name", "Scout"])
        .arg("--output-slot-data")
        .arg(&slot_data_path)
        .arg("--output-spoiler-log")
        .arg(&spoiler_path)
        .status()?;
    assert!(status.success());
    Ok((
        std::fs::read_to_string(slot_data_path)?,
        std::fs::read_to_string(spoiler_path)?,
    ))
}

/// Given the same options and seed, the CLI must produce identical slot data
/// and spoiler logs.
#[test]
fn consistency_test() -> Result<()> {
    let out_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("peakrando_consistency");
    std::fs::create_dir_all(&out_dir)?;

    let (slot_data1, spoiler1) = run_cli(&out_dir, "1", "12345")?;
    let (slot_data2, spoiler2) = run_cli(&out_dir, "2", "12345")?;
    assert_eq!(slot_data1, slot_data2);
    assert_eq!(spoiler1, spoiler2);

    let spoiler: serde_json::Value = serde_json::from_str(&spoiler1)?;
    assert_eq!(spoiler["seed"], 12345);
    assert_eq!(spoiler["player_name"], "Scout");
    assert_eq!(spoiler["goal_reachable"], true);
    assert_eq!(spoiler["completion_rule"], "Ascent 6 Completed");

    let slot_data: serde_json::Value = serde_json::from_str(&slot_data1)?;
    assert_eq!(slot_data["ascent_count"], 6);
    assert_eq!(slot_data["trap_weights"]["Poison Trap"], 4);
    Ok(())
}
