use std::process::Command;

#[test]
fn neuro_sim_writes_best_genome() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let genome_path = dir.path().join("best.json");
    std::fs::write(&config_path, r#"{"population_size": 10, "layer_sizes": [5, 4, 2]}"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_neuro_sim"))
        .arg("--config")
        .arg(&config_path)
        .args(["--generations", "2", "--steps", "30", "--seed", "5", "--out"])
        .arg(&genome_path)
        .output()
        .expect("failed to run neuro_sim");
    assert!(
        output.status.success(),
        "neuro_sim failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let genome = neuro::Genome::from_json(&std::fs::read_to_string(&genome_path).unwrap()).unwrap();
    assert_eq!(genome.layer_sizes, vec![5, 4, 2]);
}

#[test]
fn neuro_sim_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, r#"{"layer_sizes": [5]}"#).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_neuro_sim"))
        .arg("--config")
        .arg(&config_path)
        .args(["--generations", "1"])
        .status()
        .expect("failed to run neuro_sim");
    assert!(!status.success());
}
