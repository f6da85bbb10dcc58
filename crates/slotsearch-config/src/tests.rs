//! Tests for search configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        move_thread_count = "none"

        [instance]
        slot_count = 4
        capacity = 8
        occupancy = "at_most"

        [termination]
        round_limit = 7

        [checkpoint]
        directory = "out/ckpt"
        mode = "tables_only"
    "#;

    let config = SearchConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.move_thread_count, MoveThreadCount::None);
    assert_eq!(config.instance.slot_count, 4);
    assert_eq!(config.instance.capacity, 8);
    assert_eq!(config.instance.occupancy, OccupancyMode::AtMost);
    assert_eq!(config.termination.round_limit, 7);
    assert_eq!(config.checkpoint.directory, PathBuf::from("out/ckpt"));
    assert_eq!(config.checkpoint.mode, CheckpointMode::TablesOnly);
}

#[test]
fn test_thread_count_table_form() {
    let config = SearchConfig::from_toml_str("move_thread_count = { count = 3 }").unwrap();
    assert_eq!(config.move_thread_count, MoveThreadCount::Count(3));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        instance:
          slot_count: 3
          capacity: 4
          start_slots: [2, 1, 0]
          start_cursor: 1
        termination:
          round_limit: 5
    "#;

    let config = SearchConfig::from_yaml_str(yaml).unwrap();
    let start = config.start_inventory().unwrap();
    assert_eq!(start.slots(), &[2, 1, 0]);
    assert_eq!(start.cursor(), 1);
    assert_eq!(config.termination.round_limit, 5);
}

#[test]
fn test_defaults() {
    let config = SearchConfig::default();
    assert_eq!(config.instance.slot_count, 36);
    assert_eq!(config.instance.capacity, 64);
    assert!(config.instance.trim_slots);
    assert_eq!(config.instance.occupancy, OccupancyMode::Exact);
    assert_eq!(config.termination.round_limit, 20);
    assert_eq!(config.checkpoint.directory, PathBuf::from("checkpoint"));
    assert_eq!(config.checkpoint.mode, CheckpointMode::Full);

    let instance = config.instance().unwrap();
    assert_eq!(instance.slot_count(), 36);
    assert_eq!(instance.total(), 64);
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = SearchConfig::from_toml_str("").unwrap();
    assert_eq!(config.termination.round_limit, 20);
    assert_eq!(config.move_thread_count, MoveThreadCount::Auto);
}

#[test]
fn test_trim_slots() {
    let config = SearchConfig::new().with_inventory(10, 4);
    let start = config.start_inventory().unwrap();
    assert_eq!(start.slots(), &[4, 0, 0, 0]);

    let mut untrimmed = SearchConfig::new().with_inventory(10, 4);
    untrimmed.instance.trim_slots = false;
    assert_eq!(untrimmed.start_inventory().unwrap().slot_count(), 10);
}

#[test]
fn test_huge_slot_count() {
    // Trimming builds only the slots the items can fill.
    let trimmed = SearchConfig::new().with_inventory(usize::MAX, 4);
    assert_eq!(trimmed.start_inventory().unwrap().slot_count(), 4);
    assert!(trimmed.validate().is_ok());

    let mut untrimmed = SearchConfig::new().with_inventory(usize::MAX, 4);
    untrimmed.instance.trim_slots = false;
    assert!(matches!(
        untrimmed.validate(),
        Err(ConfigError::Instance(_))
    ));
}

#[test]
fn test_builder() {
    let config = SearchConfig::new()
        .with_start(vec![2, 0], 0)
        .with_round_limit(3)
        .with_checkpoint_dir("tmp/ckpt")
        .with_move_thread_count(MoveThreadCount::Count(2));

    assert_eq!(config.instance.slot_count, 2);
    assert_eq!(config.termination.round_limit, 3);
    assert_eq!(config.checkpoint.directory, PathBuf::from("tmp/ckpt"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_settings() {
    let zero_rounds = SearchConfig::new().with_round_limit(0);
    assert!(matches!(zero_rounds.validate(), Err(ConfigError::Invalid(_))));

    let zero_threads = SearchConfig::new().with_move_thread_count(MoveThreadCount::Count(0));
    assert!(matches!(zero_threads.validate(), Err(ConfigError::Invalid(_))));

    let mut wrong_len = SearchConfig::new().with_start(vec![2, 0], 0);
    wrong_len.instance.slot_count = 3;
    assert!(matches!(wrong_len.validate(), Err(ConfigError::Invalid(_))));

    let mut over_capacity = SearchConfig::new().with_start(vec![9, 0], 0);
    over_capacity.instance.capacity = 8;
    assert!(matches!(
        over_capacity.validate(),
        Err(ConfigError::Instance(_))
    ));
}

#[test]
fn test_missing_file() {
    let result = SearchConfig::load("/nonexistent/slotsearch.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_load_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();

    let yaml = dir.path().join("search.yaml");
    std::fs::write(&yaml, "termination:\n  round_limit: 7\n").unwrap();
    assert_eq!(SearchConfig::load(&yaml).unwrap().termination.round_limit, 7);

    let toml = dir.path().join("search.toml");
    std::fs::write(&toml, "[termination]\nround_limit = 9\n").unwrap();
    assert_eq!(SearchConfig::load(&toml).unwrap().termination.round_limit, 9);

    // YAML content behind a TOML extension is a TOML error.
    let wrong = dir.path().join("search.conf");
    std::fs::write(&wrong, "termination:\n  round_limit: 7\n").unwrap();
    assert!(matches!(SearchConfig::load(&wrong), Err(ConfigError::Toml(_))));
}
