use anyhow::Result;
use keepsake_testing::TestWorld;
use keepsake_testing::assertions::{
    assert_badge_level, assert_event_present, assert_interaction_count, assert_timestamps_ordered,
};

#[test]
fn test_simulate_then_inspect_reads_back_the_visit() -> Result<()> {
    let world = TestWorld::new();

    let simulate = world.run_json(&["simulate"])?;
    assert!(simulate.success(), "simulate failed: {}", simulate.stderr());
    let simulate = simulate.json()?;
    assert_badge_level(&simulate, "success")?;
    assert_eq!(simulate["content"]["persisted"], true);
    assert_eq!(simulate["content"]["finalized"], true);
    assert_eq!(simulate["content"]["quiz"]["score"], 10);

    let total = simulate["content"]["totalInteractions"]
        .as_u64()
        .expect("totalInteractions") as usize;

    let inspect = world.run_json(&["inspect"])?;
    assert!(inspect.success(), "inspect failed: {}", inspect.stderr());
    let inspect = inspect.json()?;

    assert_interaction_count(&inspect, total)?;
    assert_event_present(&inspect, "page_load")?;
    assert_event_present(&inspect, "carousel_swipe")?;
    assert_event_present(&inspect, "quiz_completed")?;
    assert_timestamps_ordered(&inspect)?;

    assert_eq!(
        inspect["content"]["stored"]["sessionId"],
        simulate["content"]["sessionId"]
    );
    assert_eq!(inspect["content"]["final"]["totalInteractions"], total);
    assert!(inspect["content"]["final"]["exitTime"].is_string());
    assert_eq!(inspect["content"]["archivedChunks"], 0);

    Ok(())
}

#[test]
fn test_second_visit_replaces_the_stored_log() -> Result<()> {
    let world = TestWorld::new();

    let first = world.run_json(&["simulate"])?.json()?;
    let second = world.run_json(&["simulate"])?.json()?;
    assert_ne!(first["content"]["sessionId"], second["content"]["sessionId"]);

    let inspect = world.run_json(&["inspect"])?.json()?;
    assert_eq!(
        inspect["content"]["stored"]["sessionId"],
        second["content"]["sessionId"]
    );

    Ok(())
}

#[test]
fn test_no_finalize_leaves_final_key_empty() -> Result<()> {
    let world = TestWorld::new();

    let simulate = world.run_json(&["simulate", "--no-finalize"])?;
    assert!(simulate.success());
    assert_eq!(simulate.json()?["content"]["finalized"], false);

    let inspect = world.run_json(&["inspect"])?.json()?;
    assert!(inspect["content"]["final"].is_null());
    assert!(inspect["content"]["stored"].is_object());

    Ok(())
}

#[test]
fn test_five_question_quiz_scoring() -> Result<()> {
    let world = TestWorld::new();

    let perfect = world
        .run_json(&["simulate", "--quiz", "five", "--answers", "ADDDD"])?
        .json()?;
    assert_eq!(perfect["content"]["quiz"]["score"], 5);
    assert_eq!(perfect["content"]["quiz"]["totalQuestions"], 5);
    assert!(
        perfect["content"]["quiz"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Perfect!")
    );

    let partial = world
        .run_json(&["simulate", "--quiz", "five", "--answers", "addaa"])?
        .json()?;
    assert_eq!(partial["content"]["quiz"]["score"], 3);
    assert!(
        partial["content"]["quiz"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Great job!")
    );

    Ok(())
}

#[test]
fn test_invalid_answers_fail_before_recording() -> Result<()> {
    let world = TestWorld::new();

    let bad_choice = world.run(&["simulate", "--quiz", "five", "--answers", "ADXDD"])?;
    assert!(!bad_choice.success());
    assert!(bad_choice.stderr().contains("Error:"));

    let too_many = world.run(&["simulate", "--quiz", "five", "--answers", "ADDDDA"])?;
    assert!(!too_many.success());
    assert!(too_many.stderr().contains("6 answers"));

    assert!(!world.store_path().exists());

    Ok(())
}

#[test]
fn test_stats_counts_events_by_kind() -> Result<()> {
    let world = TestWorld::new();

    let empty = world.run_json(&["stats"])?.json()?;
    assert_badge_level(&empty, "warning")?;
    assert_eq!(empty["content"]["totalInteractions"], 0);

    world.run(&["simulate"])?;
    let stats = world.run_json(&["stats"])?.json()?;
    assert_badge_level(&stats, "info")?;

    let by_event = stats["content"]["byEvent"].as_array().expect("byEvent");
    let count_of = |kind: &str| {
        by_event
            .iter()
            .find(|row| row["event"] == kind)
            .and_then(|row| row["count"].as_u64())
    };
    assert_eq!(count_of("page_load"), Some(1));
    assert_eq!(count_of("quiz_answer"), Some(10));
    assert_eq!(count_of("quiz_completed"), Some(1));

    let summed: u64 = by_event.iter().filter_map(|row| row["count"].as_u64()).sum();
    assert_eq!(stats["content"]["totalInteractions"], summed);

    Ok(())
}

#[test]
fn test_clear_removes_every_analytics_key() -> Result<()> {
    let world = TestWorld::new();
    world.run(&["simulate"])?;

    let clear = world.run_json(&["clear"])?;
    assert!(clear.success(), "clear failed: {}", clear.stderr());
    let clear = clear.json()?;
    assert_badge_level(&clear, "success")?;
    let removed: Vec<&str> = clear["content"]["removedKeys"]
        .as_array()
        .expect("removedKeys")
        .iter()
        .filter_map(|k| k.as_str())
        .collect();
    assert_eq!(removed, vec!["finalAnalytics", "websiteAnalytics"]);

    let inspect = world.run_json(&["inspect"])?.json()?;
    assert_badge_level(&inspect, "warning")?;
    assert!(inspect["content"]["stored"].is_null());
    assert!(inspect["content"]["final"].is_null());

    let again = world.run_json(&["clear"])?.json()?;
    assert_badge_level(&again, "info")?;

    Ok(())
}

#[test]
fn test_rotation_archives_full_logs() -> Result<()> {
    let world = TestWorld::new().with_config("[storage]\nmax_events = 10\n");

    let simulate = world.run_json(&["simulate", "--no-finalize"])?.json()?;
    let total = simulate["content"]["totalInteractions"].as_u64().unwrap();
    assert!(total > 10);

    let inspect = world.run_json(&["inspect"])?.json()?;
    assert!(inspect["content"]["archivedChunks"].as_u64().unwrap() >= 1);

    let archived: u64 = inspect["content"]["allSessions"]
        .as_array()
        .expect("allSessions")
        .iter()
        .filter_map(|s| s["interactions"].as_array())
        .map(|events| events.len() as u64)
        .sum();
    assert_eq!(archived, total);

    Ok(())
}

#[test]
fn test_tiny_quota_degrades_to_memory() -> Result<()> {
    let world = TestWorld::new().with_config("[storage]\nquota_bytes = 2048\n");

    let simulate = world.run_json(&["simulate", "--no-finalize"])?;
    assert!(simulate.success(), "simulate failed: {}", simulate.stderr());
    let simulate = simulate.json()?;

    assert_badge_level(&simulate, "warning")?;
    assert_eq!(simulate["content"]["persisted"], false);
    assert!(simulate["content"]["degradedReason"].is_string());
    assert!(simulate["content"]["totalInteractions"].as_u64().unwrap() > 10);

    let inspect = world.run_json(&["inspect"])?.json()?;
    assert!(inspect["content"]["stored"].is_null());

    Ok(())
}
