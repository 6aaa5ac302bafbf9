use last_stand_round::{query, RewardConfig, RoundState};

#[test]
fn hand_written_toml_builds_a_round() {
    let config: RewardConfig = toml::from_str(
        r#"
        [[rewards]]
        name = "Handgun"
        path = "items/Item Gun Handgun"
        weight = 0.15

        [[rewards]]
        name = "Rubber Duck"
        path = "items/Item Rubber Duck"
        weight = 0.01
        "#,
    )
    .expect("reward table toml parses");

    let state = RoundState::new(&config).expect("parsed table is valid");
    let names: Vec<&str> = query::reward_candidates(&state)
        .iter()
        .map(|candidate| candidate.name())
        .collect();
    assert_eq!(names, vec!["Handgun", "Rubber Duck"]);
}

#[test]
fn printed_default_table_parses_back() {
    let printed =
        toml::to_string_pretty(&RewardConfig::default()).expect("default table serialises");
    let reparsed: RewardConfig = toml::from_str(&printed).expect("printed table parses back");

    assert_eq!(reparsed, RewardConfig::default());
}
