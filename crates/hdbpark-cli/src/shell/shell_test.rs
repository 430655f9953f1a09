use hdbpark_core::ReferenceRow;

use super::*;

fn row(id: &str, address: &str) -> ReferenceRow {
    ReferenceRow {
        car_park_no: id.to_string(),
        address: address.to_string(),
        x_coord: 30_314.79,
        y_coord: 31_490.49,
        car_park_type: "MULTI-STOREY CAR PARK".to_string(),
        type_of_parking_system: "ELECTRONIC PARKING".to_string(),
        short_term_parking: "WHOLE DAY".to_string(),
        free_parking: "SUN & PH FR 7AM-10.30PM".to_string(),
        night_parking: "YES".to_string(),
        car_park_decks: 5,
        gantry_height: 2.15,
        car_park_basement: "N".to_string(),
    }
}

fn index() -> CarparkIndex {
    CarparkIndex::build(vec![
        row("A20", "BLK 101 TAMPINES STREET 1"),
        row("B12", "BLK 202 ANG MO KIO"),
        row("AM14", "BLK 781 TO 783 ANG MO KIO AVE 5"),
    ])
    .expect("valid reference rows")
}

/// Feeds `inputs` in order and returns the effects of the last one.
fn drive(shell: &mut Shell, index: &CarparkIndex, inputs: &[&str]) -> Vec<Effect> {
    let mut last = Vec::new();
    for input in inputs {
        last = shell.step(input, index);
    }
    last
}

fn shows(effects: &[Effect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Show { identifier } => Some(identifier.as_str()),
            _ => None,
        })
        .collect()
}

fn said(effects: &[Effect]) -> String {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Say(text) => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn greeting_shows_menu() {
    let shell = Shell::new();
    let text = said(&shell.greeting());
    assert!(text.contains("Welcome"));
    assert!(text.contains("1. Query by carpark number"));
}

#[test]
fn lookup_by_number_shows_carpark_and_returns_to_menu() {
    let idx = index();
    let mut shell = Shell::new();
    let effects = drive(&mut shell, &idx, &["1", "a20"]);
    assert_eq!(shows(&effects), vec!["A20"]);
    assert_eq!(shell.state(), &State::AwaitMode);
}

#[test]
fn unknown_carpark_number_says_no_information() {
    let idx = index();
    let mut shell = Shell::new();
    let effects = drive(&mut shell, &idx, &["1", "ZZ9"]);
    assert!(shows(&effects).is_empty());
    assert!(said(&effects).contains("No information found for carpark number: ZZ9"));
}

#[test]
fn blank_carpark_number_reprompts() {
    let idx = index();
    let mut shell = Shell::new();
    let effects = drive(&mut shell, &idx, &["1", "  "]);
    assert!(said(&effects).contains("carpark number cannot be empty"));
    assert_eq!(shell.state(), &State::AwaitIdentifier);
}

#[test]
fn single_address_match_is_shown_directly() {
    let idx = index();
    let mut shell = Shell::new();
    let effects = drive(&mut shell, &idx, &["2", "BLK101TAMPINESSTREET1"]);
    assert_eq!(shows(&effects), vec!["A20"]);
}

#[test]
fn several_matches_require_explicit_choice() {
    let idx = index();
    let mut shell = Shell::new();
    let effects = drive(&mut shell, &idx, &["3", "ANG MO KIO", "NOT SURE"]);
    assert!(shows(&effects).is_empty());
    assert!(said(&effects).contains("B12"));
    assert_eq!(
        shell.state(),
        &State::Disambiguate {
            candidates: vec!["B12".to_string(), "AM14".to_string()]
        }
    );

    let rejected = shell.step("A20", &idx);
    assert!(shows(&rejected).is_empty());
    assert!(said(&rejected).contains("B12, AM14"));

    let chosen = shell.step("am14", &idx);
    assert_eq!(shows(&chosen), vec!["AM14"]);
    assert_eq!(shell.state(), &State::AwaitMode);
}

#[test]
fn town_then_block_uses_range_inclusion() {
    let idx = index();
    let mut shell = Shell::new();
    let effects = drive(&mut shell, &idx, &["3", "ang mo kio", "782"]);
    assert_eq!(shows(&effects), vec!["AM14"]);
}

#[test]
fn unknown_town_and_invalid_block_have_distinct_messages() {
    let idx = index();
    let mut shell = Shell::new();
    let town = drive(&mut shell, &idx, &["3", "NONEXISTENT TOWN"]);
    assert!(said(&town).contains(hdbpark_resolver::Miss::TownNotFound.message()));
    assert_eq!(shell.state(), &State::AwaitMode);

    let block = drive(&mut shell, &idx, &["3", "TAMPINES", "999"]);
    assert!(said(&block).contains(hdbpark_resolver::Miss::InvalidBlock.message()));
}

#[test]
fn blank_town_reprompts() {
    let idx = index();
    let mut shell = Shell::new();
    let effects = drive(&mut shell, &idx, &["3", ""]);
    assert!(said(&effects).contains("town or road name cannot be empty"));
    assert_eq!(shell.state(), &State::AwaitTownBlock { town: None });
}

#[test]
fn last_update_overall_and_for_one_carpark() {
    let idx = index();
    let mut shell = Shell::new();
    let overall = drive(&mut shell, &idx, &["4", ""]);
    assert!(overall.contains(&Effect::LastUpdate { identifier: None }));

    let one = drive(&mut shell, &idx, &["4", "b12"]);
    assert!(one.contains(&Effect::LastUpdate {
        identifier: Some("B12".to_string())
    }));
}

#[test]
fn last_update_for_carpark_missing_from_reference_asks_the_feed() {
    let idx = index();
    let mut shell = Shell::new();
    let effects = drive(&mut shell, &idx, &["4", " zz9 "]);
    assert!(effects.contains(&Effect::LastUpdate {
        identifier: Some("ZZ9".to_string())
    }));
    assert!(!said(&effects).contains("No information found"));
    assert_eq!(shell.state(), &State::AwaitMode);
}

#[test]
fn restart_returns_to_menu_from_any_state() {
    let idx = index();
    let mut shell = Shell::new();
    drive(&mut shell, &idx, &["3", "ANG MO KIO"]);
    assert!(matches!(shell.state(), State::AwaitTownBlock { town: Some(_) }));

    let effects = shell.step("restart", &idx);
    assert_eq!(shell.state(), &State::AwaitMode);
    assert!(said(&effects).contains("Please select an option"));
}

#[test]
fn exit_from_any_state_finishes() {
    let idx = index();
    let mut shell = Shell::new();
    drive(&mut shell, &idx, &["2", "exit"]);
    assert!(shell.is_finished());
    assert!(shell.step("1", &idx).is_empty());
}

#[test]
fn invalid_menu_choice_repeats_menu() {
    let idx = index();
    let mut shell = Shell::new();
    let effects = shell.step("9", &idx);
    assert!(said(&effects).contains("Invalid choice"));
    assert_eq!(shell.state(), &State::AwaitMode);
}
