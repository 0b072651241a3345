//! Serialization of levels, spacing and settings commands.

#![cfg(feature = "serde")]

use logging::{Command, Level, Spacing};

/// Verifies levels serialize by name and come back unchanged.
#[test]
fn levels_serialize_by_name() {
    let json = serde_json::to_string(&Level::Warning).expect("serialize level");
    assert_eq!(json, "\"Warning\"");

    let all = serde_json::to_string(&Level::ALL).expect("serialize levels");
    let back: Vec<Level> = serde_json::from_str(&all).expect("deserialize levels");
    assert_eq!(back, Level::ALL.to_vec());
}

/// Verifies spacing modes survive a JSON round trip.
#[test]
fn spacing_round_trips() {
    let json = serde_json::to_string(&Spacing::AsIs).expect("serialize spacing");
    let back: Spacing = serde_json::from_str(&json).expect("deserialize spacing");
    assert_eq!(back, Spacing::AsIs);
}

/// Verifies parsed commands can be stored and restored.
#[test]
fn commands_round_trip_through_json() {
    let commands: Vec<Command> = "resetLevels: Info\nsetLevel: Trace=-;net/\naddSink: app.log\nnoPad"
        .lines()
        .filter_map(|line| Command::parse(line).expect("known command"))
        .collect();

    let json = serde_json::to_string(&commands).expect("serialize commands");
    let back: Vec<Command> = serde_json::from_str(&json).expect("deserialize commands");
    assert_eq!(back, commands);
}
