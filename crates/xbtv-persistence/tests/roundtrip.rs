//! Round-trip properties of the schedule file format.
//!
//! Every schedule must survive save followed by load unchanged, whatever
//! characters its name, sources and locations contain.

use proptest::prelude::*;
use tempfile::tempdir;

use xbtv_model::{Program, Schedule};
use xbtv_persistence::{load_schedule, parse_schedule, save_schedule, serialize_schedule};

fn field() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,8}",
        "[ -~]{0,24}",
        "\\PC{0,16}",
        prop::collection::vec(
            prop_oneof![
                Just('"'),
                Just('\\'),
                Just('\n'),
                Just('\r'),
                Just('\t'),
                Just('{'),
                Just('}'),
                Just('\u{0}'),
                Just('é'),
                Just('x'),
            ],
            0..12
        )
        .prop_map(|chars: Vec<char>| chars.into_iter().collect::<String>()),
    ]
}

fn schedule() -> impl Strategy<Value = Schedule> {
    let name = field().prop_filter("names must not be blank", |name| !name.trim().is_empty());
    let programs = prop::collection::vec(
        (field(), field()).prop_map(|(source, location)| Program::new(source, location)),
        0..8,
    );
    (name, programs)
        .prop_map(|(name, programs)| Schedule::with_programs(name, programs).unwrap())
}

proptest! {
    #[test]
    fn text_round_trip(schedule in schedule()) {
        let text = serialize_schedule(&schedule).unwrap();
        let parsed = parse_schedule(&text).unwrap();
        prop_assert_eq!(parsed, schedule);
    }

    #[test]
    fn file_round_trip(schedule in schedule()) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schedule.xbtv");

        save_schedule(&schedule, &path).unwrap();
        let loaded = load_schedule(&path).unwrap();

        prop_assert_eq!(loaded.name(), schedule.name());
        prop_assert_eq!(loaded.programs(), schedule.programs());
    }
}

#[test]
fn empty_program_list_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.xbtv");
    let schedule = Schedule::new("Nothing yet").unwrap();

    save_schedule(&schedule, &path).unwrap();
    assert_eq!(load_schedule(&path).unwrap(), schedule);
}

#[test]
fn serialization_is_stable() {
    let schedule = Schedule::with_programs(
        "Stable",
        vec![
            Program::new("local", "/a"),
            Program::new("network", "http://b"),
        ],
    )
    .unwrap();

    let once = serialize_schedule(&schedule).unwrap();
    let twice = serialize_schedule(&parse_schedule(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
}
