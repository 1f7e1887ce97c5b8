//! Integration tests for the weather feed adapter

use std::process::Command;

use rstest::rstest;
use weatherfeed::{
    DatePatterns, FeedExtractor, TimeOfDay, WeatherFeedError, parse_document, snapshot_from_xml,
};

const FIXTURE: &str = include_str!("fixtures/chicago.xml");
const FIXTURE_PATH: &str = "tests/fixtures/chicago.xml";

fn without(xml: &str, start: &str, end: &str) -> String {
    let from = xml.find(start).expect("start marker");
    let to = xml[from..].find(end).expect("end marker") + from + end.len();
    format!("{}{}", &xml[..from], &xml[to..])
}

fn with_times(sunset: &str, observed: &str) -> String {
    FIXTURE
        .replace(r#"set="6:05 PM""#, &format!(r#"set="{sunset}""#))
        .replace(
            "<observationtime>3:42 PM</observationtime>",
            &format!("<observationtime>{observed}</observationtime>"),
        )
}

#[test]
fn test_full_snapshot_from_fixture() {
    let snapshot = snapshot_from_xml(FIXTURE, &DatePatterns::default()).unwrap();

    assert_eq!(snapshot.location.city.as_deref(), Some("Chicago"));
    assert_eq!(snapshot.location.state.as_deref(), Some("IL"));
    assert_eq!(snapshot.location.latitude, Some(41.8781));
    assert_eq!(snapshot.location.longitude, Some(-87.6298));

    assert_eq!(snapshot.current.temperature, Some(54));
    assert_eq!(snapshot.current.condition.as_deref(), Some("Partly Sunny"));
    assert_eq!(snapshot.current.icon.as_deref(), Some("03"));
    assert_eq!(snapshot.current.wind_speed, Some(12.0));
    assert_eq!(snapshot.current.wind_direction.as_deref(), Some("NW"));
    assert_eq!(snapshot.current.humidity, Some(54.0));
    assert_eq!(snapshot.current.pressure, Some(29.92));
    assert!(
        snapshot
            .current
            .more_information_link
            .as_deref()
            .unwrap()
            .starts_with("http://www.accuweather.com/")
    );

    assert_eq!(snapshot.units.pressure.as_deref(), Some("IN"));
    assert_eq!(snapshot.units.temperature.as_deref(), Some("F"));
    assert_eq!(snapshot.units.wind_speed.as_deref(), Some("MPH"));

    let days: Vec<&str> = snapshot.forecast.iter().map(|d| d.day.as_str()).collect();
    assert_eq!(days, vec!["Mon", "Tue", "Wed"]);
    assert_eq!(snapshot.forecast[0].condition, "Partly sunny");
    assert_eq!(snapshot.forecast[0].high_temperature, 58);
    assert_eq!(snapshot.forecast[0].low_temperature, 44);
    assert_eq!(snapshot.forecast[2].icon, "01");
}

#[rstest]
#[case("<planets>", "</planets>")]
#[case("<currentconditions", "</currentconditions>")]
#[case("<observationtime>", "</observationtime>")]
#[case("<forecast>", "</forecast>")]
fn test_forecast_fails_without_required_section(#[case] start: &str, #[case] end: &str) {
    let xml = without(FIXTURE, start, end);
    let doc = parse_document(&xml).unwrap();
    let extractor = FeedExtractor::new(doc.root_element(), DatePatterns::default());

    let err = extractor.forecast().unwrap_err();
    assert!(err.is_missing());
}

#[test]
fn test_missing_observation_time_keeps_other_conditions() {
    let xml = without(FIXTURE, "<observationtime>", "</observationtime>");
    let doc = parse_document(&xml).unwrap();
    let extractor = FeedExtractor::new(doc.root_element(), DatePatterns::default());

    let err = extractor.forecast().unwrap_err();
    assert!(matches!(
        err,
        WeatherFeedError::MissingElement { ref element }
            if element == "currentconditions/observationtime"
    ));
    assert_eq!(extractor.current_temperature().unwrap(), Some(54));
}

#[test]
fn test_missing_forecast_section_is_not_an_empty_forecast() {
    let xml = without(FIXTURE, "<forecast>", "</forecast>");
    let doc = parse_document(&xml).unwrap();
    let extractor = FeedExtractor::new(doc.root_element(), DatePatterns::default());

    let err = extractor.forecast().unwrap_err();
    assert!(matches!(
        err,
        WeatherFeedError::MissingElement { ref element } if element == "forecast/day"
    ));
}

#[rstest]
#[case("6:05 PM", "9:30 PM", TimeOfDay::Night)]
#[case("6:05 PM", "6:05 PM", TimeOfDay::Day)]
#[case("6:05 PM", "3:42 PM", TimeOfDay::Day)]
fn test_every_day_follows_one_selection(
    #[case] sunset: &str,
    #[case] observed: &str,
    #[case] expected: TimeOfDay,
) {
    let xml = with_times(sunset, observed);
    let doc = parse_document(&xml).unwrap();
    let extractor = FeedExtractor::new(doc.root_element(), DatePatterns::default());

    assert_eq!(extractor.time_of_day().unwrap().period, expected);

    let conditions: Vec<String> = extractor
        .forecast()
        .unwrap()
        .into_iter()
        .map(|d| d.condition)
        .collect();
    let expected_conditions = match expected {
        TimeOfDay::Day => vec!["Partly sunny", "Showers", "Sunny"],
        TimeOfDay::Night => vec!["Clouds", "Rain ending", "Clear"],
    };
    assert_eq!(conditions, expected_conditions);
}

#[test]
fn test_unparseable_observation_defaults_to_day() {
    let xml = with_times("6:05 PM", "sometime tonight");
    let doc = parse_document(&xml).unwrap();
    let extractor = FeedExtractor::new(doc.root_element(), DatePatterns::default());

    let selection = extractor.time_of_day().unwrap();
    assert!(selection.defaulted);
    assert_eq!(selection.period, TimeOfDay::Day);
    assert_eq!(extractor.forecast().unwrap()[1].condition, "Showers");
}

#[test]
fn test_injected_patterns_are_tried_in_order() {
    let xml = with_times("18:05", "21:30");
    let doc = parse_document(&xml).unwrap();
    let patterns = DatePatterns::new(vec!["%m/%d/%Y".to_string(), "%H:%M".to_string()]);
    let extractor = FeedExtractor::new(doc.root_element(), patterns);

    let selection = extractor.time_of_day().unwrap();
    assert!(!selection.defaulted);
    assert_eq!(selection.period, TimeOfDay::Night);
}

#[test]
fn test_empty_forecast_is_a_failure() {
    let start = FIXTURE.find("<forecast>").unwrap() + "<forecast>".len();
    let end = FIXTURE.find("</forecast>").unwrap();
    let xml = format!("{}{}", &FIXTURE[..start], &FIXTURE[end..]);
    let doc = parse_document(&xml).unwrap();
    let extractor = FeedExtractor::new(doc.root_element(), DatePatterns::default());

    assert!(extractor.forecast().unwrap_err().is_missing());
}

#[test]
fn test_partial_missing_time_of_day_fails_whole_forecast() {
    // Second day loses its daytime block; the first day is still intact.
    let xml = FIXTURE
        .replacen(
            "<daytime>\n        <txtshort>Showers",
            "<skipped>\n        <txtshort>Showers",
            1,
        )
        .replacen(
            "</daytime>\n      <nighttime>\n        <txtshort>Rain ending",
            "</skipped>\n      <nighttime>\n        <txtshort>Rain ending",
            1,
        );
    let doc = parse_document(&xml).unwrap();
    let extractor = FeedExtractor::new(doc.root_element(), DatePatterns::default());

    let err = extractor.forecast().unwrap_err();
    assert!(matches!(
        err,
        WeatherFeedError::MissingElement { ref element } if element == "forecast/day/daytime"
    ));
}

#[test]
fn test_malformed_forecast_temperature_propagates() {
    let xml = FIXTURE.replacen(
        "<hightemperature>55</hightemperature>",
        "<hightemperature>hot</hightemperature>",
        1,
    );
    let doc = parse_document(&xml).unwrap();
    let extractor = FeedExtractor::new(doc.root_element(), DatePatterns::default());

    let err = extractor.forecast().unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_unavailable_pressure_and_sections_are_absent() {
    let xml = without(
        &FIXTURE.replace("29.92</pressure>", "-999</pressure>"),
        "<units>",
        "</units>",
    );
    let snapshot = snapshot_from_xml(&xml, &DatePatterns::default()).unwrap();

    assert!(snapshot.current.pressure.is_none());
    assert!(snapshot.units.temperature.is_none());
    assert!(snapshot.units.pressure.is_none());
    assert_eq!(snapshot.forecast.len(), 3);
}

#[test]
fn test_cli_prints_snapshot_from_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_weatherfeed"))
        .args(["--file", FIXTURE_PATH, "--config", "config/default.toml"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Weather for Chicago, IL"));
    assert!(stdout.contains("54°F"));
    assert!(stdout.contains("Wed"));
}

#[test]
fn test_cli_json_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_weatherfeed"))
        .args(["--file", FIXTURE_PATH, "--config", "config/default.toml", "--json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["location"]["city"], "Chicago");
    assert_eq!(json["forecast"].as_array().unwrap().len(), 3);
}

#[test]
fn test_cli_requires_location_or_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_weatherfeed"))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
