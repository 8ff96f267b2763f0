use std::fs::File;
use std::io::{BufReader, Write};

use anyhow::Result;
use fleet_autopilot::runner::run_session;
use serde_json::Value;
use tempfile::NamedTempFile;

const DRAFT_REQUEST: &str = r#"{"PlayerId":2,"MapSize":30,"Money":100,"MaxShipsCount":5,"StartArea":{"From":"0/0/0","To":"10/10/10"},"Equipment":[{"Size":1,"Equipment":{"Name":"gun-1","Type":1,"Damage":10,"EffectType":0,"EnergyPrice":1,"Radius":5}}],"CompleteShips":[{"Id":"scout","Price":20,"Equipment":["gun-1"]}]}"#;

const TURN_REQUEST: &str = r#"{"FireInfos":[],"My":[{"Id":1,"Position":"0/0/0","Velocity":"0/0/0","Energy":100,"Health":100,"Equipment":[{"Name":"gun-1","Type":1,"Damage":10,"EffectType":0,"EnergyPrice":1,"Radius":5},{"Name":"engine-1","Type":2,"MaxAccelerate":2}]}],"Opponent":[{"Id":2,"Position":"3/3/3","Velocity":"0/0/0","Health":80,"Equipment":[]}]}"#;

#[test]
fn recorded_session_produces_one_response_per_request() -> Result<()> {
    let mut log = NamedTempFile::new()?;
    writeln!(log, "{DRAFT_REQUEST}")?;
    writeln!(log, "{TURN_REQUEST}")?;
    log.flush()?;

    let reader = BufReader::new(File::open(log.path())?);
    let mut responses = Vec::new();
    let served = run_session(reader, &mut responses)?;
    assert_eq!(served, 2);

    let lines: Vec<Value> = std::str::from_utf8(&responses)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 2);

    // Draft: 100 money buys five 20-point scouts, capped at five.
    let purchases = lines[0]["Ships"].as_array().unwrap();
    assert_eq!(purchases.len(), 5);
    assert_eq!(purchases[0]["CompleteShipId"], "scout");

    // Turn: the lone opponent is inside gun range, so the batch carries an
    // attack on top of the maneuver order.
    let commands = lines[1]["UserCommands"].as_array().unwrap();
    assert!(commands
        .iter()
        .any(|command| command["Command"] == "ATTACK"));
    Ok(())
}

#[test]
fn turn_request_before_draft_fails_the_replay() -> Result<()> {
    let mut log = NamedTempFile::new()?;
    writeln!(log, "{TURN_REQUEST}")?;
    log.flush()?;

    let reader = BufReader::new(File::open(log.path())?);
    let mut responses = Vec::new();
    let err = run_session(reader, &mut responses).unwrap_err();
    assert!(err.to_string().contains("before draft"));
    assert!(responses.is_empty());
    Ok(())
}

#[test]
fn malformed_request_line_is_fatal() -> Result<()> {
    let mut log = NamedTempFile::new()?;
    writeln!(log, "{DRAFT_REQUEST}")?;
    writeln!(log, "{{not json")?;
    log.flush()?;

    let reader = BufReader::new(File::open(log.path())?);
    let mut responses = Vec::new();
    assert!(run_session(reader, &mut responses).is_err());
    Ok(())
}
