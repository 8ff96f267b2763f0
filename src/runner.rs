//! Blocking request/response loop over line-oriented JSON.
//!
//! The engine on the other end sends one request per line and waits for
//! one response line before sending the next, so the whole session is
//! strictly sequential. A request that cannot be decoded is fatal: there
//! is no valid response to emit in its place.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use crate::draft::plan_draft;
use crate::protocol::{BattleState, DraftOptions};
use crate::tactics::TurnEngine;

/// One protocol session: the draft request must arrive before any turn
/// request, because it carries the player id and map size the turn engine
/// is built from.
#[derive(Debug, Default)]
pub struct Session {
    engine: Option<TurnEngine>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one request line, returning the response line (without the
    /// trailing newline). Requests are told apart by key shape: a draft
    /// request carries `PlayerId`, a turn request carries `My`.
    pub fn handle_line(&mut self, line: &str) -> Result<String> {
        let request: Value = serde_json::from_str(line).context("malformed request line")?;

        if request.get("PlayerId").is_some() {
            let options: DraftOptions =
                serde_json::from_value(request).context("malformed draft request")?;
            let choice = plan_draft(&options);
            log::info!(
                "draft: player={} map={} purchased={}",
                options.player_id,
                options.map_size,
                choice.ships.len()
            );
            self.engine = Some(TurnEngine::from_draft(&options));
            serde_json::to_string(&choice).context("encoding draft response")
        } else if request.get("My").is_some() {
            let engine = self
                .engine
                .as_mut()
                .ok_or_else(|| anyhow!("turn request before draft request"))?;
            let state: BattleState =
                serde_json::from_value(request).context("malformed turn request")?;
            let output = engine.plan_turn(&state);
            serde_json::to_string(&output).context("encoding turn response")
        } else {
            Err(anyhow!("unrecognized request shape (neither draft nor turn)"))
        }
    }
}

/// Drive a whole session: one response line per request line, flushed
/// immediately so the engine never stalls waiting on a buffer. Returns the
/// number of requests served once the input stream ends.
pub fn run_session<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<usize> {
    let mut session = Session::new();
    let mut requests = 0usize;
    for line in input.lines() {
        let line = line.context("reading request line")?;
        if line.trim().is_empty() {
            continue;
        }
        let response = session.handle_line(&line)?;
        writeln!(output, "{response}").context("writing response line")?;
        output.flush().context("flushing response")?;
        requests += 1;
    }
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAFT_REQUEST: &str = r#"{"PlayerId":2,"MapSize":30,"Money":40,"MaxShipsCount":5,"StartArea":{"From":"0/0/0","To":"10/10/10"},"Equipment":[],"CompleteShips":[{"Id":"scout","Price":20,"Equipment":[]}]}"#;

    #[test]
    fn turn_before_draft_is_a_protocol_error() {
        let mut session = Session::new();
        let err = session
            .handle_line(r#"{"FireInfos":[],"My":[],"Opponent":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("before draft"));
    }

    #[test]
    fn unrecognized_request_shape_is_rejected() {
        let mut session = Session::new();
        assert!(session.handle_line(r#"{"Hello":1}"#).is_err());
    }

    #[test]
    fn draft_then_turn_round_trip() {
        let mut session = Session::new();
        let draft: Value = serde_json::from_str(&session.handle_line(DRAFT_REQUEST).unwrap()).unwrap();
        assert_eq!(draft["Ships"].as_array().unwrap().len(), 2);

        let turn = session
            .handle_line(r#"{"FireInfos":[],"My":[],"Opponent":[]}"#)
            .unwrap();
        let turn: Value = serde_json::from_str(&turn).unwrap();
        assert_eq!(turn["UserCommands"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn blank_lines_are_skipped_and_requests_counted() {
        let input = format!("{DRAFT_REQUEST}\n\n");
        let mut output = Vec::new();
        let served = run_session(input.as_bytes(), &mut output).unwrap();
        assert_eq!(served, 1);
        assert_eq!(output.iter().filter(|&&b| b == b'\n').count(), 1);
    }
}
