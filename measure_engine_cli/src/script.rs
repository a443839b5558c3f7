//! Line-oriented session scripts replayed through the engine.
//!
//! Each non-empty line is one viewer action, split with shell quoting rules:
//!
//! ```text
//! # comment
//! unit ft
//! tool area
//! point 0 0 0
//! point 1 0 0
//! point 1 1 0
//! finish
//! label 1 "north room"
//! ```

use std::io;

use measure_engine::{MeasurementEngine, MeasurementId, MeasurementKind, Point3, Unit};

/// One scripted viewer action.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Tool(MeasurementKind),
    Point(Point3),
    Undo,
    Finish,
    Cancel,
    Unit(Unit),
    Delete(MeasurementId),
    Label(MeasurementId, Option<String>),
    Clear,
}

fn invalid(line_no: usize, msg: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("line {}: {}", line_no, msg))
}

fn parse_f64(line_no: usize, s: &str) -> io::Result<f64> {
    s.parse::<f64>().map_err(|e| invalid(line_no, format!("{}: {}", s, e)))
}

fn parse_id(line_no: usize, s: &str) -> io::Result<MeasurementId> {
    s.trim_start_matches('#')
        .parse::<u64>()
        .map(MeasurementId)
        .map_err(|e| invalid(line_no, format!("{}: {}", s, e)))
}

/// Parses a single script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> io::Result<Option<ScriptCommand>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let words = shell_words::split(trimmed).map_err(|e| invalid(line_no, e))?;
    let args: Vec<&str> = words.iter().map(String::as_str).collect();
    let cmd = match args.as_slice() {
        ["tool", kind] => ScriptCommand::Tool(
            kind.parse::<MeasurementKind>()
                .map_err(|e| invalid(line_no, e))?,
        ),
        ["point", x, y, z] => ScriptCommand::Point(Point3::new(
            parse_f64(line_no, x)?,
            parse_f64(line_no, y)?,
            parse_f64(line_no, z)?,
        )),
        ["undo"] => ScriptCommand::Undo,
        ["finish"] => ScriptCommand::Finish,
        ["cancel"] => ScriptCommand::Cancel,
        ["unit", unit] => {
            ScriptCommand::Unit(unit.parse::<Unit>().map_err(|e| invalid(line_no, e))?)
        }
        ["delete", id] => ScriptCommand::Delete(parse_id(line_no, id)?),
        ["label", id] => ScriptCommand::Label(parse_id(line_no, id)?, None),
        ["label", id, text] => {
            ScriptCommand::Label(parse_id(line_no, id)?, Some(text.to_string()))
        }
        ["clear"] => ScriptCommand::Clear,
        _ => return Err(invalid(line_no, format!("unrecognised command '{}'", trimmed))),
    };
    Ok(Some(cmd))
}

/// Applies one command to the engine.
pub fn apply(engine: &mut MeasurementEngine, line_no: usize, cmd: ScriptCommand) -> io::Result<()> {
    match cmd {
        ScriptCommand::Tool(kind) => engine.select_tool(kind),
        ScriptCommand::Point(p) => {
            engine.submit_point(p).map_err(|e| invalid(line_no, e))?;
        }
        ScriptCommand::Undo => {
            engine.undo();
        }
        ScriptCommand::Finish => {
            engine.finish_area();
        }
        ScriptCommand::Cancel => {
            engine.cancel_capture();
        }
        ScriptCommand::Unit(unit) => engine.set_active_unit(unit),
        ScriptCommand::Delete(id) => {
            engine.delete_measurement(id);
        }
        ScriptCommand::Label(id, text) => {
            engine.set_label(id, text);
        }
        ScriptCommand::Clear => engine.clear_all(),
    }
    Ok(())
}

/// Replays a whole script, stopping at the first malformed line or
/// rejected action.
pub fn run_script(engine: &mut MeasurementEngine, source: &str) -> io::Result<()> {
    for (idx, line) in source.lines().enumerate() {
        if let Some(cmd) = parse_line(idx + 1, line)? {
            apply(engine, idx + 1, cmd)?;
        }
    }
    Ok(())
}
