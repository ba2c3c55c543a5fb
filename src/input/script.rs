use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command::parse_command_text;
use crate::error::{AppError, AppResult};
use crate::event::DomainEvent;

use super::events::{PointerEvent, PointerPhase};

/// One line of an input script.
#[derive(Debug, Clone)]
pub enum ScriptStep {
    Event(DomainEvent),
    Wait(Duration),
}

/// Parses a script of pointer, key, wait, and command lines.
///
/// ```text
/// # comment
/// down 1 10 10
/// drag 1 50 50 shift
/// up 1 50 50
/// key ctrl+o
/// wait 250
/// goto-page 2
/// ```
///
/// Page numbers are 1-based. Anything that is not a pointer, key, or wait
/// line is parsed as command text.
pub fn parse_script(text: &str) -> AppResult<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = parse_line(line).map_err(|err| {
            AppError::invalid_argument(format!("script line {}: {err}", index + 1))
        })?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> AppResult<ScriptStep> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(AppError::invalid_argument("empty line"));
    };

    if let Some(phase) = PointerPhase::parse(head) {
        let rest: Vec<&str> = words.collect();
        return parse_pointer(phase, &rest);
    }

    match head {
        "key" => {
            let spec = words
                .next()
                .ok_or_else(|| AppError::invalid_argument("key needs a key name"))?;
            if words.next().is_some() {
                return Err(AppError::invalid_argument("key takes one argument"));
            }
            Ok(ScriptStep::Event(DomainEvent::Key(parse_key(spec)?)))
        }
        "wait" => {
            let millis = words
                .next()
                .and_then(|value| value.parse::<u64>().ok())
                .ok_or_else(|| AppError::invalid_argument("wait needs milliseconds"))?;
            Ok(ScriptStep::Wait(Duration::from_millis(millis)))
        }
        _ => Ok(ScriptStep::Event(DomainEvent::Command(parse_command_text(
            line,
        )?))),
    }
}

fn parse_pointer(phase: PointerPhase, args: &[&str]) -> AppResult<ScriptStep> {
    if args.len() < 3 || args.len() > 4 {
        return Err(AppError::invalid_argument(format!(
            "usage: {} page x y [modifiers]",
            phase.id()
        )));
    }
    let page = args[0]
        .parse::<usize>()
        .ok()
        .filter(|page| *page >= 1)
        .ok_or_else(|| AppError::invalid_argument("page must be a number >= 1"))?;
    let x = coordinate(args[1])?;
    let y = coordinate(args[2])?;
    let modifiers = match args.get(3) {
        Some(value) => parse_modifiers(value)?,
        None => KeyModifiers::NONE,
    };

    let event = PointerEvent::new(page - 1, x, y).with_modifiers(modifiers);
    Ok(ScriptStep::Event(DomainEvent::Pointer { phase, event }))
}

fn coordinate(value: &str) -> AppResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| AppError::invalid_argument(format!("not a coordinate: {value}")))
}

fn parse_modifiers(value: &str) -> AppResult<KeyModifiers> {
    value
        .split('+')
        .try_fold(KeyModifiers::NONE, |acc, name| {
            modifier(name).map(|modifier| acc | modifier)
        })
}

fn modifier(name: &str) -> AppResult<KeyModifiers> {
    match name {
        "shift" => Ok(KeyModifiers::SHIFT),
        "ctrl" => Ok(KeyModifiers::CONTROL),
        "alt" => Ok(KeyModifiers::ALT),
        _ => Err(AppError::invalid_argument(format!("unknown modifier: {name}"))),
    }
}

fn parse_key(spec: &str) -> AppResult<KeyEvent> {
    let (prefix, name) = match spec.rfind('+') {
        Some(index) if index + 1 < spec.len() => (&spec[..index], &spec[index + 1..]),
        _ => ("", spec),
    };
    let modifiers = if prefix.is_empty() {
        KeyModifiers::NONE
    } else {
        parse_modifiers(prefix)?
    };

    let code = match name {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "delete" => KeyCode::Delete,
        "backspace" => KeyCode::Backspace,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return Err(AppError::invalid_argument(format!("unknown key: {name}"))),
            }
        }
    };
    Ok(KeyEvent::new(code, modifiers))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyModifiers};
    use kurbo::Point;

    use super::{ScriptStep, parse_script};
    use crate::command::Command;
    use crate::event::DomainEvent;
    use crate::input::PointerPhase;

    #[test]
    fn parses_pointer_key_wait_and_command_lines() {
        let steps = parse_script(
            "# make a square\n\
             down 1 10 10\n\
             drag 1 50.5 50 ctrl+shift\n\
             \n\
             key ctrl+o\n\
             wait 20\n\
             goto-page 2\n",
        )
        .expect("script should parse");
        assert_eq!(steps.len(), 5);

        match &steps[0] {
            ScriptStep::Event(DomainEvent::Pointer { phase, event }) => {
                assert_eq!(*phase, PointerPhase::Down);
                assert_eq!(event.page, 0);
                assert_eq!(event.point, Point::new(10.0, 10.0));
                assert_eq!(event.modifiers, KeyModifiers::NONE);
            }
            other => panic!("unexpected step: {other:?}"),
        }
        match &steps[1] {
            ScriptStep::Event(DomainEvent::Pointer { event, .. }) => {
                assert_eq!(event.modifiers, KeyModifiers::CONTROL | KeyModifiers::SHIFT);
            }
            other => panic!("unexpected step: {other:?}"),
        }
        match &steps[2] {
            ScriptStep::Event(DomainEvent::Key(key)) => {
                assert_eq!(key.code, KeyCode::Char('o'));
                assert_eq!(key.modifiers, KeyModifiers::CONTROL);
            }
            other => panic!("unexpected step: {other:?}"),
        }
        assert!(matches!(steps[3], ScriptStep::Wait(wait) if wait == Duration::from_millis(20)));
        assert!(matches!(
            &steps[4],
            ScriptStep::Event(DomainEvent::Command(Command::GotoPage { page: 1 }))
        ));
    }

    #[test]
    fn plus_key_is_not_a_modifier_separator() {
        let steps = parse_script("key +").expect("script should parse");
        assert!(matches!(
            &steps[0],
            ScriptStep::Event(DomainEvent::Key(key)) if key.code == KeyCode::Char('+')
        ));
    }

    #[test]
    fn errors_name_the_line() {
        let err = parse_script("next-page\ndown 0 1 1").expect_err("page 0 is invalid");
        assert!(err.to_string().contains("script line 2"));

        assert!(parse_script("drag 1 1").is_err());
        assert!(parse_script("key ctrl+").is_err());
        assert!(parse_script("up 1 1 1 meta").is_err());
        assert!(parse_script("bogus-command").is_err());
    }
}
