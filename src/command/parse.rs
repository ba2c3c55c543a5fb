use kurbo::Rect;

use crate::annotation::AnnotationType;
use crate::controller::{InteractionMode, TemporaryToolMode, ToolMode};
use crate::error::{AppError, AppResult};

use super::spec::find_command_spec;
use super::types::{ArgKind, Command, CommandSpec};

pub fn parse_command_text(input: &str) -> AppResult<Command> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_argument("command must not be empty"));
    }

    let (id, args_text) = match trimmed.find(char::is_whitespace) {
        Some(index) => (&trimmed[..index], trimmed[index..].trim_start()),
        None => (trimmed, ""),
    };

    let Some(spec) = find_command_spec(id) else {
        return Err(AppError::invalid_argument(format!("unknown command id: {id}")));
    };

    if id == "end-editing" {
        let contents = (!args_text.is_empty()).then(|| args_text.to_string());
        return Ok(Command::EndTextEditing { contents });
    }

    let args = Args::split(spec, args_text)?;
    match id {
        "tool-mode" => Ok(Command::SetToolMode {
            mode: args.parsed(0, ToolMode::parse)?,
        }),
        "annotation-mode" => Ok(Command::SetAnnotationMode {
            kind: args.parsed(0, AnnotationType::parse)?,
        }),
        "begin-temporary-mode" => Ok(Command::BeginTemporaryMode {
            mode: args.parsed(0, TemporaryToolMode::parse)?,
        }),
        "end-temporary-mode" => Ok(Command::EndTemporaryMode),
        "interaction-mode" => Ok(Command::SetInteractionMode {
            mode: args.parsed(0, InteractionMode::parse)?,
        }),
        "next-page" => Ok(Command::NextPage),
        "prev-page" => Ok(Command::PrevPage),
        "first-page" => Ok(Command::FirstPage),
        "last-page" => Ok(Command::LastPage),
        "goto-page" => Ok(Command::GotoPage {
            page: args.page_number(0)?,
        }),
        "set-zoom" => Ok(Command::SetZoom {
            value: args.number(0)?,
        }),
        "zoom-in" => Ok(Command::ZoomIn),
        "zoom-out" => Ok(Command::ZoomOut),
        "zoom-to-rect" => Ok(Command::ZoomToRect {
            page: args.page_number(0)?,
            rect: Rect::new(
                args.number(1)?,
                args.number(2)?,
                args.number(3)?,
                args.number(4)?,
            ),
        }),
        "toggle-reading-bar" => Ok(Command::ToggleReadingBar),
        "move-reading-bar" => Ok(Command::MoveReadingBar {
            page: args.page_number(0)?,
            line: args.page_number(1)?,
        }),
        "reading-bar-next-line" => Ok(Command::ReadingBarNextLine),
        "reading-bar-prev-line" => Ok(Command::ReadingBarPrevLine),
        "reading-bar-lines" => Ok(Command::SetReadingBarLines {
            lines: args.count(0)?,
        }),
        "toggle-pacer" => Ok(Command::TogglePacer),
        "pacer-speed" => Ok(Command::SetPacerSpeed {
            value: args.number(0)?,
        }),
        "pacer-step" => Ok(Command::PacerStep),
        "rewind" => Ok(Command::Rewind),
        "fence-history" => Ok(Command::FenceHistory),
        "reset-history" => Ok(Command::ResetHistory),
        "edit-annotation" => Ok(Command::EditCurrentAnnotation),
        "remove-annotation" => Ok(Command::RemoveCurrentAnnotation),
        "auto-size-annotation" => Ok(Command::AutoSizeCurrentAnnotation),
        "next-annotation" => Ok(Command::SelectNextAnnotation),
        "prev-annotation" => Ok(Command::SelectPrevAnnotation),
        "deselect-all" => Ok(Command::DeselectAll),
        "toggle-hide-notes" => Ok(Command::ToggleHideNotes),
        "cancel" => Ok(Command::Cancel),
        "quit" => Ok(Command::Quit),
        _ => Err(AppError::unsupported(
            "command parser is out of sync with registry",
        )),
    }
}

/// Whitespace-separated arguments checked against a registry entry.
struct Args<'a> {
    id: &'static str,
    values: Vec<&'a str>,
}

impl<'a> Args<'a> {
    fn split(spec: &CommandSpec, text: &'a str) -> AppResult<Self> {
        let values: Vec<&str> = text.split_whitespace().collect();
        let required = spec.args.iter().filter(|arg| arg.required).count();
        if values.len() < required || values.len() > spec.args.len() {
            return Err(AppError::invalid_argument(usage(spec)));
        }

        for (value, arg) in values.iter().zip(spec.args) {
            let valid = match arg.kind {
                ArgKind::F64 => value.parse::<f64>().is_ok_and(f64::is_finite),
                ArgKind::I32 => value.parse::<i32>().is_ok(),
                ArgKind::String => true,
            };
            if !valid {
                return Err(AppError::invalid_argument(format!(
                    "{} {} must be {}",
                    spec.id,
                    arg.name,
                    match arg.kind {
                        ArgKind::F64 => "a number",
                        ArgKind::I32 => "an integer",
                        ArgKind::String => "text",
                    }
                )));
            }
        }

        Ok(Self {
            id: spec.id,
            values,
        })
    }

    fn get(&self, index: usize) -> AppResult<&'a str> {
        self.values
            .get(index)
            .copied()
            .ok_or_else(|| AppError::invalid_argument(format!("{} is missing an argument", self.id)))
    }

    fn number(&self, index: usize) -> AppResult<f64> {
        self.get(index)?
            .parse::<f64>()
            .map_err(|_| AppError::invalid_argument(format!("{} expects a number", self.id)))
    }

    fn count(&self, index: usize) -> AppResult<usize> {
        let value = self
            .get(index)?
            .parse::<i32>()
            .map_err(|_| AppError::invalid_argument(format!("{} expects an integer", self.id)))?;
        if value < 1 {
            return Err(AppError::invalid_argument(format!(
                "{} expects a number >= 1",
                self.id
            )));
        }
        Ok(value as usize)
    }

    /// 1-based number converted to a 0-based index.
    fn page_number(&self, index: usize) -> AppResult<usize> {
        Ok(self.count(index)? - 1)
    }

    fn parsed<T>(&self, index: usize, parse: fn(&str) -> Option<T>) -> AppResult<T> {
        let value = self.get(index)?;
        parse(value).ok_or_else(|| {
            AppError::invalid_argument(format!("{}: unknown value {value}", self.id))
        })
    }
}

fn usage(spec: &CommandSpec) -> String {
    if spec.args.is_empty() {
        return format!("{} does not accept arguments", spec.id);
    }
    let names: Vec<String> = spec
        .args
        .iter()
        .map(|arg| {
            if arg.required {
                arg.name.to_string()
            } else {
                format!("[{}]", arg.name)
            }
        })
        .collect();
    format!("usage: {} {}", spec.id, names.join(" "))
}
