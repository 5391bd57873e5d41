use std::ops::Range;

use rill_core::Coord;

use crate::command::{Command, SpannedCommand};
use crate::error::{ScriptError, ScriptResult};
use crate::lexer::{Token, lex};

/// Parse script source into a command list.
///
/// Statements are separated by newlines or semicolons; each is one command
/// word plus at most one argument. The first syntax error aborts the parse.
pub fn parse(source: &str) -> ScriptResult<Vec<SpannedCommand>> {
    let tokens = lex(source)?;
    let mut commands = Vec::new();

    for statement in tokens.split(|(token, _)| *token == Token::Separator) {
        if statement.is_empty() {
            continue;
        }
        commands.push(parse_statement(statement)?);
    }
    Ok(commands)
}

fn parse_statement(statement: &[(Token, Range<usize>)]) -> ScriptResult<SpannedCommand> {
    let (first, first_span) = &statement[0];
    let Token::Word(name) = first else {
        return Err(ScriptError::ExpectedCommand {
            span: first_span.clone(),
        });
    };

    let args = &statement[1..];
    let span = first_span.start..statement[statement.len() - 1].1.end;

    let command = match name.as_str() {
        "level" => Command::Level(word_arg(name, first_span, args)?),
        "wait" | "step" | "steps" | "tick" => {
            Command::Wait(opt_int_arg(name, first_span, args)?.unwrap_or(1))
        }
        "wait_ms" | "sleep" => Command::WaitMs(int_arg(name, first_span, args)?),
        "add" | "wall" | "wall+" => Command::AddWall(coord_arg(name, first_span, args)?),
        "remove" | "rm" | "del" | "wall-" => {
            Command::RemoveWall(coord_arg(name, first_span, args)?)
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                name: name.clone(),
                span: first_span.clone(),
            });
        }
    };

    Ok(SpannedCommand { command, span })
}

fn expect_single<'a>(
    name: &str,
    what: &str,
    cmd_span: &Range<usize>,
    args: &'a [(Token, Range<usize>)],
) -> ScriptResult<&'a (Token, Range<usize>)> {
    match args {
        [arg] => Ok(arg),
        [] => Err(ScriptError::BadArgument {
            message: format!("{name} expects {what}"),
            span: cmd_span.clone(),
        }),
        [_, (_, extra_span), ..] => Err(ScriptError::BadArgument {
            message: format!("{name} expects a single argument"),
            span: extra_span.clone(),
        }),
    }
}

fn word_arg(
    name: &str,
    cmd_span: &Range<usize>,
    args: &[(Token, Range<usize>)],
) -> ScriptResult<String> {
    match expect_single(name, "a level name", cmd_span, args)? {
        (Token::Word(level), _) => Ok(level.clone()),
        (other, span) => Err(ScriptError::BadArgument {
            message: format!("{name} expects a level name, got '{other}'"),
            span: span.clone(),
        }),
    }
}

fn int_arg(
    name: &str,
    cmd_span: &Range<usize>,
    args: &[(Token, Range<usize>)],
) -> ScriptResult<u64> {
    match expect_single(name, "a number", cmd_span, args)? {
        (Token::Int(value), _) => Ok(*value),
        (other, span) => Err(ScriptError::BadArgument {
            message: format!("{name} expects a number, got '{other}'"),
            span: span.clone(),
        }),
    }
}

fn opt_int_arg(
    name: &str,
    cmd_span: &Range<usize>,
    args: &[(Token, Range<usize>)],
) -> ScriptResult<Option<u64>> {
    if args.is_empty() {
        return Ok(None);
    }
    int_arg(name, cmd_span, args).map(Some)
}

fn coord_arg(
    name: &str,
    cmd_span: &Range<usize>,
    args: &[(Token, Range<usize>)],
) -> ScriptResult<Coord> {
    match expect_single(name, "a coordinate like '3,4'", cmd_span, args)? {
        (Token::Coord(x, y), _) => Ok(Coord::new(*x, *y)),
        (other, span) => Err(ScriptError::BadArgument {
            message: format!("{name} expects a coordinate like '3,4', got '{other}'"),
            span: span.clone(),
        }),
    }
}
