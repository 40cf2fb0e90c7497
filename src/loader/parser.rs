//! Parse one entry into name and value.
use lazy_static::lazy_static;
use regex::Regex;

use crate::{DotenvError, NOT_POSSIBLE};

/// Parsed value, with byte offsets of `$` which may start a nested variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Value {
    chars: String,
    vars: Vec<usize>,
}

impl Value {
    fn append(&mut self, c: char, var: bool) {
        if var {
            self.vars.push(self.chars.len());
        }
        self.chars.push(c);
    }

    pub(crate) fn into_parts(self) -> (String, Vec<usize>) {
        (self.chars, self.vars)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Initial,
    Unquoted,
    SingleQuoted,
    DoubleQuoted,
    Escape,
    Whitespace,
    Comment,
}

fn is_space(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Returns the char to append (if any), whether it may start a variable,
/// and the next state.
fn process_char(state: State, c: char) -> Result<(Option<char>, bool, State), &'static str> {
    Ok(match state {
        State::Initial => match c {
            '\'' => (None, false, State::SingleQuoted),
            '"' => (None, false, State::DoubleQuoted),
            '#' => (None, false, State::Comment),
            '$' => (Some(c), true, State::Unquoted),
            _ => (Some(c), false, State::Unquoted),
        },
        State::Unquoted => match c {
            '#' => (None, false, State::Comment),
            '$' => (Some(c), true, State::Unquoted),
            _ if is_space(c) => (None, false, State::Whitespace),
            _ => (Some(c), false, State::Unquoted),
        },
        State::SingleQuoted => match c {
            '\'' => (None, false, State::Whitespace),
            _ => (Some(c), false, State::SingleQuoted),
        },
        State::DoubleQuoted => match c {
            '"' => (None, false, State::Whitespace),
            '\\' => (None, false, State::Escape),
            '$' => (Some(c), true, State::DoubleQuoted),
            _ => (Some(c), false, State::DoubleQuoted),
        },
        State::Escape => match c {
            '"' | '\\' | '$' => (Some(c), false, State::DoubleQuoted),
            'f' => (Some('\x0c'), false, State::DoubleQuoted),
            'n' => (Some('\n'), false, State::DoubleQuoted),
            'r' => (Some('\r'), false, State::DoubleQuoted),
            't' => (Some('\t'), false, State::DoubleQuoted),
            'v' => (Some('\x0b'), false, State::DoubleQuoted),
            _ => return Err("an unexpected escape sequence"),
        },
        State::Whitespace => match c {
            '#' => (None, false, State::Comment),
            _ if is_space(c) => (None, false, State::Whitespace),
            _ => return Err("unexpected whitespace"),
        },
        State::Comment => (None, false, State::Comment),
    })
}

fn split_into_parts(entry: &str) -> Result<(&str, Option<&str>), DotenvError> {
    let (name, value) = match entry.find('=') {
        Some(pos) => (entry[..pos].trim(), Some(entry[pos + 1..].trim())),
        None => (entry, None),
    };
    if name.is_empty() {
        return Err(DotenvError::parse_fail("an unexpected equals", entry));
    }
    Ok((name, value))
}

fn parse_name(name: &str) -> Result<String, DotenvError> {
    lazy_static! {
        static ref NAME: Regex = Regex::new(r"\A[a-zA-Z0-9_.]+\z").expect(NOT_POSSIBLE);
    }
    let name = name
        .replace("export ", "")
        .replace(&['\'', '"'][..], "")
        .trim()
        .to_owned();
    if !NAME.is_match(&name) {
        return Err(DotenvError::parse_fail("an invalid name", &name));
    }
    Ok(name)
}

fn parse_value(value: &str) -> Result<Value, DotenvError> {
    let mut output = Value::default();
    let mut state = State::Initial;
    for c in value.chars() {
        let (ch, var, next) =
            process_char(state, c).map_err(|cause| DotenvError::parse_fail(cause, value))?;
        if let Some(ch) = ch {
            output.append(ch, var);
        }
        state = next;
    }
    match state {
        State::SingleQuoted | State::DoubleQuoted | State::Escape => Err(
            DotenvError::parse_fail("a missing closing quote", value),
        ),
        _ => Ok(output),
    }
}

/// Parse entry, a missing `=` gives a name without value.
pub(crate) fn parse(entry: &str) -> Result<(String, Option<Value>), DotenvError> {
    let (name, value) = split_into_parts(entry)?;
    let name = parse_name(name)?;
    let value = match value {
        Some(v) => Some(parse_value(v)?),
        None => None,
    };
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(entry: &str) -> Option<String> {
        parse(entry).unwrap().1.map(|v| v.into_parts().0)
    }

    fn error(entry: &str) -> String {
        parse(entry).unwrap_err().to_string()
    }

    #[test]
    fn name_test() {
        assert_eq!("A", parse("A=1").unwrap().0);
        assert_eq!("A", parse("export A=1").unwrap().0);
        assert_eq!("A.B_c", parse("  'A.B_c' = 1").unwrap().0);
        assert_eq!("A", parse("\"A\"=1").unwrap().0);
        assert_eq!(
            "Failed to parse dotenv file due to an invalid name. Failed at [A B].",
            error("A B=1")
        );
        assert_eq!(
            "Failed to parse dotenv file due to an unexpected equals. Failed at [=1].",
            error("=1")
        );
    }

    #[test]
    fn value_test() {
        assert_eq!(None, value("A"));
        assert_eq!(Some("".to_owned()), value("A="));
        assert_eq!(Some("".to_owned()), value("A=   "));
        assert_eq!(Some("bar".to_owned()), value("A=bar"));
        assert_eq!(Some("bar".to_owned()), value("A=bar # comment"));
        assert_eq!(Some("".to_owned()), value("A=# comment"));
        assert_eq!(Some("a=b".to_owned()), value("A=a=b"));
        assert_eq!(Some("with spaces".to_owned()), value("A='with spaces'"));
        assert_eq!(Some("with spaces".to_owned()), value("A=\"with spaces\""));
        assert_eq!(Some("#not".to_owned()), value("A=\"#not\" # yes"));
        assert_eq!(Some("${raw}".to_owned()), value("A='${raw}'"));
    }

    #[test]
    fn escape_test() {
        assert_eq!(Some("a\"b".to_owned()), value("A=\"a\\\"b\""));
        assert_eq!(Some("a\\b".to_owned()), value("A=\"a\\\\b\""));
        assert_eq!(Some("a\nb\tc".to_owned()), value("A=\"a\\nb\\tc\""));
        assert_eq!(Some("$x".to_owned()), value("A=\"\\$x\""));
        assert_eq!(Some("a\\nb".to_owned()), value("A='a\\nb'"));
        assert_eq!(
            "Failed to parse dotenv file due to an unexpected escape sequence. Failed at [\"\\q\"].",
            error("A=\"\\q\"")
        );
    }

    #[test]
    fn error_test() {
        assert_eq!(
            "Failed to parse dotenv file due to unexpected whitespace. Failed at [foo bar].",
            error("A=foo bar")
        );
        assert_eq!(
            "Failed to parse dotenv file due to unexpected whitespace. Failed at [\"foo\" bar].",
            error("A=\"foo\" bar")
        );
        assert_eq!(
            "Failed to parse dotenv file due to a missing closing quote. Failed at [\"foo].",
            error("A=\"foo")
        );
        assert_eq!(
            "Failed to parse dotenv file due to a missing closing quote. Failed at ['foo].",
            error("A='foo")
        );
    }

    #[test]
    fn vars_test() {
        let (_, v) = parse("A=${B}-x").unwrap();
        assert_eq!(
            ("${B}-x".to_owned(), vec![0]),
            v.unwrap().into_parts()
        );
        let (_, v) = parse("A=\"${B} \\${C} ${D}\"").unwrap();
        assert_eq!(
            ("${B} ${C} ${D}".to_owned(), vec![0, 10]),
            v.unwrap().into_parts()
        );
        let (_, v) = parse("A='${B}'").unwrap();
        assert_eq!(Vec::<usize>::new(), v.unwrap().into_parts().1);
    }

    #[test]
    fn multiline_test() {
        assert_eq!(Some("one\ntwo".to_owned()), value("A=\"one\ntwo\""));
    }
}
