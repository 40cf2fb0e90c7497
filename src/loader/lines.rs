//! Group physical lines into entries.

fn looks_like_multiline_start(line: &str) -> bool {
    line.contains("=\"") && !looks_like_multiline_stop(line, true)
}

/// Count unescaped double quotes which are not the first character,
/// a started line needs two of them to be closed.
fn looks_like_multiline_stop(line: &str, started: bool) -> bool {
    if line == "\"" {
        return true;
    }
    let chars: Vec<char> = line.replace("\\\\", "").chars().collect();
    let quotes = chars
        .windows(2)
        .filter(|pair| pair[0] != '\\' && pair[1] == '"')
        .count();
    quotes + if started { 0 } else { 1 } > 1
}

fn is_comment_or_whitespace(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty() || line.starts_with('#')
}

/// Join multi-line double quoted values, drop blank and comment lines.
/// An unterminated multi-line value is kept so that parsing reports it.
pub(crate) fn process(lines: &[&str]) -> Vec<String> {
    let mut output = vec![];
    let mut buffer: Vec<&str> = vec![];
    for line in lines.iter() {
        let started = looks_like_multiline_start(line);
        if started || !buffer.is_empty() {
            buffer.push(line);
            if looks_like_multiline_stop(line, started) {
                output.push(buffer.join("\n"));
                buffer.clear();
            }
        } else if !is_comment_or_whitespace(line) {
            output.push((*line).to_owned());
        }
    }
    if !buffer.is_empty() {
        output.push(buffer.join("\n"));
    }
    output
}
