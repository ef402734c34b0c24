use once_cell::sync::Lazy;
use regex::Regex;

// Characters Windows refuses in file names, plus the control range.
// Stripped on every host; the path budget targets the same platform.
static INVALID_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new("[<>:\"/\\\\|?*\\x00-\\x1f]").unwrap());

/// One transcript entry: which audio file, who speaks it, and the spoken
/// text already formatted as a destination file name.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceLine {
    /// Hex token used verbatim as the source file's base name.
    pub hex_code: String,
    /// Speaking character, used as the destination folder name.
    pub character: String,
    /// Sanitized line text, used as the destination base file name.
    pub file_name: String,
}

/// Parses one transcript line into a [`VoiceLine`], or `None` when the line
/// carries no hex token or no `:` separator (header rows and the like).
pub fn parse_line(line: &str) -> Option<VoiceLine> {
    let tokens: Vec<&str> = line.split(' ').collect();

    // The first token containing ':' divides the speaker from the text, the
    // first token containing "0x0" names the source file. The ':' check
    // runs first, so a token matching both counts only as the separator.
    let mut separator_index = None;
    let mut hex_index = None;
    for (i, token) in tokens.iter().enumerate() {
        if token.is_empty() {
            continue;
        }
        if separator_index.is_none() && token.contains(':') {
            separator_index = Some(i);
        } else if hex_index.is_none() && token.contains("0x0") {
            hex_index = Some(i);
        }
    }
    let (hex_index, separator_index) = (hex_index?, separator_index?);

    // Tokens between the hex code and the separator (inclusive) name the
    // character, concatenated directly with any ':' stripped. When the hex
    // token comes after the separator this range is empty and the character
    // folder name is "".
    let mut character = String::new();
    for token in tokens.iter().take(separator_index + 1).skip(hex_index + 1) {
        if token.is_empty() {
            continue;
        }
        character.push_str(&token.replace(':', ""));
    }

    let file_name = tokens[separator_index + 1..]
        .iter()
        .filter(|token| !token.is_empty())
        .map(|token| strip_invalid_chars(token))
        .collect::<Vec<_>>()
        .join("_");

    Some(VoiceLine {
        hex_code: tokens[hex_index].to_string(),
        character,
        file_name,
    })
}

fn strip_invalid_chars(token: &str) -> String {
    INVALID_FILENAME_CHARS.replace_all(token, "").into_owned()
}
