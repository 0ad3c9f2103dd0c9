use crate::{ControlError, Result};

/// One element of a parsed BER-lite format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Integer,        // i
    Boolean,        // b
    String,         // s, a
    Octets,         // o
    OptionalOctets, // O
    Enumerated,     // e
    Tag,            // t
    Begin,          // {
    End,            // }
}

impl Token {
    pub fn symbol(self) -> char {
        match self {
            Token::Integer => 'i',
            Token::Boolean => 'b',
            Token::String => 's',
            Token::Octets => 'o',
            Token::OptionalOctets => 'O',
            Token::Enumerated => 'e',
            Token::Tag => 't',
            Token::Begin => '{',
            Token::End => '}',
        }
    }
}

pub fn parse_format(format: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::with_capacity(format.len());
    let mut depth = 0usize;
    let mut pending_tag = false;

    for (pos, ch) in format.char_indices() {
        let token = match ch {
            'i' => Token::Integer,
            'b' => Token::Boolean,
            's' | 'a' => Token::String,
            'o' => Token::Octets,
            'O' => Token::OptionalOctets,
            'e' => Token::Enumerated,
            't' => Token::Tag,
            '{' => Token::Begin,
            '}' => Token::End,
            c if c.is_whitespace() => continue,
            other => {
                return Err(ControlError::Format(format!(
                    "unknown format character '{}' at position {} in \"{}\"",
                    other, pos, format
                )));
            }
        };

        match token {
            Token::Begin => depth += 1,
            Token::End => {
                if depth == 0 {
                    return Err(ControlError::Format(format!(
                        "unbalanced '}}' at position {} in \"{}\"",
                        pos, format
                    )));
                }
                if pending_tag {
                    return Err(ControlError::Format(format!(
                        "tag at end of sequence in \"{}\"",
                        format
                    )));
                }
                depth -= 1;
            }
            Token::Tag if pending_tag => {
                return Err(ControlError::Format(format!(
                    "two consecutive tags at position {} in \"{}\"",
                    pos, format
                )));
            }
            _ => {}
        }

        pending_tag = token == Token::Tag;
        tokens.push(token);
    }

    if depth != 0 {
        return Err(ControlError::Format(format!("unclosed '{{' in \"{}\"", format)));
    }
    if pending_tag {
        return Err(ControlError::Format(format!(
            "trailing tag without element in \"{}\"",
            format
        )));
    }

    Ok(tokens)
}
