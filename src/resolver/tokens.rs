//! Partition of a token stream by the currently registered flags

use crate::registration::ArgumentSpec;

/// Tokens addressed to registered flags, and everything else in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSplit {
    /// Flags known to the registrar with their value tokens
    pub known: Vec<String>,
    /// Unrecognized tokens, kept for the next pass
    pub leftover: Vec<String>,
}

/// Split `tokens` into those addressed to `specs` and the rest.
///
/// Scalar and selector flags take one value token, sequence flags take every
/// token up to the next `--` token. `--name=value` carries its own value.
/// A bare `--` ends flag recognition.
pub fn split_known(tokens: &[String], specs: &[ArgumentSpec]) -> TokenSplit {
    let mut split = TokenSplit::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--" {
            split.leftover.extend(tokens[i..].iter().cloned());
            break;
        }

        let spec = token.strip_prefix("--").and_then(|body| {
            let name = body.split_once('=').map(|(n, _)| n).unwrap_or(body);
            specs.iter().find(|s| s.flag == name)
        });

        let Some(spec) = spec else {
            split.leftover.push(token.clone());
            i += 1;
            continue;
        };

        split.known.push(token.clone());
        i += 1;
        if token.contains('=') {
            continue;
        }
        if spec.takes_many() {
            while i < tokens.len() && !tokens[i].starts_with("--") {
                split.known.push(tokens[i].clone());
                i += 1;
            }
        } else if i < tokens.len() && !tokens[i].starts_with("--") {
            split.known.push(tokens[i].clone());
            i += 1;
        }
    }
    split
}
