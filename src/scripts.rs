//! SCRIPT-PARSER: tokenizes and parses the two ASCII auxiliary scripts.
//!
//! Both formats are one token per line, blank lines ignored; a leading
//! `_DEF_FILE` sentinel, zero or more records, and a closing `ENDFILE`.

use crate::error::{Error, Result};

/// An animset: an ordered list of animation symbols under one tag.
#[derive(Debug, Clone)]
pub struct AnimSet {
    pub tag: String,
    pub animations: Vec<String>,
}

/// An actor: a skeleton symbol paired with the animset that drives it.
#[derive(Debug, Clone)]
pub struct Actor {
    pub tag: String,
    pub skeleton_symbol: String,
    pub animset_tag: String,
    pub extra: [i32; 4],
}

fn tokens(text: &str) -> Vec<(usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect()
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::ScriptParse { line, message: message.into() }
}

/// Parse an `*_animsets.txt` script into its ordered animset records.
///
/// # Errors
/// Returns [`Error::ScriptParse`] on a malformed header, count, or missing
/// `ENDFILE` terminator.
pub fn parse_animsets(text: &str) -> Result<Vec<AnimSet>> {
    let toks = tokens(text);
    let mut i = 0;

    if toks.is_empty() || toks[0].1 != "ANIMSET_DEF_FILE" {
        return Err(parse_error(toks.first().map_or(1, |t| t.0), "expected ANIMSET_DEF_FILE"));
    }
    i += 1;

    let mut sets = Vec::new();
    while i < toks.len() && toks[i].1 != "ENDFILE" {
        let (line, tok) = toks[i];
        if tok != "ANIMSET_DEF" {
            return Err(parse_error(line, format!("expected ANIMSET_DEF, found {tok}")));
        }
        i += 1;

        let tag = toks
            .get(i)
            .ok_or_else(|| parse_error(line, "missing animset tag"))?
            .1
            .to_string();
        i += 1;

        let n: usize = toks
            .get(i)
            .ok_or_else(|| parse_error(line, "missing animset count"))?
            .1
            .parse()
            .map_err(|_| parse_error(line, "animset count is not an integer"))?;
        i += 1;

        let mut animations = Vec::with_capacity(n);
        for _ in 0..n {
            let (line, tok) = *toks.get(i).ok_or_else(|| parse_error(line, "missing animation symbol"))?;
            animations.push(tok.to_string());
            i += 1;
            let _ = line;
        }

        sets.push(AnimSet { tag, animations });
    }

    if i >= toks.len() || toks[i].1 != "ENDFILE" {
        return Err(parse_error(toks.last().map_or(1, |t| t.0), "missing ENDFILE"));
    }

    Ok(sets)
}

/// Parse an `*_actors.txt` script into its ordered actor records.
///
/// # Errors
/// Returns [`Error::ScriptParse`] on a malformed header, field, or missing
/// `ENDFILE` terminator.
pub fn parse_actors(text: &str) -> Result<Vec<Actor>> {
    let toks = tokens(text);
    let mut i = 0;

    if toks.is_empty() || toks[0].1 != "ACTOR_DEF_FILE" {
        return Err(parse_error(toks.first().map_or(1, |t| t.0), "expected ACTOR_DEF_FILE"));
    }
    i += 1;

    let mut actors = Vec::new();
    while i < toks.len() && toks[i].1 != "ENDFILE" {
        let (line, tok) = toks[i];
        if tok != "ACTOR_DEF" {
            return Err(parse_error(line, format!("expected ACTOR_DEF, found {tok}")));
        }
        i += 1;

        let field = |i: usize, what: &'static str| -> Result<&str> {
            toks.get(i).map(|t| t.1).ok_or_else(|| parse_error(line, format!("missing {what}")))
        };

        let tag = field(i, "actor tag")?.to_string();
        i += 1;
        let skeleton_symbol = field(i, "skeleton symbol")?.to_string();
        i += 1;
        let animset_tag = field(i, "animset tag")?.to_string();
        i += 1;

        let mut extra = [0i32; 4];
        for slot in &mut extra {
            let v: i32 = field(i, "actor integer field")?
                .parse()
                .map_err(|_| parse_error(line, "actor field is not an integer"))?;
            *slot = v;
            i += 1;
        }

        actors.push(Actor { tag, skeleton_symbol, animset_tag, extra });
    }

    if i >= toks.len() || toks[i].1 != "ENDFILE" {
        return Err(parse_error(toks.last().map_or(1, |t| t.0), "missing ENDFILE"));
    }

    Ok(actors)
}
