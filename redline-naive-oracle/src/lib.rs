//! A naive, simple oracle for differential testing.
//!
//! Works on plain strings only: no node identity, no formatting, no change
//! containers. The runs of a paragraph are joined into one string and the
//! first occurrence of the target is replaced there.

/// Text of the paragraph after replacing the first occurrence of `target`
/// in the joined run text. `None` when the target does not occur.
pub fn replace_first(runs: &[&str], target: &str, replacement: Option<&str>) -> Option<String> {
    if target.is_empty() {
        return None;
    }
    let joined = runs.concat();
    joined
        .contains(target)
        .then(|| joined.replacen(target, replacement.unwrap_or(""), 1))
}

/// The run holding byte `global` of the joined text, with the offset inside it.
/// Empty runs are never chosen.
pub fn run_at(runs: &[&str], global: usize) -> Option<(usize, usize)> {
    let mut consumed = 0;
    for (index, run) in runs.iter().enumerate() {
        if global < consumed + run.len() {
            return Some((index, global - consumed));
        }
        consumed += run.len();
    }
    None
}

/// Where `target` starts and ends (inclusive) as `(run, offset)` pairs.
pub fn first_hit(runs: &[&str], target: &str) -> Option<((usize, usize), (usize, usize))> {
    if target.is_empty() {
        return None;
    }
    let global = runs.concat().find(target)?;
    Some((
        run_at(runs, global)?,
        run_at(runs, global + target.len() - 1)?,
    ))
}

/// Three-way split by character count rather than byte offset.
pub fn split_chars(text: &str, a: usize, b: usize) -> (String, String, String) {
    let chars: Vec<char> = text.chars().collect();
    let b = b.min(chars.len());
    let a = a.min(b);
    (
        chars[..a].iter().collect(),
        chars[a..b].iter().collect(),
        chars[b..].iter().collect(),
    )
}
