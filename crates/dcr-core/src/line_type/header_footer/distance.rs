//! Edit distance between line texts.

/// Minimum number of single-character insertions, deletions and substitutions
/// turning `a` into `b`.
///
/// Characters are Unicode scalar values, so accented letters count as one edit.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}
