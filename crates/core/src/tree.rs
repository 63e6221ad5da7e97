//! Materialized-path arithmetic for category trees.
//!
//! A node's path is the concatenation of fixed-width steps, one per level,
//! written in base 36 (`0-9A-Z`). The first root is `0001`, its first child
//! `00010001`. Sorting paths lexicographically yields depth-first order, and
//! all descendants of a node share its path as a prefix.

use crate::error::CoreError;

/// Characters per tree level.
pub const STEP_LEN: usize = 4;

/// Digits used for each step, in ascending order.
const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest value a single step can hold (`ZZZZ`).
pub const MAX_STEP: u64 = 36 * 36 * 36 * 36 - 1;

/// Encode a step value as a zero-padded base-36 string.
pub fn encode_step(value: u64) -> Result<String, CoreError> {
    if value == 0 || value > MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Tree step {value} out of range 1..={MAX_STEP}"
        )));
    }
    let mut digits = [b'0'; STEP_LEN];
    let mut rest = value;
    for slot in digits.iter_mut().rev() {
        // rest % 36 is always < 36.
        *slot = ALPHABET[(rest % 36) as usize];
        rest /= 36;
    }
    Ok(String::from_utf8_lossy(&digits).into_owned())
}

/// Decode one step back into its numeric value.
pub fn decode_step(step: &str) -> Result<u64, CoreError> {
    if step.len() != STEP_LEN {
        return Err(CoreError::Validation(format!(
            "Tree step '{step}' must be {STEP_LEN} characters"
        )));
    }
    step.bytes().try_fold(0u64, |acc, b| {
        let digit = ALPHABET.iter().position(|&a| a == b).ok_or_else(|| {
            CoreError::Validation(format!("Invalid character in tree step '{step}'"))
        })?;
        Ok(acc * 36 + digit as u64)
    })
}

/// Depth of a node (roots are at depth 1).
pub fn depth(path: &str) -> i32 {
    i32::try_from(path.len() / STEP_LEN).unwrap_or(i32::MAX)
}

/// Path of the parent node, or `None` for roots.
pub fn parent_path(path: &str) -> Option<&str> {
    if path.len() <= STEP_LEN {
        None
    } else {
        Some(&path[..path.len() - STEP_LEN])
    }
}

/// Path of the sibling immediately after `path`.
pub fn next_sibling(path: &str) -> Result<String, CoreError> {
    if path.is_empty() || path.len() % STEP_LEN != 0 {
        return Err(CoreError::Validation(format!("Malformed tree path '{path}'")));
    }
    let split = path.len() - STEP_LEN;
    let last = decode_step(&path[split..])?;
    if last == MAX_STEP {
        return Err(CoreError::Validation(format!(
            "No room for another sibling after '{path}'"
        )));
    }
    Ok(format!("{}{}", &path[..split], encode_step(last + 1)?))
}

/// Path for a new root given the current last root, if any.
pub fn new_root_path(last_root: Option<&str>) -> Result<String, CoreError> {
    match last_root {
        Some(last) => next_sibling(last),
        None => encode_step(1),
    }
}

/// Path for a new last child of `parent` given its current last child.
pub fn new_child_path(parent: &str, last_child: Option<&str>) -> Result<String, CoreError> {
    match last_child {
        Some(last) => next_sibling(last),
        None => Ok(format!("{parent}{}", encode_step(1)?)),
    }
}

/// Whether `path` lies strictly below `ancestor`.
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.len() > ancestor.len() && path.starts_with(ancestor)
}
