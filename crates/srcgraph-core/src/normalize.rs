//! Type-string canonicalization.
//!
//! Structurally equivalent references must compare equal before they are
//! checked against the internal universe: a single-argument generic
//! container is transparent (the element type, not the container, drives
//! dependency edges), a multi-argument generic collapses to its bare
//! name, and array markers are stripped for universe lookups only.

/// Canonicalize a raw or resolved type string.
///
/// Runs to a fixpoint, so `normalize_type(normalize_type(s)) ==
/// normalize_type(s)` holds for every input, including nested generics
/// like `List<Set<User>>`.
pub fn normalize_type(s: &str) -> String {
    let mut current = s.trim().to_string();
    loop {
        let Some(open) = current.find('<') else { break };
        let Some(close) = current.rfind('>') else { break };
        if close <= open {
            break;
        }
        let inside = current[open + 1..close].trim();
        if !inside.is_empty() && !has_top_level_comma(inside) {
            // single type argument: the container is transparent
            current = inside.to_string();
        } else {
            // multiple or empty arguments: keep the bare name
            current = current[..open].trim_end().to_string();
        }
    }
    current
}

fn has_top_level_comma(s: &str) -> bool {
    let mut depth: i32 = 0;
    for c in s.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// Strip array markers for internal-universe lookups. The strings
/// recorded on entities may keep them.
pub fn strip_array(s: &str) -> String {
    s.replace("[]", "").trim().to_string()
}

/// Trailing array markers of a type string (`""` for scalar types).
pub fn array_suffix(s: &str) -> String {
    "[]".repeat(s.matches("[]").count())
}

/// Last `.`/`$` segment of a type or FQN, array markers removed.
pub fn simple_name(s: &str) -> String {
    let stripped = strip_array(s);
    match stripped.rfind(['.', '$']) {
        Some(i) => stripped[i + 1..].to_string(),
        None => stripped,
    }
}
