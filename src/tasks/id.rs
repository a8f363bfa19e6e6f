//! Task ID generation utilities.
//!
//! Task IDs are opaque, unique within a collection, and human-scannable:
//! a slug of the title plus a 4-character random hex suffix. The store
//! regenerates on collision, so duplicate titles still get distinct IDs.

/// Convert a title to a slug.
///
/// Lowercases ASCII alphanumerics, replaces everything else with hyphens,
/// collapses runs, trims edges, and truncates to 50 characters.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // Start true to avoid leading hyphen

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    if slug.len() > 50 {
        slug.truncate(50);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}

/// Generate a random 4-character hex suffix.
fn random_suffix() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let state = RandomState::new();
    let mut hasher = state.build_hasher();
    // Truncation is intentional - we only need entropy, not precision
    #[allow(clippy::cast_possible_truncation)]
    hasher.write_u64(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64),
    );
    let hash = hasher.finish();
    format!("{:04x}", hash & 0xFFFF)
}

/// Generate a task ID from a title, unique against the given predicate.
///
/// The ID is the slugified title plus a 4-character random hex suffix;
/// suffixes are redrawn while `taken` reports a collision.
pub fn generate_task_id(title: &str, mut taken: impl FnMut(&str) -> bool) -> String {
    let slug = slugify(title);
    let base = if slug.is_empty() { "task" } else { slug.as_str() };

    loop {
        let candidate = format!("{base}-{}", random_suffix());
        if !taken(&candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Buy milk"), "buy-milk");
        assert_eq!(slugify("simple"), "simple");
    }

    #[test]
    fn test_slugify_special_characters() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Finish: the report (today)"), "finish-the-report-today");
    }

    #[test]
    fn test_slugify_empty_and_symbols() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_truncates() {
        let long = "a".repeat(80);
        assert_eq!(slugify(&long).len(), 50);
    }

    #[test]
    fn test_generate_id_has_suffix() {
        let id = generate_task_id("Buy milk", |_| false);
        assert!(id.starts_with("buy-milk-"));
        let suffix = id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_id_empty_title_uses_placeholder() {
        let id = generate_task_id("!!!", |_| false);
        assert!(id.starts_with("task-"));
    }

    #[test]
    fn test_generate_id_retries_on_collision() {
        let mut seen = HashSet::new();
        for _ in 0..20 {
            let id = generate_task_id("same title", |candidate| seen.contains(candidate));
            assert!(seen.insert(id));
        }
        assert_eq!(seen.len(), 20);
    }
}
