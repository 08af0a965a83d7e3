//! Collision-free sibling names.

/// Return `desired` unchanged if no sibling uses it, else the first free
/// `base(n)ext` for n = 1, 2, ...
///
/// The extension starts at the last `.`, unless that dot is the first or last
/// character, in which case the whole name is the base.
pub fn unique_name<S: AsRef<str>>(siblings: &[S], desired: &str) -> String {
    let taken = |candidate: &str| siblings.iter().any(|s| s.as_ref() == candidate);
    if !taken(desired) {
        return desired.to_string();
    }

    let (base, extension) = split_extension(desired);
    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{}({}){}", base, counter, extension);
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Split at the last dot; the extension keeps the dot.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx < name.len() - 1 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}
