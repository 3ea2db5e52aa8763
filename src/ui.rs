use std::io::{self, Write};

/// Display numbered options and return the 0-indexed choice. Entering `q`
/// (or hitting EOF) cancels and returns `None`; cancellation is a normal
/// early exit everywhere in the flow, never an error.
pub fn prompt_choice(question: &str, options: &[&str]) -> Option<usize> {
    println!("  {question}");
    for (i, opt) in options.iter().enumerate() {
        println!("    {}. {}", i + 1, opt);
    }

    loop {
        print!("  Choice (q to cancel): ");
        let _ = io::stdout().flush();

        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        let trimmed = buf.trim();
        if trimmed.eq_ignore_ascii_case("q") {
            return None;
        }
        match trimmed.parse::<usize>() {
            Ok(n) if n >= 1 && n <= options.len() => return Some(n - 1),
            _ => println!("  Enter a number between 1 and {}.", options.len()),
        }
    }
}

/// Yes/no prompt. Returns `default` when the user presses Enter.
pub fn prompt_yn(question: &str, default: bool) -> bool {
    let hint = if default { "Y/n" } else { "y/N" };
    print!("  {} ({hint}): ", question);
    let _ = io::stdout().flush();

    let mut buf = String::new();
    if io::stdin().read_line(&mut buf).is_err() {
        return default;
    }
    let trimmed = buf.trim().to_lowercase();
    if trimmed.is_empty() {
        return default;
    }
    matches!(trimmed.as_str(), "y" | "yes")
}

/// Read a single trimmed line from stdin. Returns `None` on EOF.
pub fn prompt_input(label: &str) -> Option<String> {
    print!("  {label}: ");
    let _ = io::stdout().flush();

    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}
