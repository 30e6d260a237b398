//! Text transformations applied by each repair stage.

const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Strips surrounding whitespace, removes zero-width characters and the BOM,
/// and normalizes CRLF/CR line endings to LF.
pub fn cleanse(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .chars()
        .filter(|c| !ZERO_WIDTH.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_structural(c: char) -> bool {
    matches!(c, '{' | '}' | '[' | ']' | '"' | ':' | ',')
}

/// Collapses newlines and whitespace runs, then drops whitespace next to
/// structural characters.
pub(crate) fn compress(input: &str) -> String {
    let mut collapsed = String::with_capacity(input.len());
    let mut in_space = false;
    for c in input.chars() {
        if c.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
                in_space = true;
            }
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }

    let chars: Vec<char> = collapsed.trim().chars().collect();
    let mut out = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let prev_structural = i > 0 && is_structural(chars[i - 1]);
            let next_structural = chars.get(i + 1).copied().is_some_and(is_structural);
            if prev_structural || next_structural {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Bracket accounting for a candidate string. Characters inside string
/// literals are not counted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Balance {
    pub open_braces: usize,
    pub close_braces: usize,
    pub open_brackets: usize,
    pub close_brackets: usize,
    /// Openers left unmatched at end of input, outermost first.
    pub unclosed: Vec<char>,
}

impl Balance {
    pub(crate) fn scan(input: &str) -> Self {
        let mut balance = Balance::default();
        for_each_outside_strings(input, |c| match c {
            '{' => {
                balance.open_braces += 1;
                balance.unclosed.push('{');
            }
            '[' => {
                balance.open_brackets += 1;
                balance.unclosed.push('[');
            }
            '}' => {
                balance.close_braces += 1;
                if balance.unclosed.last() == Some(&'{') {
                    balance.unclosed.pop();
                }
            }
            ']' => {
                balance.close_brackets += 1;
                if balance.unclosed.last() == Some(&'[') {
                    balance.unclosed.pop();
                }
            }
            _ => {}
        });
        balance
    }

    fn brace_surplus(&self) -> usize {
        self.close_braces.saturating_sub(self.open_braces)
    }

    fn bracket_surplus(&self) -> usize {
        self.close_brackets.saturating_sub(self.open_brackets)
    }
}

/// Trims surplus closers from the tail, then appends closers for openers
/// that were never closed.
pub(crate) fn balance(input: &str) -> String {
    let before = Balance::scan(input);
    let mut brace_surplus = before.brace_surplus();
    let mut bracket_surplus = before.bracket_surplus();

    let mut out = input.to_string();
    while brace_surplus > 0 || bracket_surplus > 0 {
        match out.chars().next_back() {
            Some('}') if brace_surplus > 0 => brace_surplus -= 1,
            Some(']') if bracket_surplus > 0 => bracket_surplus -= 1,
            Some(c) if c.is_whitespace() => {}
            _ => break,
        }
        out.pop();
    }

    let after = Balance::scan(&out);
    for opener in after.unclosed.iter().rev() {
        out.push(if *opener == '{' { '}' } else { ']' });
    }

    tracing::trace!(
        open_braces = before.open_braces,
        close_braces = before.close_braces,
        open_brackets = before.open_brackets,
        close_brackets = before.close_brackets,
        appended = after.unclosed.len(),
        "balanced brackets"
    );
    out
}

/// Collapses runs of three or more `}` to two, restores the missing comma
/// after a closed `properties` object, then rebalances.
pub(crate) fn fix_patterns(input: &str) -> String {
    let mut collapsed = String::with_capacity(input.len());
    let mut run = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for c in input.chars() {
        if in_string {
            collapsed.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '}' {
            run += 1;
            if run <= 2 {
                collapsed.push(c);
            }
            continue;
        }
        run = 0;
        if c == '"' {
            in_string = true;
        }
        collapsed.push(c);
    }

    balance(&insert_missing_commas(&collapsed))
}

/// `}"` or `]"` outside a string is a closed value followed directly by the
/// next key; a truncated `properties` closure typically leaves exactly this.
fn insert_missing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev_closer = false;
    let mut in_string = false;
    let mut escaped = false;
    for c in input.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                prev_closer = false;
            }
            continue;
        }
        match c {
            '"' => {
                if prev_closer {
                    out.push(',');
                }
                in_string = true;
                prev_closer = false;
            }
            '}' | ']' => prev_closer = true,
            c if c.is_whitespace() => {}
            _ => prev_closer = false,
        }
        out.push(c);
    }
    out
}

fn for_each_outside_strings(input: &str, mut f: impl FnMut(char)) {
    let mut in_string = false;
    let mut escaped = false;
    for c in input.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else {
            f(c);
        }
    }
}
