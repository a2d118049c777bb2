use once_cell::sync::Lazy;
use regex::Regex;

/// One operation in the code vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    NewSection,
    SelectSection,
    NewPage,
    SelectPage,
    NewContext,
    SelectContext,
    NewItem,
    Done,
    RemoveDoneContext,
    RemoveDonePage,
    Sort,
    Import,
    Export,
    Help,
}

/// A code token with its meaning, as shown by `help`
pub struct CodeInfo {
    pub token: &'static str,
    pub code: Code,
    pub description: &'static str,
}

/// The full code table. `im`/`ex` have long-form aliases; every entry is
/// its own row so `help` shows exactly what the parser accepts.
pub const CODES: &[CodeInfo] = &[
    CodeInfo {
        token: "ns",
        code: Code::NewSection,
        description: "create a new section",
    },
    CodeInfo {
        token: "s",
        code: Code::SelectSection,
        description: "select a section by title",
    },
    CodeInfo {
        token: "np",
        code: Code::NewPage,
        description: "create a new page in the selected section",
    },
    CodeInfo {
        token: "p",
        code: Code::SelectPage,
        description: "select a page by title",
    },
    CodeInfo {
        token: "nc",
        code: Code::NewContext,
        description: "create a new context (todo, ol, or ul)",
    },
    CodeInfo {
        token: "c",
        code: Code::SelectContext,
        description: "select a context by title",
    },
    CodeInfo {
        token: "n",
        code: Code::NewItem,
        description: "add an item to the selected context",
    },
    CodeInfo {
        token: "d",
        code: Code::Done,
        description: "mark a todo done",
    },
    CodeInfo {
        token: "rc",
        code: Code::RemoveDoneContext,
        description: "remove done todos from the selected context",
    },
    CodeInfo {
        token: "rp",
        code: Code::RemoveDonePage,
        description: "remove done todos from the selected page",
    },
    CodeInfo {
        token: "sort",
        code: Code::Sort,
        description: "sort the selected context's items by title",
    },
    CodeInfo {
        token: "im",
        code: Code::Import,
        description: "import notebook data from the clipboard",
    },
    CodeInfo {
        token: "import",
        code: Code::Import,
        description: "import notebook data from the clipboard",
    },
    CodeInfo {
        token: "ex",
        code: Code::Export,
        description: "export the notebook to the clipboard",
    },
    CodeInfo {
        token: "export",
        code: Code::Export,
        description: "export the notebook to the clipboard",
    },
    CodeInfo {
        token: "help",
        code: Code::Help,
        description: "show this code table",
    },
];

impl Code {
    /// The primary (shortest) token for this code
    pub fn token(self) -> &'static str {
        for info in CODES {
            if info.code == self {
                return info.token;
            }
        }
        unreachable!("every code has a table entry")
    }
}

/// The outcome of splitting raw input: an optional leading code and the
/// optional text after it. No code means the whole input is free text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedInput {
    pub code: Option<Code>,
    pub additional: Option<String>,
}

// Tokens are alternated longest-first so a short code never truncates a
// longer one ("np" vs "n", "import" vs "im").
static CODE_RE: Lazy<Regex> = Lazy::new(|| {
    let mut tokens: Vec<&str> = CODES.iter().map(|info| info.token).collect();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    Regex::new(&format!(r"^({})\b ?(.+)?$", tokens.join("|"))).expect("valid code regex")
});

/// Split raw input into `{code?, additional?}`. The remainder is trimmed;
/// an all-whitespace remainder counts as absent.
pub fn parse_input(raw: &str) -> ParsedInput {
    let Some(caps) = CODE_RE.captures(raw) else {
        return ParsedInput::default();
    };
    let token = &caps[1];
    let code = CODES
        .iter()
        .find(|info| info.token == token)
        .map(|info| info.code);
    let additional = caps
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    ParsedInput { code, additional }
}

/// The sorted `code  description` block shown by `help` and `jt codes`
pub fn help_text() -> String {
    let width = CODES.iter().map(|info| info.token.len()).max().unwrap_or(0);
    let mut rows: Vec<&CodeInfo> = CODES.iter().collect();
    rows.sort_by(|a, b| a.token.cmp(b.token));
    let mut out = String::new();
    for info in rows {
        out.push_str(&format!(
            "{:width$}  {}\n",
            info.token,
            info.description,
            width = width
        ));
    }
    out
}
