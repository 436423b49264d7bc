use std::fmt::Display;

/// Verb used when forwarding to the caller's endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardMethod {
    Get,
    Post,
    /// anything else, including an absent or empty `method` parameter
    Unsupported,
}

impl ForwardMethod {
    /// parses the raw `method` query value, case-insensitively
    pub fn parse(raw: Option<&str>) -> ForwardMethod {
        match raw.map(str::to_uppercase).as_deref() {
            Some("GET") => ForwardMethod::Get,
            Some("POST") => ForwardMethod::Post,
            _ => ForwardMethod::Unsupported,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ForwardMethod::Get => "GET",
            ForwardMethod::Post => "POST",
            ForwardMethod::Unsupported => "UNSUPPORTED",
        }
    }
}

impl Display for ForwardMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
