use ratatui::{
    style::Stylize,
    text::{Line, Span},
};

#[derive(Debug, Clone)]
pub struct UsageInfoLine {
    pub keys: Vec<String>,
    pub description: String,
}

impl UsageInfoLine {
    pub fn new(keys: &[&str], description: &str) -> Self {
        UsageInfoLine {
            keys: keys.iter().map(|key| key.to_string()).collect(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UsageInfo {
    pub description: Option<String>,
    pub lines: Vec<UsageInfoLine>,
}

pub trait HasUsageInfo {
    fn usage_info(&self) -> UsageInfo;
}

fn key_to_span<'a>(key: &str) -> Span<'a> {
    Span::from(format!("({})", key)).bold()
}

/// Key bindings on a single line, the footer has no room for more
pub fn usage_to_line<'a>(usage: UsageInfo) -> Line<'a> {
    let mut spans: Vec<Span> = vec![];
    if let Some(description) = usage.description {
        spans.push(Span::from(format!("{}: ", description)).italic());
    }

    for (idx, line) in usage.lines.into_iter().enumerate() {
        if idx > 0 {
            spans.push("  ".into());
        }

        for (key_idx, key) in line.keys.iter().enumerate() {
            if key_idx > 0 {
                spans.push("/".into());
            }
            spans.push(key_to_span(key));
        }

        spans.push(Span::from(format!(" {}", line.description)));
    }

    Line::from(spans)
}
