//! The solver's `head` file describing when and where a save was produced.
//!
//! ```text
//! Created   :Sat Oct 18 09:30:00 2025
//! Host      :workstation
//! User      :analyst
//! ```

use std::path::Path;

use jiff::civil::DateTime;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveHeader {
    pub created: Option<DateTime>,
    pub host: Option<String>,
    pub user: Option<String>,
}

impl SaveHeader {
    pub fn parse(text: &str) -> Self {
        let mut header = SaveHeader::default();
        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "Created" => header.created = parse_asctime(value),
                "Host" => header.host = Some(value.to_string()),
                "User" => header.user = Some(value.to_string()),
                other => tracing::debug!(key = other, "Ignoring unknown header field"),
            }
        }
        header
    }

    /// Read the header file if the save contains one.
    pub fn load(path: &Path) -> Option<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Some(Self::parse(&text)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No save header");
                None
            }
        }
    }
}

/// Parse C `asctime` output, e.g. `Sat Oct  4 09:30:00 2025`.
fn parse_asctime(value: &str) -> Option<DateTime> {
    let normalized = value.split_whitespace().collect::<Vec<_>>().join(" ");
    match jiff::fmt::strtime::parse("%a %b %d %H:%M:%S %Y", &normalized)
        .and_then(|tm| tm.to_datetime())
    {
        Ok(datetime) => Some(datetime),
        Err(e) => {
            tracing::warn!(value, error = %e, "Unparsable save timestamp");
            None
        }
    }
}
