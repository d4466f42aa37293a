//! Turns a selection into the download link and the option board.

use serde::Serialize;
use std::fmt;

use crate::selection::{Choice, Selection, is_disabled};

/// Release-asset prefix of the libvips Windows builds. The version follows it.
pub const DOWNLOAD_PREFIX: &str = "https://github.com/libvips/build-win64-mxe/releases/download/v";

/// Archive filename for a selection, e.g. `vips-dev-w64-web-8.15.0.zip`.
pub fn filename(selection: &Selection) -> String {
    let suffix = selection
        .linking
        .suffix()
        .map(|s| format!("-{}", s))
        .unwrap_or_default();

    format!(
        "vips-dev-{}-{}-{}{}.zip",
        selection.architecture, selection.variant, selection.version, suffix
    )
}

/// The download anchor: link target plus title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadTarget {
    /// Archive filename, used as the anchor title.
    pub title: String,
    pub href: String,
}

impl DownloadTarget {
    pub fn new(selection: &Selection) -> Self {
        Self::with_prefix(selection, DOWNLOAD_PREFIX)
    }

    /// Builds the target under a different release-asset prefix (mirrors, tests).
    pub fn with_prefix(selection: &Selection, prefix: &str) -> Self {
        let title = filename(selection);
        let href = format!("{}{}/{}", prefix, selection.version, title);
        Self { title, href }
    }
}

impl fmt::Display for DownloadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.href)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionState {
    pub group: &'static str,
    pub value: &'static str,
    pub active: bool,
    pub disabled: bool,
}

/// Presentation state of every option button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionBoard {
    pub options: Vec<OptionState>,
}

impl OptionBoard {
    pub fn new(selection: &Selection) -> Self {
        let options = Choice::all()
            .map(|choice| OptionState {
                group: choice.group(),
                value: choice.value(),
                active: selection.is_selected(choice),
                disabled: is_disabled(selection, choice),
            })
            .collect();

        Self { options }
    }

    #[cfg(test)]
    pub fn get(&self, value: &str) -> Option<&OptionState> {
        self.options.iter().find(|o| o.value == value)
    }

    #[cfg(test)]
    pub fn active(&self) -> impl Iterator<Item = &OptionState> {
        self.options.iter().filter(|o| o.active)
    }

    #[cfg(test)]
    pub fn disabled(&self) -> impl Iterator<Item = &OptionState> {
        self.options.iter().filter(|o| o.disabled)
    }
}

/// One line per group: active options in brackets, disabled ones in parentheses.
///
/// ```text
/// architecture: w32 [w64] (arm64)
/// ```
impl fmt::Display for OptionBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current_group = None;

        for option in &self.options {
            if current_group != Some(option.group) {
                if current_group.is_some() {
                    writeln!(f)?;
                }
                write!(f, "{}:", option.group)?;
                current_group = Some(option.group);
            }

            match (option.active, option.disabled) {
                (true, _) => write!(f, " [{}]", option.value)?,
                (false, true) => write!(f, " ({})", option.value)?,
                (false, false) => write!(f, " {}", option.value)?,
            }
        }

        if current_group.is_some() {
            writeln!(f)?;
        }

        Ok(())
    }
}
