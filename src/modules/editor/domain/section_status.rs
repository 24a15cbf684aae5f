use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Independently saved areas of the admin screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Projects,
    Skills,
    Hero,
    Bio,
    Experience,
    Education,
    Contact,
    Services,
    Footer,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Projects,
        Section::Skills,
        Section::Hero,
        Section::Bio,
        Section::Experience,
        Section::Education,
        Section::Contact,
        Section::Services,
        Section::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Hero => "hero",
            Section::Bio => "bio",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Contact => "contact",
            Section::Services => "services",
            Section::Footer => "footer",
        }
    }

    /// Toast shown after a successful settings save.
    pub fn saved_message(&self) -> &'static str {
        match self {
            Section::Projects => "Projects saved!",
            Section::Skills => "Skills saved!",
            Section::Hero => "Hero section saved!",
            Section::Bio => "Bio saved!",
            Section::Experience => "Experience saved!",
            Section::Education => "Education saved!",
            Section::Contact => "Contact info saved!",
            Section::Services => "Services saved!",
            Section::Footer => "Footer saved!",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three sections that all save the About document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AboutSection {
    #[default]
    Bio,
    Experience,
    Education,
}

impl From<AboutSection> for Section {
    fn from(section: AboutSection) -> Self {
        match section {
            AboutSection::Bio => Section::Bio,
            AboutSection::Experience => Section::Experience,
            AboutSection::Education => Section::Education,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
struct SectionState {
    in_flight: usize,
    toast: Option<Toast>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStatus {
    pub section: Section,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<Toast>,
}

/// Busy flag and last toast per section. Sections never share state.
#[derive(Debug, Clone, Default)]
pub struct SectionBoard {
    sections: Arc<Mutex<HashMap<Section, SectionState>>>,
}

/// Clears the section's busy flag when dropped, whether or not anyone is
/// still looking at the section.
pub struct BusyGuard {
    sections: Arc<Mutex<HashMap<Section, SectionState>>>,
    section: Section,
}

fn lock(
    sections: &Mutex<HashMap<Section, SectionState>>,
) -> MutexGuard<'_, HashMap<Section, SectionState>> {
    sections.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SectionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, section: Section) -> BusyGuard {
        lock(&self.sections).entry(section).or_default().in_flight += 1;
        BusyGuard {
            sections: self.sections.clone(),
            section,
        }
    }

    /// Posts a success toast and hands back the toast that was posted.
    pub fn succeed(&self, section: Section, message: impl Into<String>) -> Toast {
        self.toast(section, ToastKind::Success, message.into())
    }

    pub fn fail(&self, section: Section, message: impl Into<String>) -> Toast {
        self.toast(section, ToastKind::Error, message.into())
    }

    fn toast(&self, section: Section, kind: ToastKind, message: String) -> Toast {
        let toast = Toast {
            kind,
            message,
            at: Utc::now(),
        };
        lock(&self.sections).entry(section).or_default().toast = Some(toast.clone());
        toast
    }

    pub fn status(&self, section: Section) -> SectionStatus {
        let sections = lock(&self.sections);
        let state = sections.get(&section).cloned().unwrap_or_default();
        SectionStatus {
            section,
            busy: state.in_flight > 0,
            toast: state.toast,
        }
    }

    pub fn is_busy(&self, section: Section) -> bool {
        self.status(section).busy
    }

    /// Every section in display order.
    pub fn all(&self) -> Vec<SectionStatus> {
        Section::ALL.iter().map(|s| self.status(*s)).collect()
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if let Some(state) = lock(&self.sections).get_mut(&self.section) {
            state.in_flight = state.in_flight.saturating_sub(1);
        }
    }
}
