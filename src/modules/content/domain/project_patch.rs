use serde::{Deserialize, Serialize};

use super::entities::Project;

//
// ──────────────────────────────────────────────────────────
// PatchField (explicit PATCH semantics)
// ──────────────────────────────────────────────────────────
// - Unset: field not provided => keep current value
// - Null: explicitly null => clear (only meaningful for optional fields)
// - Value(v): replace with v
//
// Omitted fields deserialize to Unset through #[serde(default)].
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatchField<T> {
    #[serde(skip)]
    Unset,
    Null,
    Value(T),
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Unset
    }
}

impl<T> PatchField<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, PatchField::Unset)
    }

    pub fn map_value<U>(self, f: impl FnOnce(T) -> U) -> PatchField<U> {
        match self {
            PatchField::Unset => PatchField::Unset,
            PatchField::Null => PatchField::Null,
            PatchField::Value(v) => PatchField::Value(f(v)),
        }
    }

    /// Applies the patch to an optional slot.
    pub fn apply_optional(self, slot: &mut Option<T>) {
        match self {
            PatchField::Unset => {}
            PatchField::Null => *slot = None,
            PatchField::Value(v) => *slot = Some(v),
        }
    }

    /// Applies the patch to a required slot. Null is ignored since the field
    /// cannot be absent.
    pub fn apply_required(self, slot: &mut T) {
        if let PatchField::Value(v) = self {
            *slot = v;
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// ProjectPatch
// ──────────────────────────────────────────────────────────
//

/// Partial project update. Identity and creation time are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default)]
    pub title: PatchField<String>,
    #[serde(default)]
    pub description: PatchField<String>,
    #[serde(default)]
    pub long_description: PatchField<String>,
    #[serde(default)]
    pub image: PatchField<String>,
    #[serde(default)]
    pub tags: PatchField<Vec<String>>,
    #[serde(default)]
    pub demo_link: PatchField<String>,
    #[serde(default)]
    pub code_link: PatchField<String>,
}

impl PatchField<String> {
    fn blank_as_null(self) -> Self {
        match self {
            PatchField::Value(v) if v.trim().is_empty() => PatchField::Null,
            other => other.map_value(|v| v.trim().to_string()),
        }
    }
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_unset()
            && self.description.is_unset()
            && self.long_description.is_unset()
            && self.image.is_unset()
            && self.tags.is_unset()
            && self.demo_link.is_unset()
            && self.code_link.is_unset()
    }

    /// Trims the title and links. A blank image or link clears it.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map_value(|t| t.trim().to_string()),
            image: self.image.blank_as_null(),
            demo_link: self.demo_link.blank_as_null(),
            code_link: self.code_link.blank_as_null(),
            ..self
        }
    }

    /// The title this patch would leave on `current`.
    pub fn resulting_title<'a>(&'a self, current: &'a Project) -> &'a str {
        match &self.title {
            PatchField::Value(title) => title,
            _ => &current.title,
        }
    }

    /// Merges the patch onto a copy of `current`. Timestamps are left to the
    /// caller.
    pub fn apply(self, current: &Project) -> Project {
        let mut next = current.clone();

        self.title.apply_required(&mut next.title);
        self.description.apply_required(&mut next.description);
        self.long_description
            .apply_required(&mut next.long_description);
        self.tags.apply_required(&mut next.tags);
        self.image.apply_optional(&mut next.image);
        self.demo_link.apply_optional(&mut next.demo_link);
        self.code_link.apply_optional(&mut next.code_link);

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn project() -> Project {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Project {
            id: "proj-1".to_string(),
            title: "Old".to_string(),
            description: "short".to_string(),
            long_description: "long".to_string(),
            image: Some("https://cdn.example.com/a.png".to_string()),
            tags: vec!["Rust".to_string()],
            demo_link: Some("https://demo.example.com".to_string()),
            code_link: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_omitted_fields_deserialize_as_unset() {
        let patch: ProjectPatch = serde_json::from_value(json!({ "title": "New" })).unwrap();

        assert_eq!(patch.title, PatchField::Value("New".to_string()));
        assert!(patch.image.is_unset());
        assert!(patch.tags.is_unset());
    }

    #[test]
    fn test_null_clears_optional_field() {
        let patch: ProjectPatch =
            serde_json::from_value(json!({ "image": null, "codeLink": "https://git.example.com" }))
                .unwrap();

        let next = patch.apply(&project());

        assert_eq!(next.image, None);
        assert_eq!(next.code_link.as_deref(), Some("https://git.example.com"));
        assert_eq!(next.demo_link.as_deref(), Some("https://demo.example.com"));
    }

    #[test]
    fn test_title_only_patch_keeps_everything_else() {
        let current = project();
        let patch = ProjectPatch {
            title: PatchField::Value("New".to_string()),
            ..Default::default()
        };

        let next = patch.apply(&current);

        assert_eq!(next.title, "New");
        assert_eq!(next.id, current.id);
        assert_eq!(next.created_at, current.created_at);
        assert_eq!(next.tags, current.tags);
        assert_eq!(next.image, current.image);
        assert_eq!(next.long_description, current.long_description);
    }

    #[test]
    fn test_null_on_required_field_is_ignored() {
        let patch = ProjectPatch {
            title: PatchField::Null,
            ..Default::default()
        };

        assert_eq!(patch.apply(&project()).title, "Old");
    }

    #[test]
    fn test_normalized_trims_and_clears_blanks() {
        let patch: ProjectPatch = serde_json::from_value(json!({
            "title": "  New  ",
            "demoLink": "   ",
            "codeLink": " https://git.example.com "
        }))
        .unwrap();

        let patch = patch.normalized();

        assert_eq!(patch.title, PatchField::Value("New".to_string()));
        assert_eq!(patch.demo_link, PatchField::Null);
        assert_eq!(
            patch.code_link,
            PatchField::Value("https://git.example.com".to_string())
        );
        assert!(patch.image.is_unset());
    }

    #[test]
    fn test_empty_patch_and_resulting_title() {
        assert!(ProjectPatch::default().is_empty());

        let current = project();
        let untouched = ProjectPatch {
            tags: PatchField::Value(vec![]),
            ..Default::default()
        };
        assert!(!untouched.is_empty());
        assert_eq!(untouched.resulting_title(&current), "Old");

        let renamed = ProjectPatch {
            title: PatchField::Value("New".to_string()),
            ..Default::default()
        };
        assert_eq!(renamed.resulting_title(&current), "New");
    }
}
