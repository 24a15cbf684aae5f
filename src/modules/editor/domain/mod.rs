pub mod drafts;
pub mod section_status;

pub use drafts::{
    AboutDraft, CategoryDraft, ContactDraft, FooterDraft, HeroDraft, ProjectDraft, ServicesDraft,
    ValidationError,
};
pub use section_status::{AboutSection, Section, SectionBoard, SectionStatus, Toast, ToastKind};
