pub mod achievement;
pub mod announcement;
pub mod election_document;
pub mod gallery_item;
pub mod media_coverage;
pub mod panel_member;
pub mod registration;

pub use achievement::Entity as Achievement;
pub use announcement::Entity as Announcement;
pub use election_document::Entity as ElectionDocument;
pub use gallery_item::Entity as GalleryItem;
pub use media_coverage::Entity as MediaCoverage;
pub use panel_member::Entity as PanelMember;
pub use registration::Entity as Registration;
