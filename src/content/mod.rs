//! Site content model.
//!
//! The whole site lives in one JSON [`Document`]: the admin users plus the
//! [`SiteContent`] sections the public pages render.
//!
//! ```text
//! Document
//! ├── users                      (identity, never served publicly)
//! └── SiteContent
//!     ├── hero, contact, servicesPage, contactPage, siteSettings   singletons, merged
//!     ├── stats, statsDescription                                  replaced wholesale
//!     ├── services, doctors, reviews, faqs                         collections, CRUD by id
//!     └── headerVisibility, footerVisibility                       replaced wholesale
//! ```
//!
//! Sections missing from a stored document are filled from [`defaults`] when
//! it is loaded, so older files pick up sections added later.

mod collection;
pub mod defaults;
mod document;

pub use collection::{next_record_id, Collection, Singleton, VisibilityArea};
pub use document::{
    Breakpoint, Document, Fields, Record, SiteContent, Stat, User, UserInfo, Visibility,
};
