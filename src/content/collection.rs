//! Section kinds and the edit operations applied to them.
//!
//! Collections are edited record-by-record, singletons are shallow-merged,
//! stats and visibility maps are replaced wholesale.

use std::fmt;

use crate::error::ContentError;

use super::document::{Fields, Record, SiteContent, Stat, Visibility};

// =============================================================================
// Section Kinds
// =============================================================================

/// Collection sections: ordered lists of identified records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Services,
    Doctors,
    Reviews,
    Faqs,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Services,
        Collection::Doctors,
        Collection::Reviews,
        Collection::Faqs,
    ];

    /// Document key and URL segment.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::Doctors => "doctors",
            Collection::Reviews => "reviews",
            Collection::Faqs => "faqs",
        }
    }

    /// Human-readable name of one record, used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Collection::Services => "Service",
            Collection::Doctors => "Doctor",
            Collection::Reviews => "Review",
            Collection::Faqs => "FAQ",
        }
    }

    /// Route the collection is served under.
    pub fn route(self) -> &'static str {
        match self {
            Collection::Services => "/api/services",
            Collection::Doctors => "/api/doctors",
            Collection::Reviews => "/api/reviews",
            Collection::Faqs => "/api/faqs",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Singleton sections: one record updated by shallow merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Singleton {
    Hero,
    Contact,
    ServicesPage,
    ContactPage,
    SiteSettings,
}

impl Singleton {
    pub const ALL: [Singleton; 5] = [
        Singleton::Hero,
        Singleton::Contact,
        Singleton::ServicesPage,
        Singleton::ContactPage,
        Singleton::SiteSettings,
    ];

    /// Document key (camelCase, as stored and as returned in responses).
    pub fn key(self) -> &'static str {
        match self {
            Singleton::Hero => "hero",
            Singleton::Contact => "contact",
            Singleton::ServicesPage => "servicesPage",
            Singleton::ContactPage => "contactPage",
            Singleton::SiteSettings => "siteSettings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Singleton::Hero => "Hero",
            Singleton::Contact => "Contact",
            Singleton::ServicesPage => "Services page",
            Singleton::ContactPage => "Contact page",
            Singleton::SiteSettings => "Site settings",
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            Singleton::Hero => "/api/hero",
            Singleton::Contact => "/api/contact",
            Singleton::ServicesPage => "/api/services-page",
            Singleton::ContactPage => "/api/contact-page",
            Singleton::SiteSettings => "/api/site-settings",
        }
    }
}

/// Which visibility map a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityArea {
    Header,
    Footer,
}

impl VisibilityArea {
    pub fn key(self) -> &'static str {
        match self {
            VisibilityArea::Header => "headerVisibility",
            VisibilityArea::Footer => "footerVisibility",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VisibilityArea::Header => "Header visibility",
            VisibilityArea::Footer => "Footer visibility",
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            VisibilityArea::Header => "/api/header-visibility",
            VisibilityArea::Footer => "/api/footer-visibility",
        }
    }
}

// =============================================================================
// Id Allocation
// =============================================================================

/// Allocate an id for a new record.
///
/// Ids follow the clock in milliseconds but never go backwards: the result is
/// always greater than every id already in `records`.
pub fn next_record_id(records: &[Record], now_millis: u64) -> u64 {
    let highest = records.iter().map(|record| record.id).max().unwrap_or(0);
    now_millis.max(highest.saturating_add(1))
}

/// Shallow merge: every supplied field overwrites, the rest are kept.
fn merge_fields(target: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}

// =============================================================================
// Edit Operations
// =============================================================================

impl SiteContent {
    pub fn records(&self, collection: Collection) -> &[Record] {
        match collection {
            Collection::Services => &self.services,
            Collection::Doctors => &self.doctors,
            Collection::Reviews => &self.reviews,
            Collection::Faqs => &self.faqs,
        }
    }

    fn records_mut(&mut self, collection: Collection) -> &mut Vec<Record> {
        match collection {
            Collection::Services => &mut self.services,
            Collection::Doctors => &mut self.doctors,
            Collection::Reviews => &mut self.reviews,
            Collection::Faqs => &mut self.faqs,
        }
    }

    /// Append a record built from `fields` and return it.
    ///
    /// A client-supplied `id` is ignored.
    pub fn create_record(
        &mut self,
        collection: Collection,
        mut fields: Fields,
        now_millis: u64,
    ) -> Record {
        fields.remove("id");
        let records = self.records_mut(collection);
        let record = Record::new(next_record_id(records, now_millis), fields);
        records.push(record.clone());
        record
    }

    /// Merge `fields` into the record with `id`. The id itself never changes.
    pub fn update_record(
        &mut self,
        collection: Collection,
        id: u64,
        mut fields: Fields,
    ) -> Result<Record, ContentError> {
        fields.remove("id");
        let record = self
            .records_mut(collection)
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(ContentError::NotFound { collection, id })?;

        merge_fields(&mut record.fields, fields);
        Ok(record.clone())
    }

    /// Remove the record with `id`. Returns whether anything was removed;
    /// removing an absent id is not an error.
    pub fn delete_record(&mut self, collection: Collection, id: u64) -> bool {
        let records = self.records_mut(collection);
        let before = records.len();
        records.retain(|record| record.id != id);
        records.len() != before
    }

    pub fn singleton(&self, singleton: Singleton) -> &Fields {
        match singleton {
            Singleton::Hero => &self.hero,
            Singleton::Contact => &self.contact,
            Singleton::ServicesPage => &self.services_page,
            Singleton::ContactPage => &self.contact_page,
            Singleton::SiteSettings => &self.site_settings,
        }
    }

    /// Shallow-merge `fields` into a singleton section and return the result.
    pub fn merge_singleton(&mut self, singleton: Singleton, fields: Fields) -> Fields {
        let target = match singleton {
            Singleton::Hero => &mut self.hero,
            Singleton::Contact => &mut self.contact,
            Singleton::ServicesPage => &mut self.services_page,
            Singleton::ContactPage => &mut self.contact_page,
            Singleton::SiteSettings => &mut self.site_settings,
        };
        merge_fields(target, fields);
        target.clone()
    }

    /// Replace the stats list; the description is only replaced when given.
    pub fn replace_stats(&mut self, stats: Vec<Stat>, description: Option<String>) {
        self.stats = stats;
        if let Some(description) = description {
            self.stats_description = description;
        }
    }

    pub fn visibility(&self, area: VisibilityArea) -> &Visibility {
        match area {
            VisibilityArea::Header => &self.header_visibility,
            VisibilityArea::Footer => &self.footer_visibility,
        }
    }

    pub fn replace_visibility(&mut self, area: VisibilityArea, visibility: Visibility) {
        match area {
            VisibilityArea::Header => self.header_visibility = visibility,
            VisibilityArea::Footer => self.footer_visibility = visibility,
        }
    }
}
