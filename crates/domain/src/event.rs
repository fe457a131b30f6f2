//! Event record: an upcoming event as published by the events API.
//!
//! Records are immutable once fetched. UI state such as description
//! expansion lives in [`Expansions`](crate::expansion::Expansions), keyed by
//! [`EventId`], never on the record itself.

use serde::{Deserialize, Serialize};

use crate::error::{ScoutError, ValidationError};
use crate::id::EventId;
use crate::time::LocalTimestamp;

/// Image shown for events that publish no logo.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/800x300?text=No+Image";

/// Venue text shown when the event has no address yet.
pub const VENUE_TBA: &str = "TBA";

/// Publication status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    #[default]
    Live,
    Started,
    Ended,
    Completed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => f.write_str("draft"),
            Self::Live => f.write_str("live"),
            Self::Started => f.write_str("started"),
            Self::Ended => f.write_str("ended"),
            Self::Completed => f.write_str("completed"),
            Self::Canceled => f.write_str("canceled"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// A class of tickets on sale for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketClass {
    pub name: String,
    /// Formatted price (e.g. `"KES 1,500.00"`); `None` for free tickets.
    pub cost_display: Option<String>,
    pub hidden: bool,
    pub available: bool,
}

impl TicketClass {
    /// Whether this class should be listed to the user.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        !self.hidden && self.available
    }
}

impl std::fmt::Display for TicketClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.name,
            self.cost_display.as_deref().unwrap_or("Free")
        )
    }
}

/// An upcoming event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub url: String,
    pub start: LocalTimestamp,
    pub venue_address: Option<String>,
    pub ticket_classes: Vec<TicketClass>,
    pub status: EventStatus,
}

impl EventRecord {
    /// Create a builder for constructing an [`EventRecord`].
    #[must_use]
    pub fn builder() -> EventRecordBuilder {
        EventRecordBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Validation`] when `title` is empty.
    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        Ok(())
    }

    /// Logo URL, or the placeholder image when none is published.
    #[must_use]
    pub fn image_or_placeholder(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE_URL)
    }

    /// Venue address, or `TBA`.
    #[must_use]
    pub fn venue_display(&self) -> &str {
        self.venue_address.as_deref().unwrap_or(VENUE_TBA)
    }

    /// Ticket line shown on the event card.
    ///
    /// Returns `None` when the event has no ticket classes at all. Hidden and
    /// sold-out classes are left out of the summary but still count as
    /// "having tickets", so the result may be an empty string.
    #[must_use]
    pub fn ticket_summary(&self) -> Option<String> {
        if self.ticket_classes.is_empty() {
            return None;
        }
        let listed: Vec<String> = self
            .ticket_classes
            .iter()
            .filter(|tc| tc.is_listed())
            .map(ToString::to_string)
            .collect();
        Some(listed.join(", "))
    }
}

/// Step-by-step builder for [`EventRecord`].
#[derive(Debug, Default)]
pub struct EventRecordBuilder {
    id: Option<EventId>,
    title: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    url: Option<String>,
    start: Option<LocalTimestamp>,
    venue_address: Option<String>,
    ticket_classes: Vec<TicketClass>,
    status: EventStatus,
}

impl EventRecordBuilder {
    #[must_use]
    pub fn id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn start(mut self, start: LocalTimestamp) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn venue_address(mut self, venue_address: impl Into<String>) -> Self {
        self.venue_address = Some(venue_address.into());
        self
    }

    #[must_use]
    pub fn ticket_class(mut self, ticket_class: TicketClass) -> Self {
        self.ticket_classes.push(ticket_class);
        self
    }

    #[must_use]
    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Consume the builder, validate, and return an [`EventRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Validation`] if `id` or `title` is missing or
    /// empty.
    pub fn build(self) -> Result<EventRecord, ScoutError> {
        let id = self.id.ok_or(ValidationError::EmptyEventId)?;
        let record = EventRecord {
            id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image_url: self.image_url,
            url: self.url.unwrap_or_default(),
            start: self.start.unwrap_or_default(),
            venue_address: self.venue_address,
            ticket_classes: self.ticket_classes,
            status: self.status,
        };
        record.validate()?;
        Ok(record)
    }
}
