//! Wire types for the Eventbrite search response and their mapping to
//! domain records.
//!
//! Only the fields the discovery view shows are decoded; everything is
//! optional where the API may send `null`.

use chrono::NaiveDateTime;
use serde::Deserialize;

use eventscout_domain::error::ValidationError;
use eventscout_domain::event::{EventRecord, EventStatus, TicketClass};
use eventscout_domain::id::EventId;
use eventscout_domain::page::Page;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    events: Vec<EventDto>,
    #[serde(default)]
    pagination: PaginationDto,
}

#[derive(Debug, Default, Deserialize)]
struct PaginationDto {
    #[serde(default)]
    has_more_items: bool,
}

#[derive(Debug, Default, Deserialize)]
struct TextDto {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LogoDto {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StartDto {
    local: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
struct VenueDto {
    address: Option<AddressDto>,
}

#[derive(Debug, Deserialize)]
struct AddressDto {
    localized_address_display: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CostDto {
    display: String,
}

#[derive(Debug, Deserialize)]
struct TicketClassDto {
    #[serde(default)]
    name: String,
    cost: Option<CostDto>,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    is_available: bool,
}

#[derive(Debug, Deserialize)]
struct EventDto {
    id: String,
    #[serde(default)]
    name: TextDto,
    description: Option<TextDto>,
    #[serde(default)]
    url: String,
    logo: Option<LogoDto>,
    start: StartDto,
    venue: Option<VenueDto>,
    #[serde(default)]
    ticket_classes: Vec<TicketClassDto>,
    #[serde(default)]
    status: EventStatus,
}

impl SearchResponse {
    pub(crate) fn into_page(self) -> Result<Page, ValidationError> {
        let events = self
            .events
            .into_iter()
            .map(EventDto::into_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            events,
            has_more: self.pagination.has_more_items,
        })
    }
}

impl EventDto {
    fn into_record(self) -> Result<EventRecord, ValidationError> {
        Ok(EventRecord {
            id: EventId::new(self.id)?,
            title: self.name.text.unwrap_or_default(),
            description: self
                .description
                .and_then(|d| d.text)
                .unwrap_or_default(),
            image_url: self.logo.and_then(|logo| logo.url),
            url: self.url,
            start: self.start.local,
            venue_address: self
                .venue
                .and_then(|venue| venue.address)
                .and_then(|address| address.localized_address_display),
            ticket_classes: self
                .ticket_classes
                .into_iter()
                .map(|tc| TicketClass {
                    name: tc.name,
                    cost_display: tc.cost.map(|cost| cost.display),
                    hidden: tc.hidden,
                    available: tc.is_available,
                })
                .collect(),
            status: self.status,
        })
    }
}
