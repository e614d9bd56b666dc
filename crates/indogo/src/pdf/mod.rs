//! PDF export of tickets.
//!
//! The ticket document is a fixed sequence of blocks: a centred header with
//! the airline and date, the route, passenger/meal info, passenger details,
//! boarding details, the amount paid, an optional promotion, and the terms.
//!
//! # Example
//!
//! ```no_run
//! use indogo::catalog::Catalog;
//! use indogo::pdf::export;
//! use indogo::ticket::{Ticket, TicketSettings};
//!
//! let catalog = Catalog::default();
//! let flight = &catalog.flights()[0];
//! let ticket = Ticket::issue_today(flight, &TicketSettings::default());
//! let path = export(&ticket, std::path::Path::new("/tmp")).unwrap();
//! println!("Saved to: {}", path.display());
//! ```

pub mod layout;
pub mod metrics;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use lopdf::content::Content;
use lopdf::{dictionary, Document, Object, Stream};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::ticket::Ticket;

use layout::{Align, Composer, Font, Paragraph, GRAY, PAGE_HEIGHT, PAGE_WIDTH};

const PAGE_MARGIN: f32 = 20.0;
const TABLE_WIDTH: f32 = 500.0;
const BRAND_COLOR: [f32; 3] = [95.0 / 255.0, 79.0 / 255.0, 209.0 / 255.0];

/// Heading of the terms paragraph.
pub const TERMS_HEADING: &str = "Terms & Conditions";

/// Terms printed at the foot of every ticket.
pub const TERMS_TEXT: &str = "This is your electronic ticket. Please present this document \
along with a valid government-issued photo ID at the airport security check and boarding gate. \
Boarding begins 45 minutes before departure and gates close 20 minutes before departure.";

/// File name for a ticket exported at `at`:
/// `FlightTicket_<airline>_<yyyyMMdd_HHmmss>.pdf`.
#[must_use]
pub fn file_name(ticket: &Ticket, at: NaiveDateTime) -> String {
    format!(
        "FlightTicket_{}_{}.pdf",
        ticket.flight.compact_airline_name(),
        at.format("%Y%m%d_%H%M%S")
    )
}

fn detail_cell(label: &str, value: &str) -> Vec<Paragraph> {
    vec![
        Paragraph::new(label).size(9.0).color(GRAY),
        Paragraph::new(value).size(12.0).bold(),
    ]
}

/// Lay the ticket out, returning one operation list per page.
#[must_use]
pub fn compose(ticket: &Ticket) -> Vec<Vec<lopdf::content::Operation>> {
    let flight = &ticket.flight;
    let mut page = Composer::new(PAGE_MARGIN);

    // header
    page.paragraph(
        &Paragraph::new(&flight.airline_name)
            .size(24.0)
            .bold()
            .color(BRAND_COLOR)
            .align(Align::Center)
            .margin_bottom(20.0),
    );
    page.paragraph(
        &Paragraph::new(format!("Date: {}", ticket.formatted_date()))
            .size(12.0)
            .align(Align::Center)
            .margin_bottom(30.0),
    );

    // route
    page.table_row(
        TABLE_WIDTH,
        &[
            vec![
                Paragraph::new(&flight.departure_code).size(20.0).bold(),
                Paragraph::new(ticket.departure_airport()).size(10.0),
            ],
            vec![
                Paragraph::new("\u{2708}").size(16.0).align(Align::Center),
                Paragraph::new(&flight.duration)
                    .size(12.0)
                    .align(Align::Center),
            ],
            vec![
                Paragraph::new(&flight.arrival_code)
                    .size(20.0)
                    .bold()
                    .align(Align::Right),
                Paragraph::new(ticket.arrival_airport())
                    .size(10.0)
                    .align(Align::Right),
            ],
        ],
    );
    page.blank_lines(1);

    page.table_row(
        TABLE_WIDTH,
        &[
            vec![Paragraph::new(ticket.passenger_count_label()).bold()],
            vec![Paragraph::new(flight.meal_label()).bold()],
        ],
    );
    page.blank_lines(1);

    page.table_row(
        TABLE_WIDTH,
        &[
            detail_cell("Passenger Name", &ticket.passenger_name),
            detail_cell("Flight Type", &ticket.travel_class),
            detail_cell("Flight Code", &ticket.flight_code),
        ],
    );
    page.blank_lines(1);

    page.table_row(
        TABLE_WIDTH,
        &[
            detail_cell("Boarding Time", &ticket.boarding_time),
            detail_cell("Gate", &ticket.gate),
            detail_cell("Terminal", &ticket.terminal),
            detail_cell("Seat Number", &ticket.seat),
        ],
    );
    page.blank_lines(1);

    page.paragraph(
        &Paragraph::new(format!("Total Paid: {}", ticket.total_paid()))
            .size(16.0)
            .bold()
            .align(Align::Center)
            .margin_top(20.0),
    );

    if flight.has_promo() {
        page.paragraph_with_background(
            &Paragraph::new(&flight.promo_code)
                .size(10.0)
                .italic()
                .align(Align::Center)
                .margin_top(10.0),
            Some(flight.promo_color().to_unit()),
        );
    }

    // footer
    page.blank_lines(2);
    page.paragraph(
        &Paragraph::new(TERMS_HEADING)
            .bold()
            .size(12.0)
            .margin_bottom(5.0),
    );
    page.paragraph(
        &Paragraph::new(TERMS_TEXT)
            .size(10.0)
            .align(Align::Justified),
    );

    page.finish()
}

/// Render the ticket to PDF bytes.
///
/// # Errors
///
/// Returns an error if a content stream cannot be encoded or the document
/// cannot be serialized.
pub fn render(ticket: &Ticket) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in compose(ticket) {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(count),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            PAGE_WIDTH.into(),
            PAGE_HEIGHT.into(),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(format!("{} e-ticket", ticket.flight.airline_name)),
        "Producer" => Object::string_literal(concat!("indogo ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| Error::pdf(e.to_string()))?;
    debug!(bytes = bytes.len(), "Rendered ticket PDF");
    Ok(bytes)
}

/// Write the ticket PDF into `dir`, creating the directory if needed.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, rendering fails, or
/// the file cannot be written.
pub fn export(ticket: &Ticket, dir: &Path) -> Result<PathBuf> {
    export_at(ticket, dir, Local::now().naive_local())
}

/// Like [`export`], with the file name timestamp given explicitly.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, rendering fails, or
/// the file cannot be written.
pub fn export_at(ticket: &Ticket, dir: &Path, at: NaiveDateTime) -> Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let path = dir.join(file_name(ticket, at));
    let bytes = render(ticket)?;
    std::fs::write(&path, &bytes)?;

    info!("Ticket written to {}", path.display());
    Ok(path)
}
