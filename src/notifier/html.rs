use crate::models::Listing;
use crate::notifier::digest::or_dash;
use chrono::{DateTime, Utc};
use chrono_tz::Europe::Vienna;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Built-in email template
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/digest.html");

const LISTING_START: &str = "<!--LISTING_START-->";
const LISTING_END: &str = "<!--LISTING_END-->";

/// Render the HTML digest.
///
/// The block between `<!--LISTING_START-->` and `<!--LISTING_END-->` is
/// repeated once per listing, with the separator rule dropped after the last
/// one. `{{SENT_AT}}`, `{{TIMEZONE}}` and `{{COUNT}}` are filled outside the
/// block, in Vienna local time. A template without markers gets no listings.
pub fn render(template: &str, listings: &[Listing], sent_at: DateTime<Utc>) -> String {
    let (head, block, tail) = split_block(template).unwrap_or((template, "", ""));

    let mut items: Vec<String> = listings
        .iter()
        .map(|listing| fill_listing(block, listing))
        .collect();
    if let Some(last) = items.last_mut() {
        strip_trailing_rule(last);
    }

    let local = sent_at.with_timezone(&Vienna);
    let sent = local.format("%Y-%m-%d %H:%M:%S").to_string();
    let zone = local.format("%Z").to_string();
    let count = listings.len().to_string();
    let fill_header = |part: &str| {
        part.replace("{{SENT_AT}}", &sent)
            .replace("{{TIMEZONE}}", &zone)
            .replace("{{COUNT}}", &count)
    };

    format!("{}{}{}", fill_header(head), items.concat(), fill_header(tail))
}

fn split_block(template: &str) -> Option<(&str, &str, &str)> {
    let (head, rest) = template.split_once(LISTING_START)?;
    let (block, tail) = rest.split_once(LISTING_END)?;
    Some((head, block, tail))
}

fn fill_listing(block: &str, listing: &Listing) -> String {
    block
        .replace("{{TITLE}}", &encode_text(&listing.title))
        .replace("{{PRICE}}", &encode_text(&listing.price))
        .replace("{{LOCATION}}", &encode_text(&listing.location))
        .replace("{{URL}}", &encode_double_quoted_attribute(&listing.url))
        .replace("{{PROPERTY_TYPE}}", &encode_text(or_dash(&listing.property_type)))
        .replace("{{SIZE}}", &encode_text(or_dash(&listing.size)))
        .replace("{{ROOMS}}", &encode_text(or_dash(&listing.rooms)))
}

// Removes the last `<hr ...>` tag of a rendered item.
fn strip_trailing_rule(item: &mut String) {
    if let Some(start) = item.rfind("<hr") {
        if let Some(len) = item[start..].find('>') {
            item.replace_range(start..=start + len, "");
        }
    }
}
