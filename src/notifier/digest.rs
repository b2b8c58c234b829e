use crate::models::Listing;
use chrono::{DateTime, Local};

/// Subject line for a batch of listings
pub fn subject(count: usize) -> String {
    format!("{} neue private Immobilien auf Willhaben", count)
}

// Empty or zero values carry no information in a digest.
pub(crate) fn or_dash(value: &str) -> &str {
    if value.is_empty() || value == "0" {
        "-"
    } else {
        value
    }
}

/// Plain-text digest of a batch
pub fn render(listings: &[Listing], sent_at: DateTime<Local>) -> String {
    let mut out = format!(
        "{}\nGesendet: {}\n",
        subject(listings.len()),
        sent_at.format("%Y-%m-%d %H:%M:%S %Z")
    );

    for (i, listing) in listings.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, listing.title));
        out.push_str(&format!("   Preis: {}\n", listing.price));
        out.push_str(&format!("   Ort: {}\n", listing.location));
        out.push_str(&format!(
            "   Typ: {} | Fläche: {} | Zimmer: {}\n",
            or_dash(&listing.property_type),
            or_dash(&listing.size),
            or_dash(&listing.rooms)
        ));
        out.push_str(&format!("   {}\n", listing.url));
    }

    out
}
