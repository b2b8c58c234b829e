use crate::models::{Listing, RawAdvert};

/// Absolute prefix for the relative `SEO_URL` attribute
pub const LISTING_BASE_URL: &str = "https://www.willhaben.at/iad/";

/// Shown when an advert carries no usable price
pub const PRICE_ON_REQUEST: &str = "Preis auf Anfrage";

/// Attributes tried in order for the listing size
const SIZE_ATTRIBUTES: [&str; 3] = [
    "ESTATE_SIZE/LIVING_AREA",
    "ESTATE_SIZE/USEABLE_AREA",
    "ESTATE_SIZE",
];

/// Convert an advert into a listing.
///
/// `ADID` is the only mandatory attribute; every other field falls back to
/// an empty string (or [`PRICE_ON_REQUEST`] for the price).
pub fn parse_listing(ad: &RawAdvert) -> Option<Listing> {
    let id = ad.attribute("ADID").filter(|id| !id.is_empty())?;
    let text = |name: &str| ad.attribute(name).unwrap_or_default().to_string();

    let price = ad
        .attribute("PRICE_FOR_DISPLAY")
        .map(str::to_string)
        .or_else(|| {
            ad.attribute("ESTATE_PRICE/PRICE_SUGGESTION")
                .and_then(format_price)
        })
        .unwrap_or_else(|| PRICE_ON_REQUEST.to_string());

    let url = match ad.attribute("SEO_URL") {
        Some(path) if !path.is_empty() => format!("{}{}", LISTING_BASE_URL, path),
        _ => String::new(),
    };

    let size = SIZE_ATTRIBUTES
        .iter()
        .find_map(|name| ad.attribute(name))
        .unwrap_or_default()
        .to_string();

    Some(Listing {
        id: id.to_string(),
        title: text("HEADING"),
        price,
        location: compose_location(ad),
        url,
        property_type: text("PROPERTY_TYPE"),
        size,
        rooms: text("NUMBER_OF_ROOMS"),
    })
}

/// `"{address}, {postcode} {area}"` when an address is known, the area alone otherwise
fn compose_location(ad: &RawAdvert) -> String {
    let area = ad.attribute("LOCATION").unwrap_or_default();

    match ad.attribute("ADDRESS") {
        Some(address) if !address.is_empty() => {
            let postcode = ad.attribute("POSTCODE").unwrap_or_default();
            format!("{}, {} {}", address, postcode, area).trim().to_string()
        }
        _ => area.to_string(),
    }
}

/// Format a numeric price suggestion as `€ 1,234.50`.
///
/// Empty input yields `None`; text that is not a finite number is returned
/// unchanged.
pub fn format_price(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let value = match raw.trim().replace(',', "").parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return Some(raw.to_string()),
    };

    // Midpoints round away from zero: 0.125 -> 0.13
    let cents_total = (value.abs() * 100.0).round();
    let fixed = format!("{:.2}", cents_total / 100.0);
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    Some(format!("€ {}{}.{}", sign, group_thousands(whole), cents))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_record() {
        let ad = RawAdvert::from_pairs([
            ("ADID", vec!["987654"]),
            ("HEADING", vec!["Helle 3-Zimmer-Wohnung"]),
            ("PRICE_FOR_DISPLAY", vec!["€ 349.000"]),
            ("ADDRESS", vec!["Hauptstr. 1"]),
            ("POSTCODE", vec!["1010"]),
            ("LOCATION", vec!["Wien"]),
            ("SEO_URL", vec!["d/immobilien/wohnung-987654/"]),
            ("PROPERTY_TYPE", vec!["Wohnung"]),
            ("ESTATE_SIZE/LIVING_AREA", vec!["78"]),
            ("NUMBER_OF_ROOMS", vec!["3"]),
        ]);

        let listing = parse_listing(&ad).unwrap();
        assert_eq!(
            listing,
            Listing {
                id: "987654".to_string(),
                title: "Helle 3-Zimmer-Wohnung".to_string(),
                price: "€ 349.000".to_string(),
                location: "Hauptstr. 1, 1010 Wien".to_string(),
                url: "https://www.willhaben.at/iad/d/immobilien/wohnung-987654/".to_string(),
                property_type: "Wohnung".to_string(),
                size: "78".to_string(),
                rooms: "3".to_string(),
            }
        );
    }

    #[test]
    fn missing_identifier_is_rejected() {
        let ad = RawAdvert::from_pairs([("HEADING", vec!["Haus"])]);
        assert!(parse_listing(&ad).is_none());
        assert!(parse_listing(&RawAdvert::default()).is_none());
    }

    #[test]
    fn sparse_record_degrades_to_empty_fields() {
        let listing = parse_listing(&RawAdvert::from_pairs([("ADID", vec!["1"])])).unwrap();
        assert_eq!(listing.title, "");
        assert_eq!(listing.price, PRICE_ON_REQUEST);
        assert_eq!(listing.location, "");
        assert_eq!(listing.url, "");
        assert_eq!(listing.size, "");
        assert_eq!(listing.rooms, "");
    }

    #[test]
    fn size_falls_back_to_estate_size() {
        let ad = RawAdvert::from_pairs([("ADID", vec!["1"]), ("ESTATE_SIZE", vec!["120"])]);
        assert_eq!(parse_listing(&ad).unwrap().size, "120");

        let ad = RawAdvert::from_pairs([
            ("ADID", vec!["1"]),
            ("ESTATE_SIZE", vec!["120"]),
            ("ESTATE_SIZE/USEABLE_AREA", vec!["95"]),
        ]);
        assert_eq!(parse_listing(&ad).unwrap().size, "95");
    }

    #[test]
    fn location_without_address_is_area_only() {
        let ad = RawAdvert::from_pairs([
            ("ADID", vec!["1"]),
            ("POSTCODE", vec!["1010"]),
            ("LOCATION", vec!["Wien"]),
        ]);
        assert_eq!(parse_listing(&ad).unwrap().location, "Wien");

        let ad = RawAdvert::from_pairs([
            ("ADID", vec!["1"]),
            ("ADDRESS", vec!["Hauptstr. 1"]),
            ("LOCATION", vec!["Wien"]),
        ]);
        assert_eq!(parse_listing(&ad).unwrap().location, "Hauptstr. 1,  Wien");
    }

    #[test]
    fn price_suggestion_is_formatted() {
        let ad = RawAdvert::from_pairs([
            ("ADID", vec!["1"]),
            ("ESTATE_PRICE/PRICE_SUGGESTION", vec!["250000"]),
        ]);
        assert_eq!(parse_listing(&ad).unwrap().price, "€ 250,000.00");
    }

    #[test]
    fn format_price_cases() {
        assert_eq!(format_price(""), None);
        assert_eq!(format_price("0").as_deref(), Some("€ 0.00"));
        assert_eq!(format_price("999.5").as_deref(), Some("€ 999.50"));
        assert_eq!(format_price("0.125").as_deref(), Some("€ 0.13"));
        assert_eq!(format_price("-0.125").as_deref(), Some("€ -0.13"));
        assert_eq!(format_price("0.004").as_deref(), Some("€ 0.00"));
        assert_eq!(format_price("1234567.891").as_deref(), Some("€ 1,234,567.89"));
        assert_eq!(format_price("-1500").as_deref(), Some("€ -1,500.00"));
        assert_eq!(format_price("auf Anfrage").as_deref(), Some("auf Anfrage"));
    }
}
