use crate::models::RawAdvert;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// JSON pointer to the advert array inside the Next.js page data
const ADVERT_SUMMARY_POINTER: &str = "/props/pageProps/searchResult/advertSummaryList/advertSummary";

/// Result of looking for the embedded advert data on a page
#[derive(Debug)]
pub enum Extraction {
    /// The page carried an advert array (possibly empty)
    Adverts(Vec<RawAdvert>),
    /// No `__NEXT_DATA__` script on the page
    MissingScript,
    /// The script was there but its content did not have the expected shape
    Malformed(String),
}

/// Locate the `__NEXT_DATA__` script and pull the advert summaries out of it
pub fn extract_adverts(html: &str) -> Extraction {
    let document = Html::parse_document(html);
    let selector = match Selector::parse(r#"script[id="__NEXT_DATA__"]"#) {
        Ok(selector) => selector,
        Err(e) => return Extraction::Malformed(format!("invalid selector: {:?}", e)),
    };

    let Some(script) = document.select(&selector).next() else {
        return Extraction::MissingScript;
    };

    let text: String = script.text().collect();
    let root: Value = match serde_json::from_str(&text) {
        Ok(root) => root,
        Err(e) => return Extraction::Malformed(format!("invalid JSON: {}", e)),
    };

    let Some(summaries) = root
        .pointer(ADVERT_SUMMARY_POINTER)
        .and_then(Value::as_array)
    else {
        return Extraction::Malformed("advertSummary array not found".to_string());
    };

    let adverts = summaries
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| match RawAdvert::deserialize(value) {
            Ok(ad) => Some(ad),
            Err(e) => {
                debug!("Skipping malformed advert {}: {}", idx, e);
                None
            }
        })
        .collect();

    Extraction::Adverts(adverts)
}

#[cfg(test)]
pub(crate) fn next_data_page(adverts: &[Value]) -> String {
    let data = serde_json::json!({
        "props": {
            "pageProps": {
                "searchResult": {
                    "advertSummaryList": { "advertSummary": adverts }
                }
            }
        }
    });

    format!(
        r#"<!DOCTYPE html><html><head><title>willhaben</title></head><body>
<div id="__next"></div>
<script id="__NEXT_DATA__" type="application/json">{}</script>
</body></html>"#,
        data
    )
}
