use crate::models::{Ad, Category};
use crate::scrapers::Harvest;
use std::fmt::Write;

pub const NO_ADS_NOTICE: &str = "Nema oglasa za danas.";
const NOT_AVAILABLE: &str = "N/A";

const HEADERS: [&str; 12] = [
    "Naziv",
    "Tip objekta",
    "Lokacija",
    "Cijena",
    "Cijena/m2",
    "Broj soba",
    "Godina izgradnje",
    "Površina",
    "Objavljeno",
    "Opis",
    "Izvor",
    "Link",
];

/// Full mail body: the filter targets, then one section per category with
/// a table per source.
pub fn render_digest(harvest: &Harvest, targets: &[String]) -> String {
    let mut html = format!(
        "<h2>Filtrirano: {}</h2>",
        escape_html(&display_targets(targets))
    );

    for category in [Category::Houses, Category::Flats] {
        let _ = write!(html, "<h2>{}</h2>", category.label());
        for report in harvest.in_category(category) {
            html.push_str(&render_table(&report.config.site, &report.ads));
        }
    }
    html
}

/// One titled table; an empty list renders the notice instead
pub fn render_table(title: &str, ads: &[Ad]) -> String {
    let title = escape_html(title);
    if ads.is_empty() {
        return format!("<h3>{}</h3><p><strong>{}</strong></p><br>", title, NO_ADS_NOTICE);
    }

    let mut html = format!("<h3>{}</h3>", title);
    html.push_str("<table border='1' cellpadding='5' cellspacing='0'><tr>");
    for header in HEADERS {
        let _ = write!(html, "<th>{}</th>", header);
    }
    html.push_str("</tr>");

    for ad in ads {
        html.push_str("<tr>");
        let cells = [
            Some(ad.title.as_str()),
            ad.property_type.as_deref(),
            ad.location.as_deref(),
            ad.price.as_deref(),
            ad.price_per_m2.as_deref(),
            ad.number_of_rooms.as_deref(),
            ad.year_built.as_deref(),
            ad.area.as_deref(),
            ad.date_posted.as_deref(),
            ad.description.as_deref(),
            ad.source.as_deref(),
        ];
        for cell in cells {
            let _ = write!(html, "<td>{}</td>", escape_html(cell.unwrap_or(NOT_AVAILABLE)));
        }
        let _ = write!(
            html,
            "<td><a href='{}' target='_blank'>Otvori</a></td></tr>",
            escape_html(&ad.href)
        );
    }

    html.push_str("</table><br><br>");
    let _ = write!(
        html,
        "<p><strong>Ukupno pronađeno oglasa: {}</strong></p><br>",
        ads.len()
    );
    html
}

/// `["novska", "jarun"]` -> `Novska, Jarun`
pub fn display_targets(targets: &[String]) -> String {
    targets
        .iter()
        .map(|t| capitalize(t))
        .collect::<Vec<_>>()
        .join(", ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
