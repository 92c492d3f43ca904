use crate::models::Ad;
use crate::scrapers::Harvest;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const COLUMNS: [&str; 12] = [
    "source",
    "category",
    "title",
    "location",
    "price",
    "price_per_m2",
    "area",
    "number_of_rooms",
    "year_built",
    "date_posted",
    "description",
    "href",
];

#[derive(Serialize)]
struct Row<'a> {
    source: &'a str,
    category: &'a str,
    title: &'a str,
    location: &'a str,
    price: &'a str,
    price_per_m2: &'a str,
    area: &'a str,
    number_of_rooms: &'a str,
    year_built: &'a str,
    date_posted: &'a str,
    description: &'a str,
    href: &'a str,
}

impl<'a> Row<'a> {
    fn new(source: &'a str, category: &'a str, ad: &'a Ad) -> Self {
        let field = |value: &'a Option<String>| value.as_deref().unwrap_or("");
        Self {
            source,
            category,
            title: &ad.title,
            location: field(&ad.location),
            price: field(&ad.price),
            price_per_m2: field(&ad.price_per_m2),
            area: field(&ad.area),
            number_of_rooms: field(&ad.number_of_rooms),
            year_built: field(&ad.year_built),
            date_posted: field(&ad.date_posted),
            description: field(&ad.description),
            href: &ad.href,
        }
    }
}

/// Write `(source, category, ad)` rows under the fixed header. The header is
/// written even when there are no rows; missing fields are empty cells.
pub fn write_rows<'a, W, I>(out: W, rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a str, &'a Ad)>,
{
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(COLUMNS)?;
    for (source, category, ad) in rows {
        writer.serialize(Row::new(source, category, ad))?;
    }
    writer.flush()?;
    Ok(())
}

/// Export every source's ads to `<dir>/<file_name>`, creating the directory
pub fn export_csv(dir: &Path, file_name: &str, harvest: &Harvest) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(file_name);
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let rows = harvest.reports.iter().flat_map(|report| {
        report
            .ads
            .iter()
            .map(move |ad| (report.config.site.as_str(), report.config.category.label(), ad))
    });
    write_rows(file, rows)?;

    info!("💾 Saved {} ads to {}", harvest.total(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::scrapers::aggregator::SourceReport;
    use crate::scrapers::{AdapterKind, SourceConfig};

    fn report(site: &str, category: Category, ads: Vec<Ad>) -> SourceReport {
        SourceReport {
            config: SourceConfig::new(site, site, category, AdapterKind::ClassifiedBox, "https://x.hr/{page}"),
            ads,
        }
    }

    #[test]
    fn empty_harvest_still_writes_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let harvest = Harvest {
            reports: vec![report("Plavi oglasnik", Category::Houses, vec![])],
        };

        let path = export_csv(&dir.path().join("out"), "empty.csv", &harvest).unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, format!("{}\n", COLUMNS.join(",")));
    }

    #[test]
    fn rows_follow_catalogue_order_with_empty_cells_for_missing_fields() {
        let mut flat = Ad::new("Stan, Jarun", "https://x.hr/2");
        flat.price = Some("210.000 €".to_string());
        flat.description = Some("Svijetao, \"odmah useljiv\"".to_string());
        let house = Ad::new("Kuća Novska", "https://x.hr/1");

        let mut out = Vec::new();
        write_rows(
            &mut out,
            [("Index oglasi", "Kuće", &house), ("GoHome", "Stanovi", &flat)],
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Index oglasi,Kuće,Kuća Novska,,,,,,,,,https://x.hr/1");
        assert_eq!(
            lines[2],
            "GoHome,Stanovi,\"Stan, Jarun\",,210.000 €,,,,,,\"Svijetao, \"\"odmah useljiv\"\"\",https://x.hr/2"
        );
    }
}
