use anyhow::{bail, Result};
use movela_lib::types::CatalogItem;
use movela_lib::CategoryBucket;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            other => bail!("unknown output format '{}'. Valid: table, json, csv, markdown", other),
        }
    }
}

#[derive(Tabled, Serialize)]
struct ItemRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Released")]
    #[serde(rename = "Released")]
    released: String,
    #[tabled(rename = "Rating")]
    #[serde(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Popularity")]
    #[serde(rename = "Popularity")]
    popularity: String,
}

#[derive(Tabled, Serialize)]
struct BucketRow {
    #[tabled(rename = "Genre")]
    #[serde(rename = "Genre")]
    genre: String,
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Released")]
    #[serde(rename = "Released")]
    released: String,
}

// -- Row builders --

fn item_row(item: &CatalogItem) -> ItemRow {
    ItemRow {
        id: item.id,
        title: item.title().unwrap_or("-").to_string(),
        released: item.release_date().unwrap_or("-").to_string(),
        rating: item
            .vote_average()
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string()),
        popularity: item
            .popularity()
            .map(|p| format!("{:.1}", p))
            .unwrap_or_else(|| "-".to_string()),
    }
}

fn build_item_rows(items: &[CatalogItem]) -> Vec<ItemRow> {
    items.iter().map(item_row).collect()
}

fn build_bucket_rows(buckets: &[CategoryBucket]) -> Vec<BucketRow> {
    buckets
        .iter()
        .flat_map(|bucket| {
            bucket.items.iter().map(move |item| BucketRow {
                genre: bucket.category.display_name.to_string(),
                id: item.id,
                title: item.title().unwrap_or("-").to_string(),
                released: item.release_date().unwrap_or("-").to_string(),
            })
        })
        .collect()
}

fn render<T: Tabled>(rows: Vec<T>, markdown: bool) -> String {
    let mut table = Table::new(rows);
    if markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

fn write_csv<T: Serialize>(rows: Vec<T>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- Public printers --

pub fn print_items(items: &[CatalogItem], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render(build_item_rows(items), false)),
        OutputFormat::Markdown => println!("{}", render(build_item_rows(items), true)),
        OutputFormat::Csv => write_csv(build_item_rows(items))?,
        OutputFormat::Json => print_json(&items),
    }
    Ok(())
}

pub fn print_buckets(buckets: &[CategoryBucket], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render(build_bucket_rows(buckets), false)),
        OutputFormat::Markdown => println!("{}", render(build_bucket_rows(buckets), true)),
        OutputFormat::Csv => write_csv(build_bucket_rows(buckets))?,
        OutputFormat::Json => print_json(&buckets),
    }
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use movela_lib::Category;

    use super::*;

    fn sample() -> CatalogItem {
        CatalogItem::new(550)
            .with_field("title", "Fight Club")
            .with_field("release_date", "1999-10-15")
            .with_field("vote_average", 8.438)
            .with_field("popularity", 61.4)
    }

    #[test]
    fn parses_output_formats() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn item_row_formats_numbers() {
        let row = item_row(&sample());
        assert_eq!(row.title, "Fight Club");
        assert_eq!(row.released, "1999-10-15");
        assert_eq!(row.rating, "8.4");
        assert_eq!(row.popularity, "61.4");
    }

    #[test]
    fn item_row_uses_series_name_and_dashes() {
        let series = CatalogItem::new(1399).with_field("name", "Game of Thrones");
        let row = item_row(&series);
        assert_eq!(row.title, "Game of Thrones");
        assert_eq!(row.released, "-");
        assert_eq!(row.rating, "-");
    }

    #[test]
    fn bucket_rows_keep_genre_order() {
        let buckets = vec![
            CategoryBucket {
                category: Category::new(28, "Action"),
                items: vec![sample(), CatalogItem::new(2)],
            },
            CategoryBucket {
                category: Category::new(35, "Comédie"),
                items: vec![CatalogItem::new(3)],
            },
        ];
        let rows = build_bucket_rows(&buckets);
        let genres: Vec<_> = rows.iter().map(|r| r.genre.as_str()).collect();
        assert_eq!(genres, vec!["Action", "Action", "Comédie"]);
    }

    #[test]
    fn markdown_table_has_header() {
        let out = render(build_item_rows(&[sample()]), true);
        assert!(out.contains("| ID "));
        assert!(out.contains("Fight Club"));
    }
}
