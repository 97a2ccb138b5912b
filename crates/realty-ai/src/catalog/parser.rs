use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::validation::ListingDraft;
use crate::matching::ListingId;

pub(crate) fn parse_drafts<R: Read>(reader: R) -> Result<Vec<ListingDraft>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut drafts = Vec::new();

    for record in csv_reader.deserialize::<CatalogRow>() {
        let row = record?;
        drafts.push(row.into_draft());
    }

    Ok(drafts)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    location: String,
    price: i64,
    area: f64,
    #[serde(rename = "type")]
    property_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bedrooms: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    features: Option<String>,
}

impl CatalogRow {
    fn into_draft(self) -> ListingDraft {
        let features = self
            .features
            .map(|raw| raw.split(';').map(str::to_string).collect())
            .unwrap_or_default();

        ListingDraft {
            id: ListingId(self.id),
            title: self.title,
            price: self.price,
            location: self.location,
            property_type: self.property_type,
            area: self.area,
            bedrooms: self.bedrooms.as_deref().map(parse_bedrooms),
            features,
        }
    }
}

// Unparseable counts become -1 so validation reports them instead of dropping the row.
fn parse_bedrooms(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(-1)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
