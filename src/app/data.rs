//! Option data for the inventory filter form.

use serde_json::json;

use crate::dropdown::SelectOption;
use crate::error::SourceError;
use crate::source::{load_options, OptionFeed, OptionSource, StaticSource};

/// Everything the filter form's dropdowns are filled from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterData {
    pub institutions: Vec<SelectOption>,
    /// Regionals tagged with their institution's id.
    pub regionals: Vec<(String, SelectOption)>,
    pub statuses: Vec<SelectOption>,
}

impl FilterData {
    pub fn institution_feed() -> OptionFeed {
        OptionFeed::new("institutions", "id", "nama")
    }

    pub fn regional_feed() -> OptionFeed {
        OptionFeed::new("regionals", "id", "nama").disabled_key("nonaktif")
    }

    pub fn status_feed() -> OptionFeed {
        OptionFeed::new("item-statuses", "kode", "nama").disabled_key("arsip")
    }

    /// Fetches all three lists from `source`.
    pub async fn load(source: &dyn OptionSource) -> Result<Self, SourceError> {
        let institutions = load_options(source, &Self::institution_feed()).await?;

        let regional_feed = Self::regional_feed();
        let records = source.fetch(&regional_feed.resource).await?;
        let regionals = regional_feed.map_grouped(&records, "institution_id");

        let statuses = load_options(source, &Self::status_feed()).await?;

        Ok(Self {
            institutions,
            regionals,
            statuses,
        })
    }

    /// Regionals of one institution, in source order.
    pub fn regionals_for(&self, institution: &str) -> Vec<SelectOption> {
        self.regionals
            .iter()
            .filter(|(parent, _)| parent == institution)
            .map(|(_, option)| option.clone())
            .collect()
    }

    /// Every regional, for transfer destinations.
    pub fn all_regionals(&self) -> Vec<SelectOption> {
        self.regionals
            .iter()
            .map(|(_, option)| option.clone())
            .collect()
    }
}

/// Built-in records used when no API is configured.
pub fn sample_source() -> StaticSource {
    StaticSource::new()
        .with(
            "institutions",
            json!([
                { "id": 1, "nama": "Dinas Pendidikan" },
                { "id": 2, "nama": "Dinas Kesehatan" },
                { "id": 3, "nama": "Badan Pengelola Aset Daerah" }
            ]),
        )
        .with(
            "regionals",
            json!({ "data": [
                { "id": 11, "institution_id": 1, "nama": "Regional Jakarta Pusat" },
                { "id": 12, "institution_id": 1, "nama": "Regional Jakarta Timur" },
                { "id": 13, "institution_id": 1, "nama": "Regional Bekasi", "nonaktif": true },
                { "id": 21, "institution_id": 2, "nama": "Regional Bandung" },
                { "id": 22, "institution_id": 2, "nama": "Regional Cimahi" },
                { "id": 31, "institution_id": 3, "nama": "Regional Surabaya" },
                { "id": 32, "institution_id": 3, "nama": "Regional Malang" },
                { "id": 33, "institution_id": 3, "nama": "Regional Sidoarjo" }
            ]}),
        )
        .with(
            "item-statuses",
            json!([
                { "kode": "baik", "nama": "Baik" },
                { "kode": "rusak_ringan", "nama": "Rusak Ringan" },
                { "kode": "rusak_berat", "nama": "Rusak Berat" },
                { "kode": "hilang", "nama": "Hilang", "arsip": true }
            ]),
        )
}
